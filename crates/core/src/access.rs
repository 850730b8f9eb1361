//! Group-membership access predicate.
//!
//! Visibility is decided by a single rule: the caller's id must be a member
//! of the entity's `sharable_groups` set. Repositories apply the rule at the
//! query level (`$n::UUID = ANY(sharable_groups)`); the helpers here mirror
//! it in-process and maintain the creator-membership invariant on writes.

use uuid::Uuid;

/// In-process mirror of the SQL predicate `$n::UUID = ANY(sharable_groups)`.
pub fn is_member(principal: Uuid, groups: &[Uuid]) -> bool {
    groups.contains(&principal)
}

/// Deduplicate `groups`, guaranteeing `creator` is a member.
///
/// Every entity's `sharable_groups` must contain its creator; create paths
/// run their draft group set through this before the insert.
pub fn groups_with_creator(groups: &[Uuid], creator: Uuid) -> Vec<Uuid> {
    let mut out: Vec<Uuid> = Vec::with_capacity(groups.len() + 1);
    for &group in groups {
        if !out.contains(&group) {
            out.push(group);
        }
    }
    if !out.contains(&creator) {
        out.push(creator);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_matches_group_set() {
        let member = Uuid::new_v4();
        let outsider = Uuid::new_v4();
        let groups = vec![Uuid::new_v4(), member];

        assert!(is_member(member, &groups));
        assert!(!is_member(outsider, &groups));
        assert!(!is_member(outsider, &[]));
    }

    #[test]
    fn creator_is_always_added() {
        let creator = Uuid::new_v4();
        let other = Uuid::new_v4();

        let groups = groups_with_creator(&[other], creator);
        assert_eq!(groups, vec![other, creator]);
    }

    #[test]
    fn creator_is_not_duplicated() {
        let creator = Uuid::new_v4();
        let other = Uuid::new_v4();

        let groups = groups_with_creator(&[creator, other, creator], creator);
        assert_eq!(groups, vec![creator, other]);
    }

    #[test]
    fn empty_groups_yield_creator_only() {
        let creator = Uuid::new_v4();
        assert_eq!(groups_with_creator(&[], creator), vec![creator]);
    }
}
