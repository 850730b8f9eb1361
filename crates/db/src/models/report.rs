//! Derived valuation metrics over a user's visible inventory.

use rust_decimal::Decimal;
use serde::Serialize;
use stockroom_core::types::Timestamp;

/// Valuation totals for one reporting window.
///
/// Both sums are zero when no rows match, never null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetReport {
    /// Sum of prices over every visible asset in the window.
    pub item_valuation: Decimal,
    /// Same sum restricted to assets linked to at least one category.
    pub total_category_items_cost: Decimal,
    /// Start of the window the report was computed over.
    pub since: Timestamp,
}
