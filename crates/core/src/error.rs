#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity that must exist (e.g. a status) does not.
    #[error("{entity} not found: {reference}")]
    NotFound {
        entity: &'static str,
        reference: String,
    },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}
