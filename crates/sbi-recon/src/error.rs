use thiserror::Error;

/// Faults raised for malformed reconciliation input.
///
/// Missing data (a country without records, an empty intersection) is not
/// an error; it is reported through [`crate::IntersectionStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl ReconError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
