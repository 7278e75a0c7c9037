//! Pipeline error taxonomy.
//!
//! Two tiers: the variant keeps the precise cause for tests and logs, while
//! `user_message` collapses everything except an empty selection into one
//! generic retry prompt.

use thiserror::Error;

use crate::data::DataError;

/// Shown when the user has deselected every company.
pub const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one company.";

/// Shown for every other failure.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no company selected")]
    EmptySelection,

    #[error("unknown company: {0}")]
    UnknownCompany(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("price acquisition failed: {0}")]
    Acquisition(#[from] DataError),
}

impl PipelineError {
    /// Message for the error banner.
    pub fn user_message(&self) -> &'static str {
        match self {
            PipelineError::EmptySelection => EMPTY_SELECTION_MESSAGE,
            _ => GENERIC_ERROR_MESSAGE,
        }
    }

    pub fn is_empty_selection(&self) -> bool {
        matches!(self, PipelineError::EmptySelection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_empty_selection_has_its_own_message() {
        assert_eq!(
            PipelineError::EmptySelection.user_message(),
            EMPTY_SELECTION_MESSAGE
        );
        assert_eq!(
            PipelineError::Acquisition(DataError::RateLimited).user_message(),
            GENERIC_ERROR_MESSAGE
        );
        assert_eq!(
            PipelineError::UnknownCompany("ibm".into()).user_message(),
            GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn acquisition_keeps_cause() {
        let err: PipelineError = DataError::SymbolNotFound {
            symbol: "XYZ".into(),
        }
        .into();
        assert!(err.to_string().contains("XYZ"));
    }
}
