//! User-facing workflow errors. `Display` is exactly what the user sees.

use thiserror::Error;

/// A precondition failed locally. Never results in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a file to upload.")]
    NoFileSelected,

    #[error("Please upload a file first.")]
    NoFileUploaded,

    #[error("Please enter a question.")]
    NoQuestion,

    #[error("Please wait for the current request to finish.")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store request failed. The cause is logged, not shown.
    #[error("Failed to upload file. Please try again.")]
    UploadFailed,

    /// The query request failed. The cause is logged, not shown.
    #[error("Failed to get the answer. Please try again.")]
    QueryFailed,
}

impl WorkflowError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
