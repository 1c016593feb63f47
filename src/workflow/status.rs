use std::fmt;

/// Where the workflow is. A single value, so a request of each kind can
/// never be in flight at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowStatus {
    /// Nothing stored yet.
    #[default]
    Idle,
    /// A store request is in flight.
    Uploading,
    /// A file is stored and questions may be asked.
    AwaitingQuestion,
    /// A query request is in flight.
    Asking,
}

impl WorkflowStatus {
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Uploading | Self::Asking)
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Uploading => "uploading",
            Self::AwaitingQuestion => "ready",
            Self::Asking => "asking",
        };
        f.write_str(label)
    }
}
