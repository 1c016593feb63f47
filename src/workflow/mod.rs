//! The upload-then-query workflow.
//!
//! [`Controller`] owns the session state and sequences the two leaf
//! operations against a [`DocumentService`]. Each leaf is split into a
//! `begin_*` step that validates and hands out a ticket, and a `complete_*`
//! step that applies the service result. A ticket carries the generation it
//! was issued in; completions from an older generation are dropped, so a
//! response that arrives after a new file was picked (or after a reset or
//! cancel) can never overwrite newer state.
//!
//! [`Controller::upload`] and [`Controller::ask`] run both halves in one
//! await for callers that don't need to interleave anything.

mod error;
mod status;

pub use error::{ValidationError, WorkflowError};
pub use status::WorkflowStatus;

use tracing::{debug, info, warn};

use crate::service::{DocumentService, SelectedFile, ServiceError};

/// Whether a completion changed the controller's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The ticket belonged to an older generation and was ignored.
    Stale,
}

/// An upload in flight.
#[derive(Debug)]
pub struct UploadTicket {
    generation: u64,
    file: SelectedFile,
}

impl UploadTicket {
    pub fn file(&self) -> &SelectedFile {
        &self.file
    }
}

/// A question in flight.
#[derive(Debug)]
pub struct QueryTicket {
    generation: u64,
    file_ref: String,
    question: String,
}

impl QueryTicket {
    pub fn file_ref(&self) -> &str {
        &self.file_ref
    }

    pub fn question(&self) -> &str {
        &self.question
    }
}

#[derive(Debug, Default)]
pub struct Controller {
    selected: Option<SelectedFile>,
    stored: Option<String>,
    question: String,
    answer: Option<String>,
    error: Option<WorkflowError>,
    status: WorkflowStatus,
    generation: u64,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    // --- state ---

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// Identifier of the stored file, once an upload has succeeded.
    pub fn stored_file(&self) -> Option<&str> {
        self.stored.as_deref()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn error(&self) -> Option<WorkflowError> {
        self.error
    }

    /// The message to show the user, if the last attempt failed.
    pub fn error_message(&self) -> Option<String> {
        self.error.map(|e| e.to_string())
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn can_upload(&self) -> bool {
        !self.status.is_busy()
    }

    pub fn can_ask(&self) -> bool {
        self.stored.is_some() && !self.status.is_busy()
    }

    // --- events ---

    /// Pick a new file. Drops everything tied to the previous one, including
    /// any request still in flight.
    pub fn select_file(&mut self, file: SelectedFile) {
        debug!(name = %file.name, bytes = file.len(), "file selected");
        self.generation += 1;
        self.selected = Some(file);
        self.stored = None;
        self.answer = None;
        self.error = None;
        self.status = WorkflowStatus::Idle;
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    /// Forget the whole session.
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self {
            generation,
            ..Self::default()
        };
    }

    // --- upload leaf ---

    pub fn begin_upload(&mut self) -> Result<UploadTicket, WorkflowError> {
        let file = match &self.selected {
            Some(file) => file.clone(),
            None => return Err(self.fail(ValidationError::NoFileSelected.into())),
        };
        if self.status.is_busy() {
            return Err(self.fail(ValidationError::Busy.into()));
        }

        self.generation += 1;
        self.error = None;
        self.status = WorkflowStatus::Uploading;
        Ok(UploadTicket {
            generation: self.generation,
            file,
        })
    }

    pub fn complete_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<String, ServiceError>,
    ) -> Result<Completion, WorkflowError> {
        if ticket.generation != self.generation {
            debug!(name = %ticket.file.name, "ignoring stale upload completion");
            return Ok(Completion::Stale);
        }

        match result {
            Ok(file_ref) => {
                info!(name = %ticket.file.name, %file_ref, "file stored");
                self.stored = Some(file_ref);
                self.error = None;
                self.settle();
                Ok(Completion::Applied)
            }
            Err(e) => {
                warn!(error = %e, name = %ticket.file.name, "upload failed");
                self.settle();
                Err(self.fail(WorkflowError::UploadFailed))
            }
        }
    }

    pub async fn upload(&mut self, service: &dyn DocumentService) -> Result<(), WorkflowError> {
        let ticket = self.begin_upload()?;
        let result = service.store(&ticket.file).await;
        self.complete_upload(ticket, result).map(|_| ())
    }

    // --- query leaf ---

    pub fn begin_ask(&mut self) -> Result<QueryTicket, WorkflowError> {
        let file_ref = match &self.stored {
            Some(file_ref) => file_ref.clone(),
            None => return Err(self.fail(ValidationError::NoFileUploaded.into())),
        };
        if self.question.trim().is_empty() {
            return Err(self.fail(ValidationError::NoQuestion.into()));
        }
        if self.status.is_busy() {
            return Err(self.fail(ValidationError::Busy.into()));
        }

        self.generation += 1;
        self.error = None;
        self.status = WorkflowStatus::Asking;
        Ok(QueryTicket {
            generation: self.generation,
            file_ref,
            question: self.question.clone(),
        })
    }

    pub fn complete_ask(
        &mut self,
        ticket: QueryTicket,
        result: Result<String, ServiceError>,
    ) -> Result<Completion, WorkflowError> {
        if ticket.generation != self.generation {
            debug!(file_ref = %ticket.file_ref, "ignoring stale answer");
            return Ok(Completion::Stale);
        }

        match result {
            Ok(answer) => {
                info!(file_ref = %ticket.file_ref, "answer received");
                self.answer = Some(answer);
                self.error = None;
                self.settle();
                Ok(Completion::Applied)
            }
            Err(e) => {
                warn!(error = %e, file_ref = %ticket.file_ref, "query failed");
                self.settle();
                Err(self.fail(WorkflowError::QueryFailed))
            }
        }
    }

    pub async fn ask(&mut self, service: &dyn DocumentService) -> Result<(), WorkflowError> {
        let ticket = self.begin_ask()?;
        let result = service.query(&ticket.file_ref, &ticket.question).await;
        self.complete_ask(ticket, result).map(|_| ())
    }

    // --- cancellation ---

    /// Abandon an in-flight upload. Its result will be ignored if it ever arrives.
    pub fn cancel_upload(&mut self, ticket: UploadTicket) -> Completion {
        self.cancel(ticket.generation)
    }

    /// Abandon an in-flight question. Its result will be ignored if it ever arrives.
    pub fn cancel_ask(&mut self, ticket: QueryTicket) -> Completion {
        self.cancel(ticket.generation)
    }

    fn cancel(&mut self, generation: u64) -> Completion {
        if generation != self.generation {
            return Completion::Stale;
        }
        debug!("request cancelled");
        self.generation += 1;
        self.settle();
        Completion::Applied
    }

    /// Leave any in-flight status for the resting one implied by the data.
    fn settle(&mut self) {
        self.status = if self.stored.is_some() {
            WorkflowStatus::AwaitingQuestion
        } else {
            WorkflowStatus::Idle
        };
    }

    fn fail(&mut self, err: WorkflowError) -> WorkflowError {
        self.error = Some(err);
        err
    }
}
