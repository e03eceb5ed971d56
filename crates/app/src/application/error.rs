//! Application layer error types
//!
//! Every persistence failure is caught at the call site and converted into
//! a variant naming the operation that failed; nothing propagates as an
//! unhandled error. In-memory state is left untouched when the network call
//! behind an operation fails.

use thiserror::Error;

use lessonforge_domain::DomainError;
use lessonforge_ports::ApiError;

/// One step that failed during a bulk lesson save
#[derive(Debug, Clone)]
pub struct StepSaveFailure {
    pub step_title: String,
    pub error: ApiError,
}

/// Errors surfaced by the authoring orchestrator
#[derive(Debug, Error, Clone)]
pub enum AuthoringError {
    /// No quest has been loaded yet
    #[error("No lesson is loaded")]
    NotLoaded,

    /// The referenced step is not in the in-memory quest
    #[error("Unknown step")]
    UnknownStep,

    /// Loading the quest failed
    #[error("Failed to load lesson: {source}")]
    Load { source: ApiError },

    /// Creating or updating a step failed
    #[error("Failed to save step: {source}")]
    SaveStep { source: ApiError },

    /// Deleting a step failed
    #[error("Failed to delete step: {source}")]
    DeleteStep { source: ApiError },

    /// Questions can only be added to a step the server knows about
    #[error("Save the step before adding questions to it")]
    StepNotSaved,

    /// Bulk save refuses to run on an empty step list
    #[error("There are no steps to save")]
    NothingToSave,

    /// Bulk save completed with per-step failures; successful steps are
    /// kept (there is no rollback)
    #[error("Failed to save lesson: {} of {total} step(s) failed", .failures.len())]
    BulkSave {
        failures: Vec<StepSaveFailure>,
        total: usize,
    },

    /// An editing rule was violated
    #[error(transparent)]
    Validation(#[from] DomainError),
}
