//! Quest API Port - outbound port for the persistence API
//!
//! Abstracts the REST backend that stores quests and their steps, so the
//! application layer never depends on a concrete HTTP client. The trait is
//! intentionally object-safe: services hold an `Arc<dyn QuestApiPort>`.

use async_trait::async_trait;
use thiserror::Error;

use lessonforge_domain::{QuestId, QuestStepId};
use lessonforge_protocol::{CreatedStepDto, QuestDto, StepPayload};

/// Errors crossing the persistence boundary
#[derive(Debug, Error, Clone)]
pub enum ApiError {
    /// Request never completed (connection refused, timeout, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Server answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Persistence operations the authoring engine requires.
///
/// Steps are the unit of persistence: a step's metadata and its contents
/// always travel together in one payload. Questions have no endpoints of
/// their own.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait QuestApiPort: Send + Sync {
    /// Fetch a quest with its persisted steps and contents
    async fn get_quest(&self, quest_id: &QuestId) -> Result<QuestDto, ApiError>;

    /// Create a step; the returned id becomes the draft's server id
    async fn create_step(&self, payload: StepPayload) -> Result<CreatedStepDto, ApiError>;

    /// Replace a persisted step's metadata and contents
    async fn update_step(&self, id: &QuestStepId, payload: StepPayload) -> Result<(), ApiError>;

    /// Delete a persisted step
    async fn delete_step(&self, id: &QuestStepId) -> Result<(), ApiError>;
}
