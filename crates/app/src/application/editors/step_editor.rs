//! Step Editor - single-stage form over step metadata
//!
//! Edits metadata only; the questions of a step are never visible here and
//! are merged back untouched by the orchestrator. The editor works on a
//! copy and emits a whole [`StepMetadata`] value on save.

use lessonforge_domain::{DomainError, QuestStep, StepCharacter, StepLocalId};

/// The metadata slice of a step, as emitted by the editor
#[derive(Debug, Clone, PartialEq)]
pub struct StepMetadata {
    pub title: String,
    /// Free-text category label
    pub step_type: String,
    pub sequence: u32,
    pub is_active: bool,
    pub character: StepCharacter,
    pub suggestion: String,
}

impl StepMetadata {
    /// Copy this metadata onto a step, leaving its questions alone
    pub fn apply_to(&self, step: &mut QuestStep) {
        step.title = self.title.clone();
        step.step_type = self.step_type.clone();
        step.sequence = self.sequence;
        step.is_active = self.is_active;
        step.character = self.character;
        step.suggestion = self.suggestion.clone();
    }
}

/// Modal form model for creating or editing one step's metadata
#[derive(Debug, Clone)]
pub struct StepEditor {
    target: Option<StepLocalId>,
    pub metadata: StepMetadata,
}

impl StepEditor {
    /// Create mode; `next_sequence` is "max existing sequence + 1"
    pub fn for_new(next_sequence: u32) -> Self {
        Self {
            target: None,
            metadata: StepMetadata {
                title: String::new(),
                step_type: String::new(),
                sequence: next_sequence,
                is_active: true,
                character: StepCharacter::default(),
                suggestion: String::new(),
            },
        }
    }

    /// Edit mode, prefilled from a copy of the step
    pub fn for_existing(step: &QuestStep) -> Self {
        Self {
            target: Some(step.local_id),
            metadata: StepMetadata {
                title: step.title.clone(),
                step_type: step.step_type.clone(),
                sequence: step.sequence,
                is_active: step.is_active,
                character: step.character,
                suggestion: step.suggestion.clone(),
            },
        }
    }

    /// The step being edited; None in create mode
    pub fn target(&self) -> Option<StepLocalId> {
        self.target
    }

    /// Validate and emit the metadata value. Failure keeps the editor open.
    pub fn save(&self) -> Result<StepMetadata, DomainError> {
        if self.metadata.title.trim().is_empty() {
            return Err(DomainError::validation("Step title is required"));
        }
        Ok(self.metadata.clone())
    }
}
