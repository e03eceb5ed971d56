pub mod application;

pub use application::editors::{QuestionWizard, StepEditor, StepMetadata, WizardStage};
pub use application::error::{AuthoringError, StepSaveFailure};
pub use application::services::{AuthoringService, EditingSession, SaveReport};
