mod question_wizard;
mod step_editor;

pub use question_wizard::{QuestionWizard, WizardStage};
pub use step_editor::{StepEditor, StepMetadata};
