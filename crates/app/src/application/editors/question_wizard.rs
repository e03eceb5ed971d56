//! Question Editor - the step-gated authoring wizard
//!
//! A modal-scoped state machine walking the author through activity-type
//! choice, content configuration, and (for exercises) answer editing.
//! The wizard owns a draft copy of one question; nothing leaves it until
//! `save` emits the finished value, and dropping the wizard discards every
//! edit. Persistence is the orchestrator's job, triggered per step.

use lessonforge_domain::{ActivityType, DomainError, Question, QuestionType};

/// Observable wizard stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStage {
    /// Stage 1: exercise or informative content
    ChoosingActivityType,
    /// Stage 2: title, weight, image, question type
    ConfiguringContent,
    /// Stage 3: answer options (exercises only)
    EditingAnswers,
}

/// Wizard over one question draft
#[derive(Debug, Clone)]
pub struct QuestionWizard {
    stage: WizardStage,
    draft: Question,
}

impl QuestionWizard {
    /// Create mode: stage 1, exercise defaults (MultipleChoice, one blank
    /// option)
    pub fn for_new() -> Self {
        Self {
            stage: WizardStage::ChoosingActivityType,
            draft: Question::new_exercise(),
        }
    }

    /// Edit mode: opens directly at the type's terminal stage with every
    /// field pre-populated from the given copy
    pub fn for_existing(question: Question) -> Self {
        let stage = match question.activity_type {
            ActivityType::Informative => WizardStage::ConfiguringContent,
            ActivityType::Exercise => WizardStage::EditingAnswers,
        };
        Self {
            stage,
            draft: question,
        }
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn draft(&self) -> &Question {
        &self.draft
    }

    /// Terminal stage for the chosen activity: informative content has two
    /// stages, exercises have three
    pub fn terminal_stage(&self) -> WizardStage {
        match self.draft.activity_type {
            ActivityType::Informative => WizardStage::ConfiguringContent,
            ActivityType::Exercise => WizardStage::EditingAnswers,
        }
    }

    /// Pick the activity type. Only available on stage 1; the choice is
    /// sticky for the rest of the session once the author moves on.
    pub fn choose_activity(&mut self, activity_type: ActivityType) -> Result<(), DomainError> {
        if self.stage != WizardStage::ChoosingActivityType {
            return Err(DomainError::InvalidStateTransition(
                "activity type can only be chosen on the first stage".to_string(),
            ));
        }
        if self.draft.activity_type == activity_type {
            return Ok(());
        }
        self.draft.activity_type = activity_type;
        match activity_type {
            ActivityType::Informative => {
                self.draft.set_question_type(QuestionType::AlwaysCorrect);
            }
            ActivityType::Exercise => {
                self.draft.set_question_type(QuestionType::MultipleChoice);
            }
        }
        Ok(())
    }

    /// Switch the exercise's question type, discarding the previous type's
    /// answer state
    pub fn set_question_type(&mut self, question_type: QuestionType) -> Result<(), DomainError> {
        if self.draft.activity_type != ActivityType::Exercise {
            return Err(DomainError::InvalidStateTransition(
                "informative content has no question type".to_string(),
            ));
        }
        self.draft.set_question_type(question_type);
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_weight(&mut self, weight: u32) {
        self.draft.weight = weight;
    }

    pub fn set_image(&mut self, image: Option<String>) {
        self.draft.image = image;
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.draft.is_active = is_active;
    }

    /// Whether `next` (or `save` on the terminal stage) is allowed
    pub fn can_proceed(&self) -> bool {
        match self.stage {
            WizardStage::ChoosingActivityType => true,
            WizardStage::ConfiguringContent | WizardStage::EditingAnswers => {
                !self.draft.title.trim().is_empty()
            }
        }
    }

    /// Advance one stage; gated by [`Self::can_proceed`]
    pub fn next(&mut self) -> Result<(), DomainError> {
        if self.stage == self.terminal_stage() {
            return Err(DomainError::InvalidStateTransition(
                "already on the final stage".to_string(),
            ));
        }
        if !self.can_proceed() {
            return Err(DomainError::validation("Question title is required"));
        }
        self.stage = match self.stage {
            WizardStage::ChoosingActivityType => WizardStage::ConfiguringContent,
            WizardStage::ConfiguringContent | WizardStage::EditingAnswers => {
                WizardStage::EditingAnswers
            }
        };
        Ok(())
    }

    /// Go back one stage; unavailable on stage 1
    pub fn back(&mut self) -> Result<(), DomainError> {
        self.stage = match self.stage {
            WizardStage::ChoosingActivityType => {
                return Err(DomainError::InvalidStateTransition(
                    "already on the first stage".to_string(),
                ))
            }
            WizardStage::ConfiguringContent => WizardStage::ChoosingActivityType,
            WizardStage::EditingAnswers => WizardStage::ConfiguringContent,
        };
        Ok(())
    }

    /// Emit the finished question value.
    ///
    /// Guarded against non-terminal invocation and an empty title; on
    /// failure the wizard stays open with its draft intact.
    pub fn save(&self) -> Result<Question, DomainError> {
        if self.stage != self.terminal_stage() {
            return Err(DomainError::InvalidStateTransition(
                "save is only available on the final stage".to_string(),
            ));
        }
        if self.draft.title.trim().is_empty() {
            return Err(DomainError::validation("Question title is required"));
        }
        Ok(self.draft.clone())
    }

    // Answer editing, delegated to the draft's payload so every entry point
    // shares the same per-type rules.

    pub fn add_option(&mut self) -> Result<(), DomainError> {
        self.draft.payload.add_option()
    }

    pub fn remove_option(&mut self, index: usize) -> Result<(), DomainError> {
        self.draft.payload.remove_option(index)
    }

    pub fn set_option_text(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.draft.payload.set_option_text(index, text)
    }

    pub fn mark_correct(&mut self, index: usize) -> Result<(), DomainError> {
        self.draft.payload.mark_correct(index)
    }

    pub fn add_ordering_item(&mut self, text: impl Into<String>) -> Result<(), DomainError> {
        self.draft.payload.add_ordering_item(text)
    }

    pub fn move_item_up(&mut self, index: usize) -> Result<(), DomainError> {
        self.draft.payload.move_item_up(index)
    }

    pub fn move_item_down(&mut self, index: usize) -> Result<(), DomainError> {
        self.draft.payload.move_item_down(index)
    }

    pub fn set_answer(&mut self, index: usize, text: impl Into<String>) -> Result<(), DomainError> {
        self.draft.payload.set_answer(index, text)
    }

    /// Re-scan the statement text for `{N}` placeholders and resize the
    /// ColumnFill answers accordingly. Explicitly author-triggered.
    pub fn sync_placeholders(&mut self) -> Result<(), DomainError> {
        let template = self.draft.title.clone();
        self.draft.payload.sync_placeholders(&template)
    }

    pub fn add_match_left(&mut self, text: impl Into<String>) -> Result<(), DomainError> {
        self.draft.payload.add_match_left(text)
    }

    pub fn add_match_right(&mut self, text: impl Into<String>) -> Result<(), DomainError> {
        self.draft.payload.add_match_right(text)
    }

    pub fn cycle_match(&mut self, left_index: usize) -> Result<(), DomainError> {
        self.draft.payload.cycle_match(left_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lessonforge_domain::AnswerPayload;

    #[test]
    fn test_create_mode_starts_on_stage_one_with_defaults() {
        let wizard = QuestionWizard::for_new();
        assert_eq!(wizard.stage(), WizardStage::ChoosingActivityType);
        assert_eq!(wizard.draft().activity_type, ActivityType::Exercise);
        assert_eq!(wizard.draft().question_type(), QuestionType::MultipleChoice);
        assert_eq!(wizard.draft().payload.options().map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_edit_mode_opens_at_terminal_stage() {
        let exercise = QuestionWizard::for_existing(Question::new_exercise().with_title("q"));
        assert_eq!(exercise.stage(), WizardStage::EditingAnswers);

        let informative =
            QuestionWizard::for_existing(Question::new_informative().with_title("q"));
        assert_eq!(informative.stage(), WizardStage::ConfiguringContent);
    }

    #[test]
    fn test_next_gated_by_title() {
        let mut wizard = QuestionWizard::for_new();
        wizard.next().unwrap();
        assert_eq!(wizard.stage(), WizardStage::ConfiguringContent);
        assert!(matches!(wizard.next(), Err(DomainError::Validation(_))));
        wizard.set_title("What is 2 + 2?");
        wizard.next().unwrap();
        assert_eq!(wizard.stage(), WizardStage::EditingAnswers);
    }

    #[test]
    fn test_next_refuses_past_terminal() {
        let mut wizard = QuestionWizard::for_existing(Question::new_exercise().with_title("q"));
        assert!(matches!(
            wizard.next(),
            Err(DomainError::InvalidStateTransition(_))
        ));
    }

    #[test]
    fn test_back_unavailable_on_stage_one() {
        let mut wizard = QuestionWizard::for_new();
        assert!(matches!(
            wizard.back(),
            Err(DomainError::InvalidStateTransition(_))
        ));
        wizard.next().unwrap();
        wizard.back().unwrap();
        assert_eq!(wizard.stage(), WizardStage::ChoosingActivityType);
    }

    #[test]
    fn test_informative_terminal_is_stage_two() {
        let mut wizard = QuestionWizard::for_new();
        wizard.choose_activity(ActivityType::Informative).unwrap();
        assert_eq!(wizard.draft().question_type(), QuestionType::AlwaysCorrect);
        wizard.next().unwrap();
        wizard.set_title("Read this first");
        // Stage 2 is terminal for informative content: no next, save works.
        assert!(wizard.next().is_err());
        let question = wizard.save().unwrap();
        assert_eq!(question.activity_type, ActivityType::Informative);
    }

    #[test]
    fn test_activity_choice_sticky_after_stage_one() {
        let mut wizard = QuestionWizard::for_new();
        wizard.next().unwrap();
        assert!(matches!(
            wizard.choose_activity(ActivityType::Informative),
            Err(DomainError::InvalidStateTransition(_))
        ));
    }

    #[test]
    fn test_save_guarded_on_non_terminal_stage() {
        let mut wizard = QuestionWizard::for_new();
        wizard.set_title("q");
        assert!(matches!(
            wizard.save(),
            Err(DomainError::InvalidStateTransition(_))
        ));
    }

    #[test]
    fn test_save_requires_title() {
        let wizard = QuestionWizard::for_existing(Question::new_exercise());
        assert!(matches!(wizard.save(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_save_emits_value_and_keeps_id() {
        let question = Question::new_exercise().with_title("original");
        let id = question.id;
        let mut wizard = QuestionWizard::for_existing(question);
        wizard.set_title("edited");
        let saved = wizard.save().unwrap();
        assert_eq!(saved.id, id);
        assert_eq!(saved.title, "edited");
    }

    #[test]
    fn test_switching_question_type_discards_answer_state() {
        let mut wizard = QuestionWizard::for_existing(Question::new_exercise().with_title("q"));
        wizard.mark_correct(0).unwrap();
        wizard.set_question_type(QuestionType::MatchTwoRows).unwrap();
        assert!(matches!(
            wizard.draft().payload,
            AnswerPayload::MatchTwoRows { .. }
        ));
        wizard.set_question_type(QuestionType::MultipleChoice).unwrap();
        assert!(!wizard.draft().payload.options().unwrap()
            .first()
            .is_some_and(|o| o.is_correct));
    }

    #[test]
    fn test_placeholder_sync_uses_statement_text() {
        let mut wizard = QuestionWizard::for_existing(Question::new_exercise().with_title("q"));
        wizard.set_question_type(QuestionType::ColumnFill).unwrap();
        wizard.set_title("A {0} B {2}");
        wizard.sync_placeholders().unwrap();
        match &wizard.draft().payload {
            AnswerPayload::ColumnFill { answers } => assert_eq!(answers.len(), 3),
            other => panic!("expected ColumnFill, got {other:?}"),
        }
    }
}
