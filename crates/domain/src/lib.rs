pub mod entities;
pub mod error;
pub mod ids;

pub use entities::{
    ActivityType, AnswerOption, AnswerPayload, Quest, QuestStep, Question, QuestionType,
    StepCharacter,
};
pub use error::DomainError;
pub use ids::{QuestId, QuestStepId, QuestionId, StepLocalId};
