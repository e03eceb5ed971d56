mod answer;
mod quest;
mod quest_step;
mod question;

pub use answer::{detect_placeholders, AnswerOption, AnswerPayload};
pub use quest::Quest;
pub use quest_step::{QuestStep, StepCharacter};
pub use question::{ActivityType, Question, QuestionType};
