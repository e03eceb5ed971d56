//! Question entity - one assessable or informative unit inside a step

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::AnswerPayload;
use crate::ids::QuestionId;

/// Whether a content item is scored or purely informative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityType {
    #[default]
    Exercise,
    Informative,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exercise => "Exercise",
            Self::Informative => "Informative",
        }
    }

    /// Tolerant parse; unknown tags fall back to Exercise
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Informative" => Self::Informative,
            _ => Self::Exercise,
        }
    }
}

/// The seven answer shapes plus the informative sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionType {
    MultipleChoice,
    SingleChoice,
    TrueOrFalse,
    Dissertative,
    Ordering,
    ColumnFill,
    MatchTwoRows,
    /// Sentinel for informative content; scores as correct unconditionally
    AlwaysCorrect,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "MultipleChoice",
            Self::SingleChoice => "SingleChoice",
            Self::TrueOrFalse => "TrueOrFalse",
            Self::Dissertative => "Dissertative",
            Self::Ordering => "Ordering",
            Self::ColumnFill => "ColumnFill",
            Self::MatchTwoRows => "MatchTwoRows",
            Self::AlwaysCorrect => "AlwaysCorrect",
        }
    }

    /// Parse a wire tag. Returns None for unknown tags so the caller can
    /// pick a safe default instead of failing the decode.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "MultipleChoice" => Self::MultipleChoice,
            "SingleChoice" => Self::SingleChoice,
            "TrueOrFalse" => Self::TrueOrFalse,
            "Dissertative" => Self::Dissertative,
            "Ordering" => Self::Ordering,
            "ColumnFill" => Self::ColumnFill,
            "MatchTwoRows" => Self::MatchTwoRows,
            "AlwaysCorrect" => Self::AlwaysCorrect,
            _ => return None,
        })
    }

    /// Types selectable when authoring an exercise
    pub fn exercise_types() -> &'static [Self] {
        &[
            Self::MultipleChoice,
            Self::SingleChoice,
            Self::TrueOrFalse,
            Self::Dissertative,
            Self::Ordering,
            Self::ColumnFill,
            Self::MatchTwoRows,
        ]
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One content item of a quest step
///
/// `title` is the statement shown to the learner (for ColumnFill it doubles
/// as the placeholder template). The payload carries everything the
/// question's type needs and nothing from any other type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub activity_type: ActivityType,
    /// 1-based position within the owning step
    pub sequence: u32,
    /// Score contribution; meaningless for informative content
    pub weight: u32,
    pub is_active: bool,
    pub title: String,
    pub image: Option<String>,
    pub payload: AnswerPayload,
}

impl Question {
    /// Fresh exercise draft: MultipleChoice with one blank option
    pub fn new_exercise() -> Self {
        Self {
            id: QuestionId::new(),
            activity_type: ActivityType::Exercise,
            sequence: 0,
            weight: 1,
            is_active: true,
            title: String::new(),
            image: None,
            payload: AnswerPayload::default_for(QuestionType::MultipleChoice),
        }
    }

    /// Fresh informative draft
    pub fn new_informative() -> Self {
        Self {
            activity_type: ActivityType::Informative,
            payload: AnswerPayload::AlwaysCorrect,
            ..Self::new_exercise()
        }
    }

    pub fn question_type(&self) -> QuestionType {
        self.payload.question_type()
    }

    /// Swap the payload for another type's empty scaffold.
    ///
    /// Switching types intentionally discards the previous type's state; a
    /// persisted question must never carry another type's fields.
    pub fn set_question_type(&mut self, question_type: QuestionType) {
        if self.question_type() != question_type {
            self.payload = AnswerPayload::default_for(question_type);
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_exercise_defaults() {
        let question = Question::new_exercise();
        assert_eq!(question.activity_type, ActivityType::Exercise);
        assert_eq!(question.question_type(), QuestionType::MultipleChoice);
        assert_eq!(question.payload.options().map(<[_]>::len), Some(1));
        assert!(question.is_active);
    }

    #[test]
    fn test_set_question_type_replaces_payload() {
        let mut question = Question::new_exercise();
        question.payload.mark_correct(0).unwrap();
        question.set_question_type(QuestionType::Ordering);
        assert_eq!(question.question_type(), QuestionType::Ordering);
        assert!(question.payload.options().is_none());
    }

    #[test]
    fn test_set_question_type_same_type_keeps_payload() {
        let mut question = Question::new_exercise();
        question.payload.mark_correct(0).unwrap();
        question.set_question_type(QuestionType::MultipleChoice);
        assert!(question.payload.options().unwrap()[0].is_correct);
    }

    #[test]
    fn test_unknown_wire_tag_is_none() {
        assert_eq!(QuestionType::from_tag("Essay"), None);
        assert_eq!(
            QuestionType::from_tag("MatchTwoRows"),
            Some(QuestionType::MatchTwoRows)
        );
    }
}
