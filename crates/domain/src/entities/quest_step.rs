//! QuestStep entity - one stage of a quest

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::Question;
use crate::ids::{QuestStepId, QuestionId, StepLocalId};

/// The character presenting a step (closed set of tags)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepCharacter {
    #[default]
    Narrator,
    Guide,
    Scientist,
    Explorer,
    Robot,
}

impl StepCharacter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Narrator => "Narrator",
            Self::Guide => "Guide",
            Self::Scientist => "Scientist",
            Self::Explorer => "Explorer",
            Self::Robot => "Robot",
        }
    }

    /// Tolerant parse; unknown tags fall back to the narrator
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Guide" => Self::Guide,
            "Scientist" => Self::Scientist,
            "Explorer" => Self::Explorer,
            "Robot" => Self::Robot,
            _ => Self::Narrator,
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Narrator,
            Self::Guide,
            Self::Scientist,
            Self::Explorer,
            Self::Robot,
        ]
    }
}

impl fmt::Display for StepCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stage of a quest: metadata plus an ordered list of questions
///
/// `local_id` identifies the draft in memory from the moment it exists;
/// `server_id` appears only after the persistence API has created the step.
/// `sequence` drives render and save order and is kept unique and gapless
/// by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestStep {
    pub local_id: StepLocalId,
    pub server_id: Option<QuestStepId>,
    pub title: String,
    /// Free-text category label
    pub step_type: String,
    /// 1-based position within the quest
    pub sequence: u32,
    pub is_active: bool,
    pub character: StepCharacter,
    pub suggestion: String,
    pub questions: Vec<Question>,
}

impl QuestStep {
    pub fn new(title: impl Into<String>, sequence: u32) -> Self {
        Self {
            local_id: StepLocalId::new(),
            server_id: None,
            title: title.into(),
            step_type: String::new(),
            sequence,
            is_active: true,
            character: StepCharacter::default(),
            suggestion: String::new(),
            questions: Vec::new(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.server_id.is_some()
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Replace the question with the same id, or append it.
    ///
    /// Sequences are rewritten 1..N afterwards so question order stays
    /// gapless.
    pub fn upsert_question(&mut self, question: Question) {
        match self.questions.iter_mut().find(|q| q.id == question.id) {
            Some(existing) => *existing = question,
            None => self.questions.push(question),
        }
        self.resequence_questions();
    }

    /// Rewrite question sequences as 1..N in current order
    pub fn resequence_questions(&mut self) {
        for (i, question) in self.questions.iter_mut().enumerate() {
            question.sequence = i as u32 + 1;
        }
    }
}
