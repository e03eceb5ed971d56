//! Quest entity - the lesson being authored
//!
//! A quest is fetched once by id and never created here; the authoring
//! engine mutates it only by replacing entries in its step list. The quest
//! exclusively owns its steps, each step its questions; editors receive
//! copies and hand back whole replacement values.

use serde::{Deserialize, Serialize};

use crate::entities::QuestStep;
use crate::ids::{QuestId, QuestStepId, StepLocalId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: QuestId,
    pub name: String,
    pub description: String,
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub proficiencies: Vec<String>,
    pub steps: Vec<QuestStep>,
}

impl Quest {
    pub fn new(id: QuestId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            subject: None,
            grade: None,
            proficiencies: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Stable re-sort by sequence; run after every structural edit
    pub fn sort_steps(&mut self) {
        self.steps.sort_by_key(|s| s.sequence);
    }

    /// Default sequence for a step being created: max existing + 1
    pub fn next_sequence(&self) -> u32 {
        self.steps.iter().map(|s| s.sequence).max().unwrap_or(0) + 1
    }

    pub fn step(&self, local_id: StepLocalId) -> Option<&QuestStep> {
        self.steps.iter().find(|s| s.local_id == local_id)
    }

    pub fn step_mut(&mut self, local_id: StepLocalId) -> Option<&mut QuestStep> {
        self.steps.iter_mut().find(|s| s.local_id == local_id)
    }

    pub fn step_by_server_id_mut(&mut self, id: &QuestStepId) -> Option<&mut QuestStep> {
        self.steps
            .iter_mut()
            .find(|s| s.server_id.as_ref() == Some(id))
    }

    /// Drop a step from memory. Callers owning a persisted step must delete
    /// it on the server first.
    pub fn remove_step(&mut self, local_id: StepLocalId) -> Option<QuestStep> {
        let index = self.steps.iter().position(|s| s.local_id == local_id)?;
        Some(self.steps.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_sequence_starts_at_one() {
        let quest = Quest::new(QuestId::new("q1"), "Fractions");
        assert_eq!(quest.next_sequence(), 1);
    }

    #[test]
    fn test_next_sequence_is_max_plus_one() {
        let mut quest = Quest::new(QuestId::new("q1"), "Fractions");
        quest.steps.push(QuestStep::new("a", 3));
        quest.steps.push(QuestStep::new("b", 1));
        assert_eq!(quest.next_sequence(), 4);
    }

    #[test]
    fn test_sort_steps_by_sequence() {
        let mut quest = Quest::new(QuestId::new("q1"), "Fractions");
        quest.steps.push(QuestStep::new("b", 2));
        quest.steps.push(QuestStep::new("a", 1));
        quest.sort_steps();
        assert_eq!(quest.steps[0].title, "a");
        assert_eq!(quest.steps[1].title, "b");
    }

    #[test]
    fn test_remove_step() {
        let mut quest = Quest::new(QuestId::new("q1"), "Fractions");
        let step = QuestStep::new("a", 1);
        let local_id = step.local_id;
        quest.steps.push(step);
        assert!(quest.remove_step(local_id).is_some());
        assert!(quest.steps.is_empty());
        assert!(quest.remove_step(local_id).is_none());
    }
}
