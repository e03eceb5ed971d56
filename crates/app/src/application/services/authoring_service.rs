//! Authoring Service - orchestrator of the in-memory quest tree
//!
//! Owns the loaded quest exclusively. Editors receive copies of one node
//! and hand back whole replacement values; all structural merges happen
//! here, and the in-memory tree only changes after the corresponding
//! persistence call has succeeded (no optimistic updates).

use std::sync::Arc;

use futures_util::future;

use lessonforge_domain::{
    Quest, QuestId, QuestStep, QuestStepId, Question, QuestionId, StepLocalId,
};
use lessonforge_protocol::codec;
use lessonforge_ports::{ApiError, QuestApiPort};

use crate::application::editors::{QuestionWizard, StepEditor, StepMetadata};
use crate::application::error::{AuthoringError, StepSaveFailure};

/// An open question-editing session.
///
/// Carries the persisted step the finished question belongs to, so the
/// "questions only on saved steps" precondition is part of the value rather
/// than ambient state.
#[derive(Debug)]
pub struct EditingSession {
    pub target_step_id: QuestStepId,
    pub wizard: QuestionWizard,
}

/// Outcome of a successful bulk lesson save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveReport {
    pub created: usize,
    pub updated: usize,
}

/// Orchestrates loading, editing and persisting one quest
pub struct AuthoringService {
    api: Arc<dyn QuestApiPort>,
    quest: Option<Quest>,
}

impl AuthoringService {
    pub fn new(api: Arc<dyn QuestApiPort>) -> Self {
        Self { api, quest: None }
    }

    /// The in-memory quest, if one has been loaded
    pub fn quest(&self) -> Option<&Quest> {
        self.quest.as_ref()
    }

    fn quest_ref(&self) -> Result<&Quest, AuthoringError> {
        self.quest.as_ref().ok_or(AuthoringError::NotLoaded)
    }

    fn quest_mut(&mut self) -> Result<&mut Quest, AuthoringError> {
        self.quest.as_mut().ok_or(AuthoringError::NotLoaded)
    }

    /// Fetch the quest and decode it into draft models.
    ///
    /// A quest with no persisted steps loads as an empty list; malformed
    /// content payloads decode to safe defaults instead of failing.
    pub async fn load(&mut self, quest_id: &QuestId) -> Result<(), AuthoringError> {
        let dto = self
            .api
            .get_quest(quest_id)
            .await
            .map_err(|source| AuthoringError::Load { source })?;
        let quest = codec::decode_quest(dto);
        tracing::info!(quest = %quest.id, steps = quest.steps.len(), "lesson loaded");
        self.quest = Some(quest);
        Ok(())
    }

    /// Open the step editor: prefilled from the step, or at the next free
    /// sequence number in create mode
    pub fn step_editor_for(
        &self,
        target: Option<StepLocalId>,
    ) -> Result<StepEditor, AuthoringError> {
        let quest = self.quest_ref()?;
        match target {
            None => Ok(StepEditor::for_new(quest.next_sequence())),
            Some(local_id) => quest
                .step(local_id)
                .map(StepEditor::for_existing)
                .ok_or(AuthoringError::UnknownStep),
        }
    }

    /// Persist a step editor result.
    ///
    /// A step that already has a server id gets exactly one update call;
    /// its question list rides along unchanged (metadata edits never touch
    /// content). A step without one gets exactly one create call and adopts
    /// the returned id. The in-memory list is updated only on success and
    /// re-sorted by sequence.
    pub async fn save_step(
        &mut self,
        target: Option<StepLocalId>,
        metadata: StepMetadata,
    ) -> Result<StepLocalId, AuthoringError> {
        let quest = self.quest_ref()?;
        let quest_id = quest.id.clone();

        let mut candidate = match target {
            Some(local_id) => quest
                .step(local_id)
                .cloned()
                .ok_or(AuthoringError::UnknownStep)?,
            None => QuestStep::new("", metadata.sequence),
        };
        metadata.apply_to(&mut candidate);

        match candidate.server_id.clone() {
            Some(server_id) => {
                let payload = codec::encode_step_payload(&candidate, None);
                self.api
                    .update_step(&server_id, payload)
                    .await
                    .map_err(|source| AuthoringError::SaveStep { source })?;
                tracing::debug!(step = %server_id, "step updated");
            }
            None => {
                let payload = codec::encode_step_payload(&candidate, Some(&quest_id));
                let created = self
                    .api
                    .create_step(payload)
                    .await
                    .map_err(|source| AuthoringError::SaveStep { source })?;
                candidate.server_id = Some(QuestStepId::new(created.id));
            }
        }

        let local_id = candidate.local_id;
        let quest = self.quest_mut()?;
        match quest.step_mut(local_id) {
            Some(existing) => *existing = candidate,
            None => quest.steps.push(candidate),
        }
        quest.sort_steps();
        Ok(local_id)
    }

    /// Insert a step draft without contacting the server.
    ///
    /// The draft has no server id; the next bulk lesson save creates it.
    pub fn insert_step_draft(&mut self, metadata: StepMetadata) -> Result<StepLocalId, AuthoringError> {
        let quest = self.quest_mut()?;
        let mut step = QuestStep::new("", metadata.sequence);
        metadata.apply_to(&mut step);
        let local_id = step.local_id;
        quest.steps.push(step);
        quest.sort_steps();
        Ok(local_id)
    }

    /// Remove a step. The caller must have confirmed with the user first.
    ///
    /// A draft that was never persisted is dropped from memory with no
    /// network call; a persisted step is deleted on the server first and
    /// removed locally only on success.
    pub async fn remove_step(&mut self, target: StepLocalId) -> Result<(), AuthoringError> {
        let step = self
            .quest_ref()?
            .step(target)
            .ok_or(AuthoringError::UnknownStep)?;
        if let Some(server_id) = step.server_id.clone() {
            self.api
                .delete_step(&server_id)
                .await
                .map_err(|source| AuthoringError::DeleteStep { source })?;
            tracing::debug!(step = %server_id, "step deleted");
        }
        self.quest_mut()?.remove_step(target);
        Ok(())
    }

    /// Open the question wizard against one step.
    ///
    /// Hard precondition: the step must already be persisted. Violations
    /// fail synchronously without opening an editor or touching the
    /// network.
    pub fn begin_question_edit(
        &self,
        target: StepLocalId,
        question_id: Option<QuestionId>,
    ) -> Result<EditingSession, AuthoringError> {
        let step = self
            .quest_ref()?
            .step(target)
            .ok_or(AuthoringError::UnknownStep)?;
        let target_step_id = step.server_id.clone().ok_or(AuthoringError::StepNotSaved)?;
        let wizard = match question_id.and_then(|id| step.question(id)) {
            Some(question) => QuestionWizard::for_existing(question.clone()),
            None => QuestionWizard::for_new(),
        };
        Ok(EditingSession {
            target_step_id,
            wizard,
        })
    }

    /// Merge a finished question back into its step.
    ///
    /// Replaces by question id or appends, then re-sequences 1..N. Nothing
    /// is persisted here; questions reach the server with the next save of
    /// their step.
    pub fn apply_question_save(
        &mut self,
        target_step_id: &QuestStepId,
        question: Question,
    ) -> Result<(), AuthoringError> {
        let step = self
            .quest_mut()?
            .step_by_server_id_mut(target_step_id)
            .ok_or(AuthoringError::UnknownStep)?;
        step.upsert_question(question);
        Ok(())
    }

    /// Persist every step of the lesson, concurrently.
    ///
    /// One update per persisted step, one create per draft, all dispatched
    /// together and awaited together. Steps created successfully adopt
    /// their server ids even when other steps fail; failures are reported
    /// per step in the aggregate error. Refuses to run on an empty list.
    pub async fn save_lesson(&mut self) -> Result<SaveReport, AuthoringError> {
        let quest = self.quest_ref()?;
        if quest.steps.is_empty() {
            return Err(AuthoringError::NothingToSave);
        }
        let total = quest.steps.len();
        let quest_id = quest.id.clone();

        let jobs: Vec<_> = quest
            .steps
            .iter()
            .map(|step| {
                let api = Arc::clone(&self.api);
                let local_id = step.local_id;
                let step_title = step.title.clone();
                let server_id = step.server_id.clone();
                let payload = match server_id {
                    Some(_) => codec::encode_step_payload(step, None),
                    None => codec::encode_step_payload(step, Some(&quest_id)),
                };
                async move {
                    let outcome: Result<Option<QuestStepId>, ApiError> = match &server_id {
                        Some(id) => api.update_step(id, payload).await.map(|()| None),
                        None => api
                            .create_step(payload)
                            .await
                            .map(|created| Some(QuestStepId::new(created.id))),
                    };
                    (local_id, step_title, outcome)
                }
            })
            .collect();

        let results = future::join_all(jobs).await;

        let mut report = SaveReport::default();
        let mut failures = Vec::new();
        for (local_id, step_title, outcome) in results {
            match outcome {
                Ok(Some(new_id)) => {
                    if let Some(step) = self.quest_mut()?.step_mut(local_id) {
                        step.server_id = Some(new_id);
                    }
                    report.created += 1;
                }
                Ok(None) => report.updated += 1,
                Err(error) => {
                    tracing::warn!(step = %step_title, %error, "step save failed");
                    failures.push(StepSaveFailure { step_title, error });
                }
            }
        }

        if failures.is_empty() {
            tracing::info!(
                created = report.created,
                updated = report.updated,
                "lesson saved"
            );
            Ok(report)
        } else {
            Err(AuthoringError::BulkSave { failures, total })
        }
    }
}
