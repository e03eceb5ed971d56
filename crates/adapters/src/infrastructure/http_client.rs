//! HTTP client for the quest persistence API

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

use lessonforge_domain::{QuestId, QuestStepId};
use lessonforge_ports::{ApiError, QuestApiPort};
use lessonforge_protocol::{CreatedStepDto, QuestDto, StepPayload};

use crate::infrastructure::ApiConfig;

/// REST implementation of [`QuestApiPort`]
#[derive(Clone)]
pub struct HttpQuestApi {
    client: Client,
    base_url: String,
}

impl HttpQuestApi {
    pub fn new(config: &ApiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    fn quest_url(&self, quest_id: &QuestId) -> String {
        format!("{}/quests/{}", self.base_url, quest_id)
    }

    fn step_url(&self, id: &QuestStepId) -> String {
        format!("{}/quest-steps/{}", self.base_url, id)
    }

    fn steps_url(&self) -> String {
        format!("{}/quest-steps", self.base_url)
    }

    /// Map non-success statuses to `ApiError::Status`, carrying whatever
    /// message body the server sent
    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

#[async_trait]
impl QuestApiPort for HttpQuestApi {
    async fn get_quest(&self, quest_id: &QuestId) -> Result<QuestDto, ApiError> {
        tracing::debug!(quest = %quest_id, "fetching quest");
        let response = self
            .client
            .get(self.quest_url(quest_id))
            .send()
            .await
            .map_err(transport)?;
        Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn create_step(&self, payload: StepPayload) -> Result<CreatedStepDto, ApiError> {
        tracing::debug!(step = %payload.name, "creating quest step");
        let response = self
            .client
            .post(self.steps_url())
            .json(&payload)
            .send()
            .await
            .map_err(transport)?;
        Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn update_step(&self, id: &QuestStepId, payload: StepPayload) -> Result<(), ApiError> {
        tracing::debug!(step = %id, "updating quest step");
        let response = self
            .client
            .put(self.step_url(id))
            .json(&payload)
            .send()
            .await
            .map_err(transport)?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn delete_step(&self, id: &QuestStepId) -> Result<(), ApiError> {
        tracing::debug!(step = %id, "deleting quest step");
        let response = self
            .client
            .delete(self.step_url(id))
            .send()
            .await
            .map_err(transport)?;
        match response.status() {
            // Deleting something already gone is not an error worth surfacing.
            StatusCode::NOT_FOUND => Ok(()),
            _ => Self::check_status(response).await.map(|_| ()),
        }
    }
}
