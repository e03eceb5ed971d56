//! Lessonforge Runner - composition root binary
//!
//! Wires the HTTP adapter into the authoring service, loads one quest and
//! logs a summary. The editors live in `lessonforge-app`; the UI embedding
//! them is a separate application.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lessonforge_adapters::{ApiConfig, HttpQuestApi};
use lessonforge_app::AuthoringService;
use lessonforge_domain::QuestId;
use lessonforge_ports::QuestApiPort;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lessonforge=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;
    tracing::info!(base_url = %config.base_url, "configuration loaded");

    let quest_id = std::env::args()
        .nth(1)
        .context("usage: lessonforge <quest-id>")?;

    let api: Arc<dyn QuestApiPort> = Arc::new(HttpQuestApi::new(&config));
    let mut service = AuthoringService::new(api);
    service.load(&QuestId::new(quest_id)).await?;

    if let Some(quest) = service.quest() {
        tracing::info!(name = %quest.name, steps = quest.steps.len(), "quest loaded");
        for step in &quest.steps {
            tracing::info!(
                sequence = step.sequence,
                title = %step.title,
                questions = step.questions.len(),
                persisted = step.is_persisted(),
                "step"
            );
        }
    }

    Ok(())
}
