pub mod outbound;

pub use outbound::{ApiError, QuestApiPort};

#[cfg(any(test, feature = "testing"))]
pub use outbound::MockQuestApiPort;
