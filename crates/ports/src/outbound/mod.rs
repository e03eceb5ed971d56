mod quest_api_port;

pub use quest_api_port::{ApiError, QuestApiPort};

#[cfg(any(test, feature = "testing"))]
pub use quest_api_port::MockQuestApiPort;
