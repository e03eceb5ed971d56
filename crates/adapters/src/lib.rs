pub mod infrastructure;

pub use infrastructure::{ApiConfig, HttpQuestApi};
