mod config;
mod http_client;

pub use config::ApiConfig;
pub use http_client::HttpQuestApi;
