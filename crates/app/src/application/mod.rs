pub mod editors;
pub mod error;
pub mod services;
