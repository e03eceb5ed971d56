mod authoring_service;

pub use authoring_service::{AuthoringService, EditingSession, SaveReport};
