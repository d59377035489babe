// Domain layer - Core business models
pub mod dashboard;
pub mod default_layout;
pub mod fitness;
pub mod layout;
