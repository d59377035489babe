// Fitness dashboard service and layout sync client
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
