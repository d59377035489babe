// Application layer - Use cases and the seams they depend on
pub mod activity_service;
pub mod dashboard_cache;
pub mod dashboard_service;
pub mod fitness_repository;
pub mod layout_gateway;
pub mod layout_service;
pub mod layout_sync;
