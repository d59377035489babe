// Application state for HTTP handlers
use crate::application::activity_service::ActivityService;
use crate::application::dashboard_service::DashboardService;
use crate::application::fitness_repository::FitnessRepository;
use crate::application::layout_service::LayoutService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub activity_service: ActivityService,
    pub layout_service: LayoutService,
}

impl AppState {
    pub fn new(repository: Arc<dyn FitnessRepository>) -> Arc<Self> {
        Arc::new(Self {
            dashboard_service: DashboardService::new(repository.clone()),
            activity_service: ActivityService::new(repository.clone()),
            layout_service: LayoutService::new(repository),
        })
    }
}
