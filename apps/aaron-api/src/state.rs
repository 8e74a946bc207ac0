use std::sync::Arc;

use aaron_service::AaronService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<AaronService>,
}
impl AppState {
	pub fn new(config: aaron_config::Config) -> Self {
		Self { service: Arc::new(AaronService::new(config)) }
	}
}
