pub mod agent;
pub mod context;
pub mod conversations;
pub mod events;
pub mod flush;
pub mod pipeline;
pub mod task_queue;
pub mod tasks;

mod error;

pub use error::{Error, Result};
pub use events::EventHub;

use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::RwLock;

use aaron_config::Config;
use aaron_storage::MemStorage;

/// Owns every piece of server state. Handlers receive it through injected app state.
pub struct AaronService {
	pub cfg: Config,
	pub(crate) storage: Arc<RwLock<MemStorage>>,
	pub events: EventHub,
}
impl AaronService {
	pub fn new(cfg: Config) -> Self {
		let storage = MemStorage::new(&cfg.storage, OffsetDateTime::now_utc());

		Self { cfg, storage: Arc::new(RwLock::new(storage)), events: EventHub::new() }
	}
}

pub(crate) fn now() -> OffsetDateTime {
	OffsetDateTime::now_utc()
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
	if value.trim().is_empty() {
		return Err(Error::InvalidRequest { message: format!("{field} must be non-empty.") });
	}

	Ok(())
}
