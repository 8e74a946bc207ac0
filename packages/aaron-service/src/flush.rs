use serde_json::json;

use aaron_domain::{FlushReport, NewMemoryShard, ServerEvent};

use crate::{AaronService, Result};

impl AaronService {
	/// Projects every resolved task into a memory shard, at most once per task.
	///
	/// The whole scan runs under one write guard, so concurrent flushes cannot materialize the
	/// same task twice.
	pub async fn flush(&self) -> Result<FlushReport> {
		let mut storage = self.storage.write().await;
		let now = crate::now();
		let mut shards_created = 0;

		for task in storage.unflushed_resolved_tasks() {
			let shard = NewMemoryShard {
				project: self.cfg.flush.project.clone(),
				content: serde_json::to_string(&task)?,
				summary: Some(task.title.clone()),
				tokens: Some(self.cfg.flush.shard_tokens),
				metadata: Some(json!({ "originalTaskId": task.id })),
			};

			storage.create_memory_shard(shard, now);
			storage.mark_flushed(&task.id);

			shards_created += 1;
		}

		drop(storage);

		tracing::info!(shards_created, "Flushed resolved tasks into memory shards.");

		self.events.publish(ServerEvent::FlushComplete { shards_created });

		Ok(FlushReport { message: "Context flushed successfully".to_string(), shards_created })
	}
}
