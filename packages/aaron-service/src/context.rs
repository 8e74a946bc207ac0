use aaron_domain::{ActiveContext, MemoryShard, Task};

use crate::AaronService;

impl AaronService {
	/// In-progress and pinned tasks with a flat per-task token estimate.
	pub async fn active_context(&self) -> ActiveContext {
		let tasks: Vec<Task> =
			self.storage.read().await.get_tasks().into_iter().filter(Task::is_active).collect();
		let total_tokens = (tasks.len() as u32).saturating_mul(self.cfg.context.tokens_per_task);

		ActiveContext { tasks, total_tokens, max_tokens: self.cfg.context.max_tokens }
	}

	pub async fn memory_shards(&self) -> Vec<MemoryShard> {
		self.storage.read().await.get_memory_shards()
	}

	pub async fn memory_shards_by_project(&self, project: &str) -> Vec<MemoryShard> {
		self.storage.read().await.get_memory_shards_by_project(project)
	}
}
