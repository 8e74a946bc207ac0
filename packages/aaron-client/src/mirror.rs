use std::sync::Arc;

use serde_json::Value;
use time::OffsetDateTime;
use tokio::sync::watch;

use aaron_domain::{AgentMode, AgentStatus, StatusPipeline, Task, TaskQueueItem};

/// Client-side copy of server state, fed by polling and by push events.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServerSnapshot {
	pub agent_status: Option<AgentStatus>,
	pub task_queue: Vec<TaskQueueItem>,
	pub status_pipeline: Option<StatusPipeline>,
	pub tasks: Vec<Task>,
}

#[derive(Clone, Debug)]
pub struct MirrorStore {
	state: Arc<watch::Sender<ServerSnapshot>>,
}
impl MirrorStore {
	pub fn new() -> Self {
		let (state, _) = watch::channel(ServerSnapshot::default());

		Self { state: Arc::new(state) }
	}

	pub fn subscribe(&self) -> watch::Receiver<ServerSnapshot> {
		self.state.subscribe()
	}

	pub fn snapshot(&self) -> ServerSnapshot {
		self.state.borrow().clone()
	}

	pub fn set_agent_status(&self, status: AgentStatus) {
		self.state.send_modify(|state| state.agent_status = Some(status));
	}

	/// Folds a pushed status change into the mirrored record, keeping its id. Metadata is only
	/// replaced when the push carries one.
	///
	/// Ignored until the first poll has delivered a record to fold into.
	pub fn apply_status_update(
		&self,
		mode: AgentMode,
		current_task: Option<String>,
		metadata: Option<Value>,
	) {
		let now = OffsetDateTime::now_utc();

		self.state.send_if_modified(|state| {
			let Some(status) = state.agent_status.as_mut() else {
				return false;
			};

			status.status = mode;
			status.current_task = current_task;
			status.last_activity = now;

			if metadata.is_some() {
				status.metadata = metadata;
			}

			true
		});
	}

	pub fn set_task_queue(&self, items: Vec<TaskQueueItem>) {
		self.state.send_modify(|state| state.task_queue = items);
	}

	/// Replaces the item with the same id or appends it, then restores priority order.
	pub fn upsert_queue_item(&self, item: TaskQueueItem) {
		self.state.send_modify(|state| {
			match state.task_queue.iter_mut().find(|existing| existing.id == item.id) {
				Some(existing) => *existing = item,
				None => state.task_queue.push(item),
			}

			state.task_queue.sort_by_key(|item| item.priority);
		});
	}

	pub fn set_status_pipeline(&self, pipeline: StatusPipeline) {
		self.state.send_modify(|state| state.status_pipeline = Some(pipeline));
	}

	/// Most recently updated task first, matching the server listing.
	pub fn upsert_task(&self, task: Task) {
		self.state.send_modify(|state| {
			state.tasks.retain(|existing| existing.id != task.id);
			state.tasks.insert(0, task);
		});
	}
}
impl Default for MirrorStore {
	fn default() -> Self {
		Self::new()
	}
}
