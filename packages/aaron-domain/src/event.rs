use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AgentMode, Message, StatusPipeline, Task, TaskQueueItem};

/// Push frame sent to every connected websocket, discriminated by `type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
	Message {
		message: Message,
	},
	StatusUpdate {
		status: AgentMode,
		current_task: Option<String>,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		metadata: Option<Value>,
	},
	TaskCreated {
		task: Task,
	},
	TaskUpdated {
		task: Task,
	},
	FlushComplete {
		shards_created: usize,
	},
	QueueItemCreated {
		item: TaskQueueItem,
	},
	QueueItemUpdated {
		item: TaskQueueItem,
	},
	PipelineUpdated {
		pipeline: StatusPipeline,
	},
}
impl ServerEvent {
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Message { .. } => "message",
			Self::StatusUpdate { .. } => "status_update",
			Self::TaskCreated { .. } => "task_created",
			Self::TaskUpdated { .. } => "task_updated",
			Self::FlushComplete { .. } => "flush_complete",
			Self::QueueItemCreated { .. } => "queue_item_created",
			Self::QueueItemUpdated { .. } => "queue_item_updated",
			Self::PipelineUpdated { .. } => "pipeline_updated",
		}
	}
}
