use aaron_domain::{NewQueueItem, QueueItemPatch, ServerEvent, TaskQueueItem};

use crate::{AaronService, Result};

impl AaronService {
	pub async fn task_queue(&self) -> Vec<TaskQueueItem> {
		self.storage.read().await.get_task_queue()
	}

	pub async fn create_queue_item(&self, req: NewQueueItem) -> Result<TaskQueueItem> {
		crate::require_non_empty("title", &req.title)?;

		let item = self.storage.write().await.create_task_queue_item(req, crate::now());

		self.events.publish(ServerEvent::QueueItemCreated { item: item.clone() });

		Ok(item)
	}

	/// Any status may follow any other; transitions are not validated.
	pub async fn update_queue_item(&self, id: &str, patch: QueueItemPatch) -> Result<TaskQueueItem> {
		let item = self.storage.write().await.update_task_queue_item(id, patch, crate::now())?;

		self.events.publish(ServerEvent::QueueItemUpdated { item: item.clone() });

		Ok(item)
	}
}
