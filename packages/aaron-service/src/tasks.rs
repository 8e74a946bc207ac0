use aaron_domain::{NewTask, ServerEvent, Task, TaskPatch};

use crate::{AaronService, Error, Result};

impl AaronService {
	pub async fn tasks(&self) -> Vec<Task> {
		self.storage.read().await.get_tasks()
	}

	pub async fn task(&self, id: &str) -> Result<Task> {
		self.storage
			.read()
			.await
			.get_task(id)
			.ok_or_else(|| Error::NotFound { message: format!("task {id}") })
	}

	pub async fn create_task(&self, req: NewTask) -> Result<Task> {
		crate::require_non_empty("title", &req.title)?;

		let task = self.storage.write().await.create_task(req, crate::now());

		self.events.publish(ServerEvent::TaskCreated { task: task.clone() });

		Ok(task)
	}

	pub async fn update_task(&self, id: &str, patch: TaskPatch) -> Result<Task> {
		if let Some(title) = patch.title.as_deref() {
			crate::require_non_empty("title", title)?;
		}

		let task = self.storage.write().await.update_task(id, patch, crate::now())?;

		self.events.publish(ServerEvent::TaskUpdated { task: task.clone() });

		Ok(task)
	}
}
