use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
	#[default]
	Planned,
	InProgress,
	Resolved,
	Blocked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
	Low,
	Medium,
	High,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
	pub id: String,
	pub title: String,
	pub description: Option<String>,
	pub status: TaskStatus,
	pub priority: Option<TaskPriority>,
	pub is_pinned: bool,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
	#[serde(default)]
	pub metadata: Option<Value>,
}
impl Task {
	/// Whether the task belongs in the active context window.
	pub fn is_active(&self) -> bool {
		self.status == TaskStatus::InProgress || self.is_pinned
	}

	pub fn apply(&mut self, patch: TaskPatch, now: OffsetDateTime) {
		if let Some(title) = patch.title {
			self.title = title;
		}
		if let Some(description) = patch.description {
			self.description = Some(description);
		}
		if let Some(status) = patch.status {
			self.status = status;
		}
		if let Some(priority) = patch.priority {
			self.priority = Some(priority);
		}
		if let Some(is_pinned) = patch.is_pinned {
			self.is_pinned = is_pinned;
		}
		if let Some(metadata) = patch.metadata {
			self.metadata = Some(metadata);
		}

		self.updated_at = now;
	}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
	pub title: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub status: TaskStatus,
	#[serde(default)]
	pub priority: Option<TaskPriority>,
	#[serde(default)]
	pub is_pinned: bool,
	#[serde(default)]
	pub metadata: Option<Value>,
}
impl NewTask {
	pub fn into_task(self, id: String, now: OffsetDateTime) -> Task {
		Task {
			id,
			title: self.title,
			description: self.description,
			status: self.status,
			priority: self.priority,
			is_pinned: self.is_pinned,
			created_at: now,
			updated_at: now,
			metadata: self.metadata,
		}
	}
}

/// Partial update. Absent fields are left untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub status: Option<TaskStatus>,
	#[serde(default)]
	pub priority: Option<TaskPriority>,
	#[serde(default)]
	pub is_pinned: Option<bool>,
	#[serde(default)]
	pub metadata: Option<Value>,
}
