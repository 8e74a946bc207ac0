use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// Queue priority, 1 being the most urgent. Ordering follows the numeric value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum QueuePriority {
	High = 1,
	#[default]
	Medium = 2,
	Low = 3,
}
impl TryFrom<u8> for QueuePriority {
	type Error = String;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		match value {
			1 => Ok(Self::High),
			2 => Ok(Self::Medium),
			3 => Ok(Self::Low),
			other => Err(format!("priority must be 1, 2, or 3, got {other}")),
		}
	}
}
impl From<QueuePriority> for u8 {
	fn from(value: QueuePriority) -> Self {
		value as u8
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
	#[default]
	Queued,
	InProgress,
	Completed,
	Failed,
}
impl QueueStatus {
	pub fn is_terminal(self) -> bool {
		matches!(self, Self::Completed | Self::Failed)
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQueueItem {
	pub id: String,
	pub title: String,
	pub description: Option<String>,
	pub priority: QueuePriority,
	pub status: QueueStatus,
	/// Estimate in minutes.
	pub estimated_time: Option<u32>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(default, with = "crate::time_serde::option")]
	pub started_at: Option<OffsetDateTime>,
	#[serde(default, with = "crate::time_serde::option")]
	pub completed_at: Option<OffsetDateTime>,
	#[serde(default)]
	pub metadata: Option<Value>,
}
impl TaskQueueItem {
	/// Applies a partial update. Any status may follow any other; the lifecycle stamps are
	/// only set the first time a matching status is reached.
	pub fn apply(&mut self, patch: QueueItemPatch, now: OffsetDateTime) {
		if let Some(title) = patch.title {
			self.title = title;
		}
		if let Some(description) = patch.description {
			self.description = Some(description);
		}
		if let Some(priority) = patch.priority {
			self.priority = priority;
		}
		if let Some(estimated_time) = patch.estimated_time {
			self.estimated_time = Some(estimated_time);
		}
		if let Some(metadata) = patch.metadata {
			self.metadata = Some(metadata);
		}
		if let Some(status) = patch.status {
			self.status = status;

			if status == QueueStatus::InProgress && self.started_at.is_none() {
				self.started_at = Some(now);
			}
			if status.is_terminal() && self.completed_at.is_none() {
				self.completed_at = Some(now);
			}
		}
	}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQueueItem {
	pub title: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub priority: QueuePriority,
	#[serde(default)]
	pub status: QueueStatus,
	#[serde(default)]
	pub estimated_time: Option<u32>,
	#[serde(default)]
	pub metadata: Option<Value>,
}
impl NewQueueItem {
	pub fn into_item(self, id: String, now: OffsetDateTime) -> TaskQueueItem {
		let started_at = (self.status == QueueStatus::InProgress).then_some(now);
		let completed_at = self.status.is_terminal().then_some(now);

		TaskQueueItem {
			id,
			title: self.title,
			description: self.description,
			priority: self.priority,
			status: self.status,
			estimated_time: self.estimated_time,
			created_at: now,
			started_at,
			completed_at,
			metadata: self.metadata,
		}
	}
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItemPatch {
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub priority: Option<QueuePriority>,
	#[serde(default)]
	pub status: Option<QueueStatus>,
	#[serde(default)]
	pub estimated_time: Option<u32>,
	#[serde(default)]
	pub metadata: Option<Value>,
}
