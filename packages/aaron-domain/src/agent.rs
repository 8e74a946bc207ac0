use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
	#[default]
	Idle,
	Thinking,
	Executing,
}

/// The single agent status record. Each update overwrites it; no history is kept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStatus {
	pub id: String,
	pub status: AgentMode,
	pub current_task: Option<String>,
	#[serde(with = "crate::time_serde")]
	pub last_activity: OffsetDateTime,
	#[serde(default)]
	pub metadata: Option<Value>,
}
impl AgentStatus {
	pub fn idle(id: String, now: OffsetDateTime) -> Self {
		Self { id, status: AgentMode::Idle, current_task: None, last_activity: now, metadata: None }
	}

	/// Overwrites mode and current task. Metadata is replaced only when the update carries one.
	pub fn apply(&mut self, update: AgentStatusUpdate, now: OffsetDateTime) {
		self.status = update.status;
		self.current_task = update.current_task;
		self.last_activity = now;

		if update.metadata.is_some() {
			self.metadata = update.metadata;
		}
	}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStatusUpdate {
	pub status: AgentMode,
	#[serde(default)]
	pub current_task: Option<String>,
	#[serde(default)]
	pub metadata: Option<Value>,
}
impl AgentStatusUpdate {
	pub fn new(status: AgentMode, current_task: Option<&str>) -> Self {
		Self { status, current_task: current_task.map(str::to_string), metadata: None }
	}
}
