use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
	Thinking,
	Working,
	Completed,
	Progress,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStep {
	pub name: String,
	pub completed: bool,
}
impl ProgressStep {
	pub fn new(name: &str, completed: bool) -> Self {
		Self { name: name.to_string(), completed }
	}
}

/// Ephemeral UI event for one step of simulated agent work. Never stored server-side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivityIndicator {
	pub id: String,
	#[serde(rename = "type")]
	pub kind: ActivityKind,
	pub title: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub subtitle: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub progress: Option<Vec<ProgressStep>>,
	#[serde(with = "crate::time_serde")]
	pub timestamp: OffsetDateTime,
}
impl ActivityIndicator {
	pub fn new(id: String, kind: ActivityKind, title: &str, timestamp: OffsetDateTime) -> Self {
		Self { id, kind, title: title.to_string(), subtitle: None, progress: None, timestamp }
	}

	pub fn apply(&mut self, patch: ActivityPatch) {
		if let Some(kind) = patch.kind {
			self.kind = kind;
		}
		if let Some(title) = patch.title {
			self.title = title;
		}
		if let Some(subtitle) = patch.subtitle {
			self.subtitle = Some(subtitle);
		}
		if let Some(progress) = patch.progress {
			self.progress = Some(progress);
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct ActivityPatch {
	pub kind: Option<ActivityKind>,
	pub title: Option<String>,
	pub subtitle: Option<String>,
	pub progress: Option<Vec<ProgressStep>>,
}
