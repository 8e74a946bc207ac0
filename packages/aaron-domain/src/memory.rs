use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::Task;

const SUMMARY_CHARS: usize = 100;

/// Archived summary of a resolved task. Append-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryShard {
	pub id: String,
	pub project: String,
	pub content: String,
	pub summary: Option<String>,
	pub tokens: Option<u32>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(default)]
	pub metadata: Option<Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMemoryShard {
	pub project: String,
	pub content: String,
	#[serde(default)]
	pub summary: Option<String>,
	#[serde(default)]
	pub tokens: Option<u32>,
	#[serde(default)]
	pub metadata: Option<Value>,
}
impl NewMemoryShard {
	pub fn into_shard(self, id: String, now: OffsetDateTime) -> MemoryShard {
		MemoryShard {
			id,
			project: self.project,
			content: self.content,
			summary: self.summary,
			tokens: self.tokens,
			created_at: now,
			metadata: self.metadata,
		}
	}
}

/// Rough token estimate, about four characters per token.
pub fn calculate_token_usage(content: &str) -> u32 {
	let chars = content.chars().count();

	chars.div_ceil(4) as u32
}

/// One line per task: `<title> (<status>): <description prefix>`.
pub fn compress_memory(tasks: &[Task]) -> String {
	tasks
		.iter()
		.map(|task| {
			let status = serde_json::to_value(task.status)
				.ok()
				.and_then(|value| value.as_str().map(str::to_string))
				.unwrap_or_default();
			let summary = match task.description.as_deref() {
				Some(description) if description.chars().count() > SUMMARY_CHARS => {
					let head: String = description.chars().take(SUMMARY_CHARS).collect();

					format!("{head}...")
				},
				Some(description) => description.to_string(),
				None => String::new(),
			};

			format!("{} ({status}): {summary}", task.title)
		})
		.collect::<Vec<_>>()
		.join("\n")
}
