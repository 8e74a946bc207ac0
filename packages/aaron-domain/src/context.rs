use serde::{Deserialize, Serialize};

use crate::Task;

/// Tasks that count against the working context, with a flat token estimate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveContext {
	pub tasks: Vec<Task>,
	pub total_tokens: u32,
	pub max_tokens: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlushReport {
	pub message: String,
	pub shards_created: usize,
}
