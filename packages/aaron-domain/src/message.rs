use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	User,
	Assistant,
	System,
}

/// A chat message. Immutable once stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
	pub id: String,
	pub conversation_id: Option<String>,
	pub role: Role,
	pub content: String,
	#[serde(with = "crate::time_serde")]
	pub timestamp: OffsetDateTime,
	#[serde(default)]
	pub metadata: Option<Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
	#[serde(default)]
	pub conversation_id: Option<String>,
	pub role: Role,
	pub content: String,
	#[serde(default)]
	pub metadata: Option<Value>,
}
impl NewMessage {
	pub fn into_message(self, id: String, timestamp: OffsetDateTime) -> Message {
		Message {
			id,
			conversation_id: self.conversation_id,
			role: self.role,
			content: self.content,
			timestamp,
			metadata: self.metadata,
		}
	}
}
