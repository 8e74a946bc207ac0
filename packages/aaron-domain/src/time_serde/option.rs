use serde::{Deserialize, Deserializer, Serializer};
use time::OffsetDateTime;

use super::{from_wire, to_wire};

/// Absent values serialize as `null`.
pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	match value {
		Some(value) => serializer.serialize_some(&to_wire::<S::Error>(value)?),
		None => serializer.serialize_none(),
	}
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
	D: Deserializer<'de>,
{
	Option::<String>::deserialize(deserializer)?.as_deref().map(from_wire::<D::Error>).transpose()
}
