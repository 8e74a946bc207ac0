//! Timestamps travel as RFC 3339 strings, the same shape browsers produce with
//! `Date.prototype.toISOString`.

pub mod option;

use serde::{Deserialize, Deserializer, Serializer, de, ser};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_str(&to_wire::<S::Error>(value)?)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	from_wire(&String::deserialize(deserializer)?)
}

fn to_wire<E>(value: &OffsetDateTime) -> Result<String, E>
where
	E: ser::Error,
{
	value.format(&Rfc3339).map_err(E::custom)
}

fn from_wire<E>(raw: &str) -> Result<OffsetDateTime, E>
where
	E: de::Error,
{
	OffsetDateTime::parse(raw, &Rfc3339).map_err(E::custom)
}
