use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// Identifier of a note.
///
/// The file backend hands out millisecond timestamps, the Postgres backend database-generated
/// UUIDs. Both serialize to their natural JSON form (number or string).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteId {
	Seq(u64),
	Uuid(Uuid),
}
impl NoteId {
	pub fn as_seq(&self) -> Option<u64> {
		match self {
			Self::Seq(value) => Some(*value),
			Self::Uuid(_) => None,
		}
	}

	pub fn as_uuid(&self) -> Option<Uuid> {
		match self {
			Self::Seq(_) => None,
			Self::Uuid(value) => Some(*value),
		}
	}
}
impl fmt::Display for NoteId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Seq(value) => write!(f, "{value}"),
			Self::Uuid(value) => write!(f, "{value}"),
		}
	}
}
impl FromStr for NoteId {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		let trimmed = raw.trim();

		if let Ok(value) = trimmed.parse::<u64>() {
			return Ok(Self::Seq(value));
		}

		Uuid::parse_str(trimmed)
			.map(Self::Uuid)
			.map_err(|_| Error::InvalidArgument(format!("{raw:?} is not a note id.")))
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
	pub id: NoteId,
	pub author: String,
	pub content: String,
}
