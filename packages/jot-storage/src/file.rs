use std::{
	io::ErrorKind,
	path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;
use tokio::{fs, sync::Mutex};

use crate::{BoxFuture, Error, Note, NoteId, NoteStore, Result};

/// Notes held in memory and mirrored to a single pretty-printed JSON array after each mutation.
///
/// Loading never fails: a missing, unreadable, or malformed file starts an empty store, and a
/// single broken record is skipped rather than discarding the rest. A failed write after a
/// mutation is logged and the mutation still succeeds, so memory and disk can diverge until the
/// next successful write. The file is only ever written after a mutation, never on open or on a
/// clean flush.
pub struct FileStore {
	path: PathBuf,
	inner: Mutex<Inner>,
}
impl FileStore {
	pub async fn open(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		let notes = load_notes(&path).await;

		tracing::info!(path = %path.display(), notes = notes.len(), "Loaded note file.");

		Self { path, inner: Mutex::new(Inner { notes, dirty: false }) }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	async fn persist_or_log(&self, inner: &mut Inner) {
		inner.dirty = true;

		match write_notes(&self.path, &inner.notes).await {
			Ok(()) => inner.dirty = false,
			Err(err) => tracing::error!(
				path = %self.path.display(),
				error = %err,
				"Failed to write note file."
			),
		}
	}
}
impl NoteStore for FileStore {
	fn backend(&self) -> &'static str {
		"file"
	}

	fn list_by_author<'a>(&'a self, author: &'a str) -> BoxFuture<'a, Result<Vec<Note>>> {
		Box::pin(async move {
			let inner = self.inner.lock().await;

			Ok(inner.notes.iter().filter(|note| note.author == author).cloned().collect())
		})
	}

	fn create<'a>(&'a self, author: &'a str, content: &'a str) -> BoxFuture<'a, Result<Note>> {
		Box::pin(async move {
			let mut inner = self.inner.lock().await;
			let note = Note {
				id: NoteId::Seq(next_seq_id(&inner.notes, now_millis())),
				author: author.to_string(),
				content: content.to_string(),
			};

			inner.notes.push(note.clone());
			// The lock is held across the write so the file always reflects the latest mutation.
			self.persist_or_log(&mut inner).await;

			Ok(note)
		})
	}

	fn delete<'a>(&'a self, id: &'a NoteId, author: &'a str) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let mut inner = self.inner.lock().await;
			let index = inner
				.notes
				.iter()
				.position(|note| &note.id == id)
				.ok_or_else(|| Error::NotFound(format!("Note {id} does not exist.")))?;

			if inner.notes[index].author != author {
				return Err(Error::Forbidden(format!("Note {id} belongs to another author.")));
			}

			inner.notes.remove(index);
			self.persist_or_log(&mut inner).await;

			Ok(())
		})
	}

	fn flush(&self) -> BoxFuture<'_, Result<()>> {
		Box::pin(async move {
			let mut inner = self.inner.lock().await;

			if !inner.dirty {
				tracing::debug!(path = %self.path.display(), "Note file already up to date.");

				return Ok(());
			}

			write_notes(&self.path, &inner.notes).await?;

			inner.dirty = false;

			Ok(())
		})
	}
}

struct Inner {
	notes: Vec<Note>,
	// Set while memory holds a mutation the file does not.
	dirty: bool,
}

/// On-disk shape of one note, lenient about what older front-ends wrote for `content`.
#[derive(Deserialize)]
struct StoredNote {
	id: NoteId,
	author: String,
	#[serde(default)]
	content: Value,
}
impl From<StoredNote> for Note {
	fn from(stored: StoredNote) -> Self {
		let content = match stored.content {
			Value::String(text) => text,
			Value::Null => String::new(),
			other => other.to_string(),
		};

		Self { id: stored.id, author: stored.author, content }
	}
}

async fn load_notes(path: &Path) -> Vec<Note> {
	let raw = match fs::read_to_string(path).await {
		Ok(raw) => raw,
		Err(err) if err.kind() == ErrorKind::NotFound => {
			tracing::debug!(path = %path.display(), "Note file does not exist yet.");

			return Vec::new();
		},
		Err(err) => {
			tracing::warn!(path = %path.display(), error = %err, "Failed to read note file.");

			return Vec::new();
		},
	};

	if raw.trim().is_empty() {
		return Vec::new();
	}

	let records = match serde_json::from_str::<Vec<Value>>(&raw) {
		Ok(records) => records,
		Err(err) => {
			tracing::warn!(path = %path.display(), error = %err, "Failed to parse note file.");

			return Vec::new();
		},
	};

	parse_records(path, records)
}

fn parse_records(path: &Path, records: Vec<Value>) -> Vec<Note> {
	records
		.into_iter()
		.enumerate()
		.filter_map(|(index, record)| match serde_json::from_value::<StoredNote>(record) {
			Ok(stored) => Some(stored.into()),
			Err(err) => {
				tracing::warn!(
					path = %path.display(),
					index,
					error = %err,
					"Skipping unreadable note record."
				);

				None
			},
		})
		.collect()
}

async fn write_notes(path: &Path, notes: &[Note]) -> Result<()> {
	let body = serde_json::to_string_pretty(notes)?;
	let tmp = temp_path(path);

	if let Some(parent) = path.parent()
		&& !parent.as_os_str().is_empty()
	{
		fs::create_dir_all(parent)
			.await
			.map_err(|err| Error::Io { path: parent.to_path_buf(), source: err })?;
	}

	fs::write(&tmp, body).await.map_err(|err| Error::Io { path: tmp.clone(), source: err })?;
	fs::rename(&tmp, path).await.map_err(|err| Error::Io { path: path.to_path_buf(), source: err })
}

fn temp_path(path: &Path) -> PathBuf {
	let mut name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();

	name.push(".tmp");

	path.with_file_name(name)
}

fn now_millis() -> u64 {
	let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;

	u64::try_from(millis).unwrap_or(0)
}

/// Millisecond timestamp, bumped past the largest existing id so rapid creates never collide.
fn next_seq_id(notes: &[Note], now: u64) -> u64 {
	match notes.iter().filter_map(|note| note.id.as_seq()).max() {
		Some(last) if last >= now => last + 1,
		_ => now,
	}
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use serde_json::json;

	use crate::{Note, NoteId};

	fn note(id: u64) -> Note {
		Note { id: NoteId::Seq(id), author: "alice".to_string(), content: String::new() }
	}

	#[test]
	fn next_id_uses_clock_when_ahead() {
		assert_eq!(super::next_seq_id(&[], 1_000), 1_000);
		assert_eq!(super::next_seq_id(&[note(10), note(500)], 1_000), 1_000);
	}

	#[test]
	fn next_id_bumps_past_existing_ids() {
		assert_eq!(super::next_seq_id(&[note(1_000)], 1_000), 1_001);
		assert_eq!(super::next_seq_id(&[note(2_000), note(1_500)], 1_000), 2_001);
	}

	#[test]
	fn temp_path_is_a_sibling() {
		assert_eq!(
			super::temp_path(Path::new("data/database.json")),
			Path::new("data/database.json.tmp")
		);
	}

	#[test]
	fn non_string_content_is_kept_as_json_text() {
		let notes = super::parse_records(
			Path::new("database.json"),
			vec![
				json!({"id": 1, "author": "alice", "content": 5}),
				json!({"id": 2, "author": "alice", "content": {"text": "nested"}}),
				json!({"id": 3, "author": "alice", "content": null}),
				json!({"id": 4, "author": "alice"}),
			],
		);
		let contents = notes.iter().map(|note| note.content.as_str()).collect::<Vec<_>>();

		assert_eq!(contents, ["5", r#"{"text":"nested"}"#, "", ""]);
	}

	#[test]
	fn broken_records_are_skipped_individually() {
		let notes = super::parse_records(
			Path::new("database.json"),
			vec![
				json!({"id": 1, "author": "alice", "content": "keep"}),
				json!({"id": "not-an-id", "author": "alice", "content": "bad id"}),
				json!({"id": 3, "content": "no author"}),
				json!("not an object"),
				json!({"id": 5, "author": "alice", "content": "also kept"}),
			],
		);
		let ids = notes.iter().filter_map(|note| note.id.as_seq()).collect::<Vec<_>>();

		assert_eq!(ids, [1, 5]);
	}
}
