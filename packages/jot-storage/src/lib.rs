pub mod file;
pub mod models;
pub mod pg;
pub mod schema;

mod error;

pub use error::Error;
pub use file::FileStore;
pub use models::{Note, NoteId};
pub use pg::PgStore;

use std::{future::Future, pin::Pin};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Persistence contract shared by every note backend.
///
/// Implementations must agree on observable behavior: notes are listed oldest first, a created
/// note is visible to the next listing of its author, and deletion distinguishes a missing note
/// ([`Error::NotFound`]) from a note owned by someone else ([`Error::Forbidden`]).
pub trait NoteStore
where
	Self: Send + Sync,
{
	/// Short backend name used in logs.
	fn backend(&self) -> &'static str;

	fn list_by_author<'a>(&'a self, author: &'a str) -> BoxFuture<'a, Result<Vec<Note>>>;

	fn create<'a>(&'a self, author: &'a str, content: &'a str) -> BoxFuture<'a, Result<Note>>;

	/// Removes the note only when `author` owns it. A failed check leaves the store untouched.
	fn delete<'a>(&'a self, id: &'a NoteId, author: &'a str) -> BoxFuture<'a, Result<()>>;

	/// Called once on shutdown.
	fn flush(&self) -> BoxFuture<'_, Result<()>>;
}
