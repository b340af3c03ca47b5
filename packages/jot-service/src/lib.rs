pub mod create;
pub mod delete;
pub mod identity;
pub mod list;
pub mod login;
pub mod users;

mod error;

pub use create::{CreateNoteRequest, CreateNoteResponse};
pub use delete::DeleteNoteResponse;
pub use error::{Error, Result};
pub use identity::Identity;
pub use jot_storage::{Note, NoteId, NoteStore};
pub use login::{LoginRequest, LoginResponse};
pub use users::UserRegistry;

use std::sync::Arc;

/// Request-handling rules on top of a [`NoteStore`].
///
/// One instance is built at startup and shared by every request handler.
pub struct JotService {
	pub store: Arc<dyn NoteStore>,
	pub users: UserRegistry,
}
impl JotService {
	pub fn new(store: Arc<dyn NoteStore>) -> Self {
		Self { store, users: UserRegistry::default() }
	}

	pub fn backend(&self) -> &'static str {
		self.store.backend()
	}

	pub fn known_users(&self) -> Vec<String> {
		self.users.snapshot()
	}

	/// Flushes the store. Call once after the HTTP server has stopped accepting requests.
	pub async fn shutdown(&self) -> Result<()> {
		self.store.flush().await?;

		tracing::info!(backend = self.backend(), "Note store flushed.");

		Ok(())
	}
}
