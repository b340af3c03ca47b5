use crate::{Identity, JotService, Note, Result};

impl JotService {
	pub async fn list(&self, identity: &Identity) -> Result<Vec<Note>> {
		let notes = self.store.list_by_author(identity.as_str()).await?;

		tracing::debug!(author = %identity, count = notes.len(), "Listed notes.");

		Ok(notes)
	}
}
