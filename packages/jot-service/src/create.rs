use serde::{Deserialize, Serialize};

use crate::{Error, Identity, JotService, Note, Result};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreateNoteRequest {
	pub content: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateNoteResponse {
	pub success: bool,
	pub note: Note,
}

impl JotService {
	/// Empty content is accepted; only a missing field is rejected.
	pub async fn create(
		&self,
		identity: &Identity,
		req: CreateNoteRequest,
	) -> Result<CreateNoteResponse> {
		let Some(content) = req.content else {
			return Err(Error::InvalidRequest { message: "content is required.".to_string() });
		};
		let note = self.store.create(identity.as_str(), &content).await?;

		tracing::debug!(author = %identity, note_id = %note.id, "Created note.");

		Ok(CreateNoteResponse { success: true, note })
	}
}
