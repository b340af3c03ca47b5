use serde::{Deserialize, Serialize};

use crate::{Error, Identity, JotService, NoteId, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteNoteResponse {
	pub success: bool,
}

impl JotService {
	pub async fn delete(&self, identity: &Identity, raw_id: &str) -> Result<DeleteNoteResponse> {
		// An id that cannot exist in any backend is reported as missing, not as a bad request.
		let note_id = raw_id.parse::<NoteId>().map_err(|_| Error::NotFound {
			message: format!("Note {raw_id} does not exist."),
		})?;

		self.store.delete(&note_id, identity.as_str()).await?;

		tracing::debug!(author = %identity, note_id = %note_id, "Deleted note.");

		Ok(DeleteNoteResponse { success: true })
	}
}
