use std::sync::Arc;

use color_eyre::eyre;

use jot_config::{Config, StorageBackend};
use jot_service::JotService;
use jot_storage::{FileStore, NoteStore, PgStore};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<JotService>,
}
impl AppState {
	pub async fn new(config: &Config) -> color_eyre::Result<Self> {
		let store: Arc<dyn NoteStore> = match config.storage.backend {
			StorageBackend::File => {
				let file = config
					.storage
					.file
					.as_ref()
					.ok_or_else(|| eyre::eyre!("storage.file is required for the file backend."))?;

				Arc::new(FileStore::open(&file.path).await)
			},
			StorageBackend::Postgres => {
				let postgres = config.storage.postgres.as_ref().ok_or_else(|| {
					eyre::eyre!("storage.postgres is required for the postgres backend.")
				})?;
				let store = PgStore::connect(postgres).await?;

				store.ensure_schema().await?;

				Arc::new(store)
			},
		};

		tracing::info!(backend = store.backend(), "Note store ready.");

		Ok(Self::from_store(store))
	}

	pub fn from_store(store: Arc<dyn NoteStore>) -> Self {
		Self { service: Arc::new(JotService::new(store)) }
	}
}
