mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, FileStorage, Postgres, Security, Service, Storage, StorageBackend};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	match cfg.storage.backend {
		StorageBackend::File => {
			let Some(file) = cfg.storage.file.as_ref() else {
				return Err(Error::Validation {
					message: "storage.file is required when storage.backend is file.".to_string(),
				});
			};

			if file.path.as_os_str().is_empty() {
				return Err(Error::Validation {
					message: "storage.file.path must be non-empty.".to_string(),
				});
			}
		},
		StorageBackend::Postgres => {
			let Some(postgres) = cfg.storage.postgres.as_ref() else {
				return Err(Error::Validation {
					message: "storage.postgres is required when storage.backend is postgres."
						.to_string(),
				});
			};

			if postgres.dsn.trim().is_empty() {
				return Err(Error::Validation {
					message: "storage.postgres.dsn must be non-empty.".to_string(),
				});
			}
			if postgres.pool_max_conns == 0 {
				return Err(Error::Validation {
					message: "storage.postgres.pool_max_conns must be greater than zero."
						.to_string(),
				});
			}
		},
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg
		.service
		.static_dir
		.as_deref()
		.map(|dir| dir.as_os_str().to_string_lossy().trim().is_empty())
		.unwrap_or(false)
	{
		cfg.service.static_dir = None;
	}

	cfg.service.log_level = cfg.service.log_level.trim().to_string();
}
