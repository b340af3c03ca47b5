pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Unauthenticated: {message}")]
	Unauthenticated { message: String },
	#[error("Forbidden: {message}")]
	Forbidden { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}

impl From<jot_storage::Error> for Error {
	fn from(err: jot_storage::Error) -> Self {
		match err {
			jot_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			jot_storage::Error::NotFound(message) => Self::NotFound { message },
			jot_storage::Error::Forbidden(message) => Self::Forbidden { message },
			err @ (jot_storage::Error::Sqlx(_)
			| jot_storage::Error::Json(_)
			| jot_storage::Error::Io { .. }) => Self::Storage { message: err.to_string() },
		}
	}
}
