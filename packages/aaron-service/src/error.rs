pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Conflict: {message}")]
	Conflict { message: String },
	#[error("Internal error: {message}")]
	Internal { message: String },
}
impl From<aaron_storage::Error> for Error {
	fn from(err: aaron_storage::Error) -> Self {
		match err {
			aaron_storage::Error::NotFound(message) => Self::NotFound { message },
			aaron_storage::Error::Conflict(message) => Self::Conflict { message },
		}
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Internal { message: err.to_string() }
	}
}
