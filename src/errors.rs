use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmokeError {
	#[error("{0}")]
	Transport(#[from] reqwest::Error),
	#[error("invalid JSON body: {0}")]
	Json(#[from] serde_json::Error),
	#[error("invalid URL: {0}")]
	InvalidUrl(#[from] url::ParseError),
	#[error("failed to build HTTP client: {0}")]
	ClientBuild(#[source] reqwest::Error),
}

impl SmokeError {
	/// Short label used in log fields.
	pub fn kind(&self) -> &'static str {
		match self {
			SmokeError::Transport(e) if e.is_timeout() => "timeout",
			SmokeError::Transport(e) if e.is_connect() => "connect",
			SmokeError::Transport(e) if e.is_status() => "status",
			SmokeError::Transport(_) => "transport",
			SmokeError::Json(_) => "json",
			SmokeError::InvalidUrl(_) => "url",
			SmokeError::ClientBuild(_) => "client",
		}
	}
}

pub type SmokeResult<T> = Result<T, SmokeError>;
