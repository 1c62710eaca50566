use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use url::Url;

use crate::errors::{SmokeError, SmokeResult};

/// Raw pieces of a response the checks care about.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
	pub status: u16,
	pub body: Vec<u8>,
	pub content_type: String,
}

impl FetchedResponse {
	/// Case-sensitive substring match; `Application/JSON` does not count.
	pub fn is_json(&self) -> bool {
		self.content_type.contains("json")
	}
}

#[derive(Clone)]
pub struct Fetcher {
	client: reqwest::Client,
}

impl Fetcher {
	pub fn new(timeout: Duration) -> SmokeResult<Self> {
		let mut default_headers = HeaderMap::new();
		default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
		let client = reqwest::Client::builder()
			.user_agent(concat!("gex-smoke/", env!("CARGO_PKG_VERSION")))
			.timeout(timeout)
			.default_headers(default_headers)
			.build()
			.map_err(SmokeError::ClientBuild)?;
		Ok(Self { client })
	}

	/// Single GET. Non-2xx statuses come back as `SmokeError::Transport`.
	pub async fn get(&self, url: &Url) -> SmokeResult<FetchedResponse> {
		tracing::debug!(%url, "GET");
		let resp = self.client.get(url.clone()).send().await?.error_for_status()?;
		let status = resp.status().as_u16();
		let content_type = resp
			.headers()
			.get(CONTENT_TYPE)
			.and_then(|v| v.to_str().ok())
			.unwrap_or("")
			.to_string();
		let body = resp.bytes().await?.to_vec();
		tracing::debug!(
			%url,
			status,
			content_type = %content_type,
			body_len = body.len(),
			"response"
		);
		Ok(FetchedResponse { status, body, content_type })
	}
}
