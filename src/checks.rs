//! The three dashboard checks.
//!
//! Each check builds its URL, fetches it and evaluates the response shape.
//! Errors never escape a check; they become a failed [`CheckOutcome`].

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::errors::{SmokeError, SmokeResult};
use crate::fetch::{FetchedResponse, Fetcher};

/// Substring the dashboard home page must contain.
pub const HOME_MARKER: &str = "GEX Dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckKind {
	Home,
	Expiries,
	#[serde(rename = "MVP")]
	Mvp,
}

impl CheckKind {
	pub const ALL: [CheckKind; 3] = [CheckKind::Home, CheckKind::Expiries, CheckKind::Mvp];

	pub fn name(self) -> &'static str {
		match self {
			CheckKind::Home => "Home",
			CheckKind::Expiries => "Expiries",
			CheckKind::Mvp => "MVP",
		}
	}

	pub fn path(self) -> &'static str {
		match self {
			CheckKind::Home => "/",
			CheckKind::Expiries => "/api/expiries",
			CheckKind::Mvp => "/api/mvp",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
	#[serde(rename = "name")]
	pub kind: CheckKind,
	pub passed: bool,
	pub message: String,
}

impl CheckOutcome {
	fn evaluated(kind: CheckKind, status: u16, verdict: Verdict) -> Self {
		let mut message = format!("GET {} (status {})", kind.path(), status);
		if let Verdict::Fail(reason) = &verdict {
			message.push_str(": ");
			message.push_str(reason);
		}
		Self { kind, passed: verdict.passed(), message }
	}

	fn errored(kind: CheckKind, err: &SmokeError) -> Self {
		tracing::warn!(check = kind.name(), error_kind = err.kind(), error = %err, "check errored");
		Self { kind, passed: false, message: format!("GET {} failed: {}", kind.path(), err) }
	}
}

/// Result of inspecting a response that did arrive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
	Pass,
	/// Non-200 status; the status already appears in the message.
	BadStatus,
	Fail(String),
}

impl Verdict {
	pub fn passed(&self) -> bool {
		matches!(self, Verdict::Pass)
	}
}

/// Joins `path` onto `base` (trailing slashes stripped) and form-encodes `params`.
pub fn endpoint_url(base: &str, path: &str, params: &[(&str, String)]) -> SmokeResult<Url> {
	let raw = format!("{}{}", base.trim_end_matches('/'), path);
	let url = if params.is_empty() {
		Url::parse(&raw)?
	} else {
		Url::parse_with_params(&raw, params)?
	};
	Ok(url)
}

/// JSON truthiness: `null`, `false`, zero and empty strings/arrays/objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
		Value::String(s) => !s.is_empty(),
		Value::Array(a) => !a.is_empty(),
		Value::Object(o) => !o.is_empty(),
	}
}

pub fn evaluate_home(resp: &FetchedResponse) -> Verdict {
	if resp.status != 200 {
		return Verdict::BadStatus;
	}
	if contains(&resp.body, HOME_MARKER.as_bytes()) {
		Verdict::Pass
	} else {
		Verdict::Fail(format!("body missing \"{}\"", HOME_MARKER))
	}
}

pub fn evaluate_expiries(resp: &FetchedResponse) -> SmokeResult<Verdict> {
	if resp.status != 200 {
		return Ok(Verdict::BadStatus);
	}
	if !resp.is_json() {
		return Ok(Verdict::Pass);
	}
	let data: Value = serde_json::from_slice(&resp.body)?;
	let Some(obj) = data.as_object() else {
		return Ok(Verdict::Fail("body is not a JSON object".into()));
	};
	match obj.get("expiries") {
		Some(v) if is_truthy(v) => Ok(Verdict::Pass),
		Some(_) => Ok(Verdict::Fail("\"expiries\" is empty".into())),
		None => Ok(Verdict::Fail("body missing \"expiries\"".into())),
	}
}

pub fn evaluate_mvp(resp: &FetchedResponse) -> SmokeResult<Verdict> {
	if resp.status != 200 {
		return Ok(Verdict::BadStatus);
	}
	if !resp.is_json() {
		return Ok(Verdict::Pass);
	}
	let data: Value = serde_json::from_slice(&resp.body)?;
	let Some(obj) = data.as_object() else {
		return Ok(Verdict::Fail("body is not a JSON object".into()));
	};
	let missing: Vec<&str> = ["spot", "live"]
		.into_iter()
		.filter(|k| !obj.contains_key(*k))
		.collect();
	if missing.is_empty() {
		Ok(Verdict::Pass)
	} else {
		Ok(Verdict::Fail(format!("body missing {}", quoted(&missing))))
	}
}

pub async fn check_home(fetcher: &Fetcher, base_url: &str) -> CheckOutcome {
	run(CheckKind::Home, fetcher, base_url, &[], |r| Ok(evaluate_home(r))).await
}

pub async fn check_expiries(fetcher: &Fetcher, base_url: &str, symbol: &str) -> CheckOutcome {
	let params = [("symbol", symbol.to_string())];
	run(CheckKind::Expiries, fetcher, base_url, &params, evaluate_expiries).await
}

pub async fn check_mvp(
	fetcher: &Fetcher,
	base_url: &str,
	symbol: &str,
	strike_count: i64,
) -> CheckOutcome {
	let params = [("symbol", symbol.to_string()), ("strike_count", strike_count.to_string())];
	run(CheckKind::Mvp, fetcher, base_url, &params, evaluate_mvp).await
}

async fn run<F>(
	kind: CheckKind,
	fetcher: &Fetcher,
	base_url: &str,
	params: &[(&str, String)],
	evaluate: F,
) -> CheckOutcome
where
	F: Fn(&FetchedResponse) -> SmokeResult<Verdict>,
{
	let attempt = async {
		let url = endpoint_url(base_url, kind.path(), params)?;
		let resp = fetcher.get(&url).await?;
		let verdict = evaluate(&resp)?;
		Ok::<_, SmokeError>((resp.status, verdict))
	};
	match attempt.await {
		Ok((status, verdict)) => {
			let outcome = CheckOutcome::evaluated(kind, status, verdict);
			if !outcome.passed {
				tracing::warn!(
					check = kind.name(),
					status,
					message = %outcome.message,
					"check failed"
				);
			}
			outcome
		}
		Err(e) => CheckOutcome::errored(kind, &e),
	}
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
	haystack.windows(needle.len()).any(|w| w == needle)
}

fn quoted(keys: &[&str]) -> String {
	keys.iter().map(|k| format!("\"{}\"", k)).collect::<Vec<_>>().join(" and ")
}
