use clap::{Parser, ValueEnum};
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "gex_smoke")]
#[command(about = "Smoke test a running GEX dashboard server", long_about = None)]
#[command(version)]
pub struct Opts {
	/// Server base URL
	#[arg(long, env = "SMOKE_BASE_URL", default_value = "http://localhost:8000")]
	pub base_url: String,

	/// Symbol to query
	#[arg(
		long,
		env = "SMOKE_SYMBOL",
		num_args = 0..=1,
		default_value = "SPX",
		default_missing_value = "SPX"
	)]
	pub symbol: String,

	/// Strike count for the MVP call
	#[arg(long, env = "SMOKE_STRIKE_COUNT", default_value_t = 20)]
	pub strike_count: i64,

	/// Timeout (seconds) per request
	#[arg(long, env = "SMOKE_TIMEOUT", default_value = "5.0", value_parser = parse_timeout)]
	pub timeout: f64,

	/// Output format for the report
	#[arg(long, env = "SMOKE_FORMAT", value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	Text,
	Json,
}

impl Opts {
	pub fn timeout(&self) -> Duration {
		Duration::from_secs_f64(self.timeout)
	}
}

fn parse_timeout(raw: &str) -> Result<f64, String> {
	let secs: f64 = raw.trim().parse().map_err(|_| format!("`{raw}` is not a number"))?;
	if !secs.is_finite() || secs <= 0.0 {
		return Err(format!("timeout must be a positive number of seconds, got `{raw}`"));
	}
	Duration::try_from_secs_f64(secs).map_err(|_| format!("timeout `{raw}` is out of range"))?;
	Ok(secs)
}
