use clap::Parser;
use dotenvy::dotenv;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gex_smoke::report::format_line;
use gex_smoke::{run_checks, Fetcher, Opts, OutputFormat};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
	// .env first so clap's env fallbacks see it
	dotenv().ok();

	// stdout carries the report, logs go to stderr
	let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into());
	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::new(env_filter))
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.try_init()
		.ok();

	let opts = Opts::parse();
	tracing::info!(
		base_url = %opts.base_url,
		symbol = %opts.symbol,
		strike_count = opts.strike_count,
		timeout_secs = opts.timeout,
		"starting smoke test"
	);

	let fetcher = Fetcher::new(opts.timeout())?;
	let stdout = std::io::stdout();

	let report = match opts.format {
		OutputFormat::Text => {
			let report = run_checks(&fetcher, &opts, |outcome| {
				let mut out = stdout.lock();
				writeln!(out, "{}", format_line(outcome))?;
				out.flush()
			})
			.await?;
			report.write_summary(&mut stdout.lock())?;
			report
		}
		OutputFormat::Json => {
			let report = run_checks(&fetcher, &opts, |_| Ok(())).await?;
			report.write_json(&mut stdout.lock())?;
			report
		}
	};

	Ok(ExitCode::from(&report))
}
