use std::io::{self, Write};
use std::process::ExitCode;

use crate::checks::{check_expiries, check_home, check_mvp, CheckKind, CheckOutcome};
use crate::config::Opts;
use crate::fetch::Fetcher;

pub const FAILURE_SUMMARY: &str =
	"One or more smoke tests failed. Ensure the server is running and reachable.";

#[derive(Debug, Clone, Default)]
pub struct Report {
	pub outcomes: Vec<CheckOutcome>,
}

impl Report {
	pub fn all_passed(&self) -> bool {
		self.outcomes.iter().all(|o| o.passed)
	}

	pub fn exit_code(&self) -> u8 {
		if self.all_passed() { 0 } else { 1 }
	}

	pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
		let doc = serde_json::json!({ "passed": self.all_passed(), "checks": self.outcomes });
		serde_json::to_writer_pretty(&mut *out, &doc)?;
		writeln!(out)
	}

	/// Failure summary, if any check failed.
	pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
		if !self.all_passed() {
			writeln!(out, "{}", FAILURE_SUMMARY)?;
		}
		Ok(())
	}
}

impl From<&Report> for ExitCode {
	fn from(report: &Report) -> Self {
		ExitCode::from(report.exit_code())
	}
}

pub fn format_line(outcome: &CheckOutcome) -> String {
	let status = if outcome.passed { "PASS" } else { "FAIL" };
	format!("[{}] {}: {}", status, outcome.kind.name(), outcome.message)
}

/// Runs Home, Expiries and MVP in order, handing each outcome to `on_outcome`
/// as soon as it is known. The first error from `on_outcome` stops the run.
pub async fn run_checks<F>(fetcher: &Fetcher, opts: &Opts, mut on_outcome: F) -> io::Result<Report>
where
	F: FnMut(&CheckOutcome) -> io::Result<()>,
{
	let mut report = Report::default();
	for kind in CheckKind::ALL {
		let outcome = match kind {
			CheckKind::Home => check_home(fetcher, &opts.base_url).await,
			CheckKind::Expiries => check_expiries(fetcher, &opts.base_url, &opts.symbol).await,
			CheckKind::Mvp => {
				check_mvp(fetcher, &opts.base_url, &opts.symbol, opts.strike_count).await
			}
		};
		tracing::debug!(check = kind.name(), passed = outcome.passed, "check finished");
		on_outcome(&outcome)?;
		report.outcomes.push(outcome);
	}
	Ok(report)
}
