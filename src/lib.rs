//! Smoke test for a running GEX dashboard server.

pub mod checks;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod report;

pub use checks::{CheckKind, CheckOutcome};
pub use config::{Opts, OutputFormat};
pub use errors::{SmokeError, SmokeResult};
pub use fetch::{FetchedResponse, Fetcher};
pub use report::{run_checks, Report};
