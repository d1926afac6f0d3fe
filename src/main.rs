use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use warta_import::interfaces::cli::{self, Args};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    // Signal a missing CSV path as exit code 1 rather than clap's default 2;
    // help and version output still exit cleanly.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match cli::run(args).await {
        // Per-row failures are advisory for this tool; the summary log carries
        // the counts and the run still exits 0.
        Ok(_report) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("CSV import failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
