//! # PaceKeeper Entry Point
//!
//! Startup lives in `lib.rs` for testability; this only maps the outcome to
//! an exit code.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match pacekeeper::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "PaceKeeper stopped with an error");
            eprintln!("pacekeeper: {e}");
            ExitCode::FAILURE
        }
    }
}
