//! # Console Driver
//!
//! Reads one command per line and writes one JSON line per response. It
//! stands in for the UI/timer driver: anything that can write lines to
//! stdin can drive the controller.
//!
//! ```text
//! > start
//! {"status":"study","label":"Studying","value":1,"isBreak":false,"isRunning":true,"cycle":0}
//! > get volume 0
//! {"key":"volume","value":50}
//! > nap
//! {"error":{"code":"VALIDATION_ERROR","message":"Unknown command 'nap'. Type 'help' for a list"}}
//! ```

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::commands::{self, Command, Response};
use crate::error::{ApiError, AppResult};
use crate::state::ConfigController;

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: &'a ApiError,
}

fn render(result: &Result<Response, ApiError>) -> String {
    let rendered = match result {
        Ok(response) => serde_json::to_string(response),
        Err(error) => serde_json::to_string(&ErrorEnvelope { error }),
    };

    rendered.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to serialize response");
        r#"{"error":{"code":"INTERNAL","message":"Failed to serialize response"}}"#.to_string()
    })
}

/// Drives `controller` from `input` until `quit` or end of input.
///
/// Returns the number of commands handled (blank lines excluded).
pub async fn run_console<R, W>(
    controller: &ConfigController,
    input: R,
    mut output: W,
) -> AppResult<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut handled = 0;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        handled += 1;

        let parsed: Result<Command, ApiError> = line.parse();
        let quit = matches!(parsed, Ok(Command::Quit));

        let result = match parsed {
            Ok(command) => {
                debug!(?command, "Executing command");
                commands::execute(controller, command).await
            }
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            debug!(code = ?e.code, message = %e.message, "Command failed");
        }

        output.write_all(render(&result).as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;

        if quit {
            break;
        }
    }

    info!(handled, "Console closed");
    Ok(handled)
}

/// Runs the console, then closes the database pool.
///
/// The pool is closed on both the success and the error path.
pub async fn serve<R, W>(controller: &ConfigController, input: R, output: W) -> AppResult<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let result = run_console(controller, input, output).await;
    if let Err(e) = &result {
        warn!(error = %e, "Console stopped with an error");
    }

    controller.db().close().await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SettingsStore;
    use pacekeeper_db::DbConfig;
    use serde_json::Value;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// Output that rejects every write.
    struct BrokenPipe;

    impl AsyncWrite for BrokenPipe {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::ErrorKind::BrokenPipe.into()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    async fn controller() -> ConfigController {
        ConfigController::initialize(SettingsStore::in_memory(), DbConfig::in_memory())
            .await
            .unwrap()
    }

    async fn run(script: &str) -> (usize, Vec<Value>) {
        let controller = controller().await;
        let mut out = Vec::new();

        let handled = run_console(&controller, script.as_bytes(), &mut out)
            .await
            .unwrap();

        let lines = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (handled, lines)
    }

    #[tokio::test]
    async fn test_one_json_line_per_command() {
        let (handled, lines) = run("start\n\ncycle\n# comment\nstatus\n").await;

        assert_eq!(handled, 3);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2]["status"], "study");
        assert_eq!(lines[2]["cycle"], 1);
        assert_eq!(lines[2]["isRunning"], true);
    }

    #[tokio::test]
    async fn test_errors_are_reported_and_loop_continues() {
        let (_, lines) = run("nap\nstatus\n").await;

        assert_eq!(lines[0]["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(lines[1]["status"], "wait");
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let (handled, lines) = run("status\nquit\nstart\n").await;

        assert_eq!(handled, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["message"], "bye");
    }

    #[tokio::test]
    async fn test_serve_closes_pool_after_output_error() {
        let controller = controller().await;

        let err = serve(&controller, "status\n".as_bytes(), BrokenPipe)
            .await
            .unwrap_err();

        assert!(matches!(err, crate::error::AppError::Io(_)));
        assert!(!controller.db().health_check().await);
    }

    #[tokio::test]
    async fn test_serve_closes_pool_at_end_of_input() {
        let controller = controller().await;
        let mut out = Vec::new();

        let handled = serve(&controller, "status\n".as_bytes(), &mut out)
            .await
            .unwrap();

        assert_eq!(handled, 1);
        assert!(!controller.db().health_check().await);
    }
}
