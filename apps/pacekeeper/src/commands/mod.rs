//! # Commands Module
//!
//! Everything a UI or timer driver can ask of the controller.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (parsing + dispatch)
//! ├── status.rs    ◄─── start, stop, status, set-status, cycle
//! ├── settings.rs  ◄─── get, set, settings
//! └── history.rs   ◄─── history
//! ```
//!
//! ## Command Flow
//! ```text
//! "set volume 5"
//!      │  Command::from_str
//!      ▼
//! Command::Set { key: "volume", value: 5 }
//!      │  execute(&controller, command)
//!      ▼
//! Response::Setting(SettingDto { key: "volume", value: 5 })
//!      │  serde_json
//!      ▼
//! {"key":"volume","value":5}
//! ```

pub mod history;
pub mod settings;
pub mod status;

use pacekeeper_core::{AppStatus, SessionRecord, Settings};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::state::ConfigController;

use self::settings::SettingDto;
use self::status::{StatusDto, StopDto};

/// Usage text for `help`.
pub const HELP: &str = "commands: start | stop | status | set-status <wait|study|short_break|long_break> \
| cycle | get <key> [default] | set <key> <value> | settings | history [n] | help | quit";

/// A parsed driver request.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start,
    Stop,
    Status,
    SetStatus(AppStatus),
    Cycle,
    Get { key: String, default: Value },
    Set { key: String, value: Value },
    Settings,
    History { limit: u32 },
    Help,
    Quit,
}

/// A command's successful result.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Status(StatusDto),
    Stopped(StopDto),
    Setting(SettingDto),
    Settings(Settings),
    History(Vec<SessionRecord>),
    Message { message: &'static str },
}

/// Reads a command-line value: JSON when it parses, otherwise a plain string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

impl std::str::FromStr for Command {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let no_args = |command: Command| {
            if rest.is_empty() {
                Ok(command)
            } else {
                Err(ApiError::validation(format!("'{}' takes no arguments", name)))
            }
        };

        match name.to_lowercase().as_str() {
            "start" => no_args(Command::Start),
            "stop" => no_args(Command::Stop),
            "status" => no_args(Command::Status),
            "cycle" => no_args(Command::Cycle),
            "settings" => no_args(Command::Settings),
            "help" => no_args(Command::Help),
            "quit" | "exit" => no_args(Command::Quit),
            "set-status" => {
                if rest.is_empty() {
                    return Err(ApiError::validation("usage: set-status <status>"));
                }
                Ok(Command::SetStatus(rest.parse()?))
            }
            "get" => {
                let (key, default) = match rest.split_once(char::is_whitespace) {
                    Some((key, default)) => (key, parse_value(default.trim())),
                    None => (rest, Value::Null),
                };
                if key.is_empty() {
                    return Err(ApiError::validation("usage: get <key> [default]"));
                }
                Ok(Command::Get {
                    key: key.to_string(),
                    default,
                })
            }
            "set" => match rest.split_once(char::is_whitespace) {
                Some((key, value)) => Ok(Command::Set {
                    key: key.to_string(),
                    value: parse_value(value.trim()),
                }),
                None => Err(ApiError::validation("usage: set <key> <value>")),
            },
            "history" => {
                let limit = if rest.is_empty() {
                    history::DEFAULT_HISTORY_LIMIT
                } else {
                    rest.parse().map_err(|_| {
                        ApiError::validation(format!("history limit must be a number, got '{}'", rest))
                    })?
                };
                Ok(Command::History { limit })
            }
            "" => Err(ApiError::validation("empty command")),
            other => Err(ApiError::validation(format!(
                "Unknown command '{}'. Type 'help' for a list",
                other
            ))),
        }
    }
}

/// Runs one command against the controller.
///
/// `Quit` is the driver's business; here it only acknowledges.
pub async fn execute(controller: &ConfigController, command: Command) -> Result<Response, ApiError> {
    let response = match command {
        Command::Start => Response::Status(status::start(controller)),
        Command::Stop => Response::Stopped(status::stop(controller).await?),
        Command::Status => Response::Status(status::get_status(controller)),
        Command::SetStatus(new_status) => {
            Response::Status(status::set_status(controller, new_status))
        }
        Command::Cycle => Response::Status(status::complete_cycle(controller)),
        Command::Get { key, default } => {
            Response::Setting(settings::get_setting(controller, &key, default))
        }
        Command::Set { key, value } => {
            Response::Setting(settings::set_setting(controller, &key, value)?)
        }
        Command::Settings => Response::Settings(settings::get_settings(controller)),
        Command::History { limit } => {
            Response::History(history::recent_sessions(controller, limit).await?)
        }
        Command::Help => Response::Message { message: HELP },
        Command::Quit => Response::Message { message: "bye" },
    };

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("start".parse::<Command>().unwrap(), Command::Start);
        assert_eq!("  STOP ".parse::<Command>().unwrap(), Command::Stop);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
        assert!("start now".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_set_status() {
        assert_eq!(
            "set-status long_break".parse::<Command>().unwrap(),
            Command::SetStatus(AppStatus::LongBreak)
        );
        assert!("set-status".parse::<Command>().is_err());
        assert!("set-status nap".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_get_and_set() {
        assert_eq!(
            "get volume 0".parse::<Command>().unwrap(),
            Command::Get {
                key: "volume".into(),
                default: json!(0)
            }
        );
        assert_eq!(
            "get theme".parse::<Command>().unwrap(),
            Command::Get {
                key: "theme".into(),
                default: Value::Null
            }
        );
        assert_eq!(
            "set volume 5".parse::<Command>().unwrap(),
            Command::Set {
                key: "volume".into(),
                value: json!(5)
            }
        );
        assert_eq!(
            "set theme solarized dark".parse::<Command>().unwrap(),
            Command::Set {
                key: "theme".into(),
                value: json!("solarized dark")
            }
        );
        assert_eq!(
            r#"set sounds {"alarm": "bell"}"#.parse::<Command>().unwrap(),
            Command::Set {
                key: "sounds".into(),
                value: json!({"alarm": "bell"})
            }
        );
        assert!("set volume".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_history() {
        assert_eq!(
            "history".parse::<Command>().unwrap(),
            Command::History {
                limit: history::DEFAULT_HISTORY_LIMIT
            }
        );
        assert_eq!(
            "history 3".parse::<Command>().unwrap(),
            Command::History { limit: 3 }
        );
        assert!("history lots".parse::<Command>().is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = "sleep".parse::<Command>().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        assert!(err.message.contains("sleep"));
    }
}
