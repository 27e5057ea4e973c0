//! # Settings Commands
//!
//! Read and change user settings.

use pacekeeper_core::Settings;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::state::ConfigController;

/// A single setting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingDto {
    pub key: String,
    pub value: Value,
}

/// Reads one key, falling back to `default`.
pub fn get_setting(controller: &ConfigController, key: &str, default: Value) -> SettingDto {
    debug!(%key, "get_setting command");
    SettingDto {
        key: key.to_string(),
        value: controller.get_setting(key, default),
    }
}

/// Writes one key and persists it.
pub fn set_setting(
    controller: &ConfigController,
    key: &str,
    value: Value,
) -> Result<SettingDto, ApiError> {
    debug!(%key, "set_setting command");
    if key.is_empty() {
        return Err(ApiError::validation("Setting key must not be empty"));
    }

    let mut update = Settings::new();
    update.insert(key, value);
    controller.update_settings(update)?;

    Ok(get_setting(controller, key, Value::Null))
}

/// All settings.
pub fn get_settings(controller: &ConfigController) -> Settings {
    debug!("get_settings command");
    controller.settings()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SettingsStore;
    use pacekeeper_db::DbConfig;
    use serde_json::json;

    async fn controller() -> ConfigController {
        ConfigController::initialize(SettingsStore::in_memory(), DbConfig::in_memory())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let c = controller().await;

        let dto = set_setting(&c, "volume", json!(5)).unwrap();
        assert_eq!(dto.value, json!(5));

        let dto = get_setting(&c, "volume", json!(0));
        assert_eq!(dto.value, json!(5));
    }

    #[tokio::test]
    async fn test_missing_key_returns_default() {
        let c = controller().await;
        assert_eq!(get_setting(&c, "missing", json!(-1)).value, json!(-1));
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let c = controller().await;
        assert!(set_setting(&c, "", json!(1)).is_err());
    }

    #[tokio::test]
    async fn test_get_settings_includes_defaults() {
        let c = controller().await;
        let all = get_settings(&c);
        assert_eq!(all.get_as::<u64>("long_break"), Some(15));
    }
}
