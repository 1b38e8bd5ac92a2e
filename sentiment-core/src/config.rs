use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Page wiring knobs. Every field has a default, so a partial JSON block is enough.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub theme_storage_key: String,
    pub autosave_storage_key: String,
    pub theme_toggle_id: String,
    pub theme_icon_id: String,
    pub autosave_input_id: String,
    pub upload_area_selector: String,
    pub reveal_selector: String,
    pub fade_selector: String,
    pub counter_selector: String,
    pub autosave_debounce_ms: u32,
    pub toast_duration_ms: u32,
    pub counter_duration_ms: u32,
    pub chart_animation_ms: u32,
    /// One of error, warn, info, debug, trace.
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            theme_storage_key: "theme".into(),
            autosave_storage_key: "auto_saved_text".into(),
            theme_toggle_id: "themeToggle".into(),
            theme_icon_id: "themeIcon".into(),
            autosave_input_id: "textInput".into(),
            upload_area_selector: ".upload-area".into(),
            reveal_selector: ".glass-card, .stat-card, .chart-container".into(),
            fade_selector: ".animate-on-scroll".into(),
            counter_selector: ".stat-number".into(),
            autosave_debounce_ms: 1_000,
            toast_duration_ms: crate::toast::DEFAULT_TOAST_MS,
            counter_duration_ms: 2_000,
            chart_animation_ms: 1_000,
            log_level: "info".into(),
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PageConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.theme_storage_key.is_empty() || self.autosave_storage_key.is_empty() {
            return Err(ConfigError::Invalid("storage keys must not be empty".into()));
        }
        if self.theme_storage_key == self.autosave_storage_key {
            return Err(ConfigError::Invalid(
                "theme and auto-save storage keys must differ".into(),
            ));
        }
        if self.toast_duration_ms == 0 {
            return Err(ConfigError::Invalid("toast_duration_ms must be > 0".into()));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<log::Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("unknown log level {:?}", self.log_level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = PageConfig::from_json(r#"{"autosave_debounce_ms": 250}"#).unwrap();
        assert_eq!(cfg.autosave_debounce_ms, 250);
        assert_eq!(cfg.theme_storage_key, "theme");
        assert_eq!(cfg.toast_duration_ms, 5_000);
        assert_eq!(cfg.log_level().unwrap(), log::Level::Info);
    }

    #[test]
    fn colliding_keys_are_rejected() {
        let err = PageConfig::from_json(
            r#"{"theme_storage_key": "k", "autosave_storage_key": "k"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn bad_level_and_bad_json_fail() {
        assert!(PageConfig::from_json(r#"{"log_level": "loud"}"#).is_err());
        assert!(matches!(
            PageConfig::from_json("{"),
            Err(ConfigError::Parse(_))
        ));
    }
}
