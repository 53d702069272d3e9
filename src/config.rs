use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Credential for the video search provider. Leave empty (or on the
    /// shipped "YOUR_API_KEY" placeholder) to browse built-in sample results
    /// without any network calls.
    #[serde(default = "default_video_api_key")]
    pub video_api_key: String,
    /// Path to the local tips collection (a JSON array of tips).
    #[serde(default = "default_tips_file")]
    pub tips_file: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter applied when RUST_LOG is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for the rolling log file written while the TUI owns the
    /// terminal. Defaults to "logs" next to the working directory.
    #[serde(default)]
    pub log_directory: Option<String>,
}

fn default_video_api_key() -> String {
    String::new()
}

fn default_tips_file() -> String {
    "tips.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            video_api_key: default_video_api_key(),
            tips_file: default_tips_file(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_directory: None,
        }
    }
}

impl AppConfig {
    /// Read `config.ron` from the working directory or, failing that, from
    /// the directory the binary lives in. No file means defaults.
    pub fn load() -> Self {
        let mut candidates = vec![PathBuf::from("config.ron")];
        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            candidates.push(dir.join("config.ron"));
        }

        for path in candidates {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match ron::from_str::<AppConfig>(&content) {
                    Ok(config) => {
                        tracing::info!(file = %path.display(), "loaded config");
                        return config;
                    }
                    Err(e) => {
                        tracing::error!(file = %path.display(), %e, "config did not parse, trying next candidate");
                    }
                }
            }
        }

        tracing::info!("no config file found, using defaults");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.video_api_key.is_empty());
        assert_eq!(config.tips_file, "tips.json");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.log_directory.is_none());
    }

    #[test]
    fn test_partial_config_fills_in_defaults() {
        let config: AppConfig = ron::from_str(r#"(video_api_key: "abc123")"#).unwrap();
        assert_eq!(config.video_api_key, "abc123");
        assert_eq!(config.tips_file, "tips.json");
    }

    #[test]
    fn test_full_config_parses() {
        let content = r#"(
            video_api_key: "key",
            tips_file: "./data/tips.json",
            logging: (
                level: "debug",
                log_directory: Some("var/log"),
            ),
        )"#;
        let config: AppConfig = ron::from_str(content).unwrap();
        assert_eq!(config.tips_file, "./data/tips.json");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.log_directory.as_deref(), Some("var/log"));
    }
}
