use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use wordscore_core::PollPolicy;
use wordscore_engine::ClientSettings;
use wordscore_logging::score_info;

use super::logging::LogDestination;
use super::render::PageListStyle;

pub const DEFAULT_CONFIG_FILENAME: &str = "wordscore.ron";

/// Settings read from a RON file. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub submit_path: String,
    pub status_path: String,
    pub csrf_token: Option<String>,
    pub poll_interval_ms: u64,
    /// Give up after this many status checks. `None` polls until a terminal status.
    pub max_polls: Option<u32>,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub page_list: PageListStyle,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            base_url: client.base_url,
            submit_path: client.submit_path,
            status_path: client.status_path,
            csrf_token: client.csrf_token,
            poll_interval_ms: duration_ms(PollPolicy::default().interval()),
            max_polls: None,
            connect_timeout_ms: duration_ms(client.connect_timeout),
            request_timeout_ms: duration_ms(client.request_timeout),
            page_list: PageListStyle::default(),
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            submit_path: self.submit_path.clone(),
            status_path: self.status_path.clone(),
            csrf_token: self.csrf_token.clone().filter(|token| !token.is_empty()),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(Duration::from_millis(self.poll_interval_ms), self.max_polls)
    }

    pub fn log_level(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(self.log_level.trim())
            .map_err(|_| anyhow!("invalid log_level `{}`", self.log_level))
    }
}

/// Load config from `path`. A missing file yields defaults unless `required`.
pub fn load(path: &Path, required: bool) -> Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {:?}", path));
        }
    };

    let config: AppConfig =
        ron::from_str(&content).with_context(|| format!("failed to parse config {:?}", path))?;
    score_info!("Loaded config from {:?}", path);
    Ok(config)
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_optional_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load(&temp.path().join(DEFAULT_CONFIG_FILENAME), false).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.poll_policy(), PollPolicy::default());
        assert_eq!(config.log_level().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(load(&temp.path().join("absent.ron"), true).is_err());
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(
                base_url: "http://scorer.internal:9000",
                csrf_token: Some("abc"),
                poll_interval_ms: 2000,
                max_polls: Some(30),
                page_list: Inline,
                log_destination: Off,
            )"#,
        )
        .unwrap();

        let config = load(&path, true).unwrap();
        assert_eq!(config.base_url, "http://scorer.internal:9000");
        assert_eq!(config.submit_path, "/word_score/");
        assert_eq!(config.page_list, PageListStyle::Inline);
        assert_eq!(config.log_destination, LogDestination::Off);

        let policy = config.poll_policy();
        assert_eq!(policy.interval(), Duration::from_millis(2000));
        assert_eq!(policy.max_attempts(), Some(30));

        let client = config.client_settings();
        assert_eq!(client.csrf_token.as_deref(), Some("abc"));
        assert_eq!(client.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn unparsable_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILENAME);
        fs::write(&path, "(poll_interval_ms: \"soon\")").unwrap();
        assert!(load(&path, false).is_err());
    }

    #[test]
    fn bad_log_level_is_reported() {
        let config = AppConfig {
            log_level: "chatty".to_string(),
            ..AppConfig::default()
        };
        assert!(config.log_level().is_err());
    }
}
