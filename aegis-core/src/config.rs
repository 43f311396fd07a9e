use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::{DEFAULT_CONVERSATION_DELAY, DEFAULT_SEARCH_DELAY};
use crate::error::{AegisError, Result};
use crate::model::{SearchFilters, DEFAULT_MIN_RELEVANCE};
use crate::navigation::Module;
use crate::search::FilterPolicy;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "AEGIS_CONFIG";

/// Dashboard configuration, read from ~/.aegis/config.toml
///
/// Every field has a default, so a missing file or a partial file is fine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AegisConfig {
    pub conversation: ConversationConfig,
    pub search: SearchConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    /// Simulated reply latency
    pub response_delay_ms: u64,
    /// Per-request deadline; 0 waits indefinitely
    pub request_timeout_ms: u64,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: DEFAULT_CONVERSATION_DELAY.as_millis() as u64,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub response_delay_ms: u64,
    /// 0 waits indefinitely
    pub request_timeout_ms: u64,
    /// `display-only` or `refilter`
    pub filter_policy: FilterPolicy,
    /// Initial relevance threshold
    pub min_relevance: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: DEFAULT_SEARCH_DELAY.as_millis() as u64,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            filter_policy: FilterPolicy::DisplayOnly,
            min_relevance: DEFAULT_MIN_RELEVANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Event poll interval for the terminal UI
    pub tick_rate_ms: u64,
    /// Module shown at startup; unknown ids mean overview
    pub start_module: String,
    pub sidebar_collapsed: bool,
    /// Where the terminal UI writes its log (default ~/.aegis/aegis.log)
    pub log_file: Option<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            start_module: Module::Overview.id().to_string(),
            sidebar_collapsed: false,
            log_file: None,
        }
    }
}

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

fn timeout_from_millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

impl ConversationConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }

    pub fn deadline(&self) -> Option<Duration> {
        timeout_from_millis(self.request_timeout_ms)
    }
}

impl SearchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }

    pub fn deadline(&self) -> Option<Duration> {
        timeout_from_millis(self.request_timeout_ms)
    }

    /// Filter selection a fresh search panel starts with
    pub fn initial_filters(&self) -> SearchFilters {
        SearchFilters {
            min_relevance: self.min_relevance.clamp(0.0, 1.0),
            ..SearchFilters::default()
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }

    pub fn start_module(&self) -> Module {
        Module::from_id_or_default(&self.start_module)
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| AegisConfig::home_dir().join("aegis.log"))
    }
}

impl AegisConfig {
    /// Load from `$AEGIS_CONFIG` or ~/.aegis/config.toml, defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path, defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let mut config: Self =
            toml::from_str(&content).map_err(|e| AegisError::config_parse(path, e))?;
        config.expand_variables();
        config.validate()?;
        Ok(config)
    }

    /// ~/.aegis
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".aegis")
    }

    /// Config file path: `$AEGIS_CONFIG` or ~/.aegis/config.toml
    pub fn config_path() -> PathBuf {
        env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| Self::home_dir().join("config.toml"))
    }

    /// Reject values no component can work with
    pub fn validate(&self) -> Result<()> {
        let threshold = self.search.min_relevance;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(AegisError::config(format!(
                "search.min_relevance must be within [0, 1], got {}",
                threshold
            )));
        }
        Ok(())
    }

    /// Expand ${HOME} / ${AEGIS_HOME} in paths
    fn expand_variables(&mut self) {
        let mut vars = HashMap::new();
        vars.insert("HOME".to_string(), env::var("HOME").unwrap_or_default());
        vars.insert("AEGIS_HOME".to_string(), Self::home_dir().display().to_string());

        if let Some(ref log_file) = self.ui.log_file {
            let expanded = Self::expand_string(&log_file.display().to_string(), &vars);
            self.ui.log_file = Some(PathBuf::from(expanded));
        }
    }

    fn expand_string(s: &str, vars: &HashMap<String, String>) -> String {
        let mut result = s.to_string();

        for (key, value) in vars {
            let pattern = format!("${{{}}}", key);
            result = result.replace(&pattern, value);
        }

        result
    }

    /// Write as pretty TOML, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AegisConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AegisConfig::default());
        assert_eq!(config.conversation.delay(), Duration::from_millis(2000));
        assert_eq!(config.search.delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[search]\nfilter_policy = \"refilter\"\n\n[ui]\nstart_module = \"mystery\"\n",
        )
        .unwrap();

        let config = AegisConfig::load_from(&path).unwrap();
        assert_eq!(config.search.filter_policy, FilterPolicy::Refilter);
        assert_eq!(config.search.response_delay_ms, 1500);
        assert_eq!(config.ui.start_module(), Module::Overview);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AegisConfig::default();
        config.ui.sidebar_collapsed = true;
        config.conversation.request_timeout_ms = 5_000;
        config.search.request_timeout_ms = 0;
        config.save_to(&path).unwrap();

        let loaded = AegisConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.conversation.deadline(), Some(Duration::from_millis(5_000)));
        assert_eq!(loaded.search.deadline(), None);
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[conversation]\nrequest_timeout_ms = 0\n").unwrap();

        let config = AegisConfig::load_from(&path).unwrap();
        assert_eq!(config.conversation.deadline(), None);
        assert_eq!(config.search.deadline(), Some(Duration::from_millis(30_000)));
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[search\nfilter_policy = ").unwrap();
        let err = AegisConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, AegisError::ConfigParse { .. }));
    }

    #[test]
    fn test_out_of_range_relevance_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[search]\nmin_relevance = 1.5\n").unwrap();
        assert!(matches!(
            AegisConfig::load_from(&path),
            Err(AegisError::Config { .. })
        ));
    }
}
