use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::session::{Mode, SessionConfig, TimeLimit};

/// User preferences read at startup. CLI flags take precedence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "time_limit_secs")]
    pub time_limit: TimeLimit,
    pub mode: Mode,
    pub backdrop: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_limit: TimeLimit::default(),
            mode: Mode::default(),
            backdrop: true,
        }
    }
}

impl Config {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            time_limit: self.time_limit,
            mode: self.mode,
        }
    }

    /// Layers explicit overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        time_limit: Option<TimeLimit>,
        mode: Option<Mode>,
        no_backdrop: bool,
    ) -> Self {
        if let Some(t) = time_limit {
            self.time_limit = t;
        }
        if let Some(m) = mode {
            self.mode = m;
        }
        if no_backdrop {
            self.backdrop = false;
        }
        self
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "ignoring unreadable config");
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nope.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "time_limit_secs": 30, "mode": "romanized-to-symbol", "backdrop": false }"#,
        )
        .unwrap();

        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(
            cfg,
            Config {
                time_limit: TimeLimit::Thirty,
                mode: Mode::RomanizedToSymbol,
                backdrop: false,
            }
        );
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "time_limit_secs": 5 }"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.time_limit, TimeLimit::Five);
        assert_eq!(cfg.mode, Mode::SymbolToRomanized);
        assert!(cfg.backdrop);
    }

    #[test]
    fn unsupported_time_limit_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "time_limit_secs": 12 }"#).unwrap();

        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn overrides_win_over_file() {
        let cfg = Config {
            time_limit: TimeLimit::Thirty,
            mode: Mode::RomanizedToSymbol,
            backdrop: true,
        }
        .with_overrides(Some(TimeLimit::Five), None, true);

        assert_eq!(cfg.time_limit, TimeLimit::Five);
        assert_eq!(cfg.mode, Mode::RomanizedToSymbol);
        assert!(!cfg.backdrop);
        assert_eq!(
            cfg.session_config(),
            SessionConfig {
                time_limit: TimeLimit::Five,
                mode: Mode::RomanizedToSymbol
            }
        );
    }
}
