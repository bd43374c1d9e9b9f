// src/config.rs
use std::fs;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use crate::drivers::ScopeError;
use crate::types::{AppMode, GLOBAL_RANGE};

/// Persisted session settings. Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    pub mode: AppMode,
    pub viewport_min_hz: f64,
    pub viewport_max_hz: f64,
    pub plot_width: u32,
    pub plot_height: u32,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            mode: AppMode::Test,
            viewport_min_hz: GLOBAL_RANGE.min_hz,
            viewport_max_hz: GLOBAL_RANGE.max_hz,
            plot_width: 900,
            plot_height: 400,
        }
    }
}

impl ScopeConfig {
    /// Read settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ScopeError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => return Err(ScopeError::config(path, err)),
        };
        let config: Self = serde_json::from_str(&text).map_err(|e| ScopeError::config(path, e))?;
        info!("loaded config from {} (mode {:?})", path.display(), config.mode);
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ScopeError> {
        let text = serde_json::to_string_pretty(self).map_err(|e| ScopeError::config(path, e))?;
        fs::write(path, text).map_err(|e| ScopeError::config(path, e))?;
        info!("saved config to {}", path.display());
        Ok(())
    }
}

/// Current application mode with change notification.
#[derive(Debug, Default)]
pub struct ModeState {
    mode: AppMode,
    subscribers: Vec<Sender<AppMode>>,
}

impl ModeState {
    pub fn new(mode: AppMode) -> Self {
        Self {
            mode,
            subscribers: Vec::new(),
        }
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    /// Returns `false` and notifies nobody when `mode` is already current.
    pub fn set_mode(&mut self, mode: AppMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        debug!("mode -> {mode:?}");
        // Drop subscribers whose receiver is gone.
        self.subscribers.retain(|tx| tx.send(mode).is_ok());
        true
    }

    pub fn subscribe(&mut self) -> Receiver<AppMode> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sirius-scope-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = ScopeConfig::load(&temp_path("missing")).unwrap();
        assert_eq!(config, ScopeConfig::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let path = temp_path("roundtrip");
        let config = ScopeConfig {
            mode: AppMode::Control,
            viewport_min_hz: 1e9,
            viewport_max_hz: 2e9,
            plot_width: 640,
            plot_height: 200,
        };
        config.save(&path).unwrap();
        let loaded = ScopeConfig::load(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn out_of_range_mode_and_missing_keys_fall_back() {
        let config: ScopeConfig = serde_json::from_str(r#"{"mode": 9, "plot_width": 320}"#).unwrap();
        assert_eq!(config.mode, AppMode::Test);
        assert_eq!(config.plot_width, 320);
        assert_eq!(config.viewport_max_hz, GLOBAL_RANGE.max_hz);
    }

    #[test]
    fn malformed_file_reports_path() {
        let path = temp_path("malformed");
        fs::write(&path, "{ not json").unwrap();
        let err = ScopeConfig::load(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, ScopeError::Config { ref path, .. } if path.ends_with(
            format!("sirius-scope-{}-malformed.json", std::process::id())
        )));
    }

    #[test]
    fn mode_state_notifies_only_on_change() {
        let mut state = ModeState::default();
        let rx = state.subscribe();
        assert!(!state.set_mode(AppMode::Test));
        assert!(state.set_mode(AppMode::Combat));
        assert!(!state.set_mode(AppMode::Combat));
        assert_eq!(state.mode(), AppMode::Combat);
        assert_eq!(rx.try_recv().unwrap(), AppMode::Combat);
        assert!(rx.try_recv().is_err());
    }
}
