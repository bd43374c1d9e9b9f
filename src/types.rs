// src/types.rs
use serde::{Deserialize, Serialize};

/// Outer frequency bounds the instrument can ever display.
pub const GLOBAL_RANGE: FrequencyRange = FrequencyRange {
    min_hz: 300e6,
    max_hz: 18e9,
};

// Tags attached to viewport changes
pub const SOURCE_INIT: &str = "init";
pub const SOURCE_UI: &str = "ui";
pub const SOURCE_PROGRAMMATIC: &str = "programmatic";

/// Closed frequency interval in hertz.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrequencyRange {
    pub min_hz: f64,
    pub max_hz: f64,
}

impl FrequencyRange {
    pub const fn new(min_hz: f64, max_hz: f64) -> Self {
        Self { min_hz, max_hz }
    }

    pub fn span_hz(&self) -> f64 {
        self.max_hz - self.min_hz
    }

    /// Order the bounds and clamp both into `bounds`.
    pub fn normalized_within(&self, bounds: FrequencyRange) -> Self {
        let (lo, hi) = if self.max_hz < self.min_hz {
            (self.max_hz, self.min_hz)
        } else {
            (self.min_hz, self.max_hz)
        };
        Self {
            min_hz: lo.clamp(bounds.min_hz, bounds.max_hz),
            max_hz: hi.clamp(bounds.min_hz, bounds.max_hz),
        }
    }
}

impl Default for FrequencyRange {
    fn default() -> Self {
        GLOBAL_RANGE
    }
}

// Sent to viewport observers after a committed change
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportChange {
    pub range: FrequencyRange,
    pub source_tag: String,
}

// Echo emitted by band controls
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandState {
    pub band_id: i32,
    pub center_hz: f64,
    pub width_hz: f64,
    pub threshold_db: f64,
    pub enabled: bool,
}

// Application mode, persisted as its integer value
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum AppMode {
    #[default]
    Test = 0,
    Combat = 1,
    Control = 2,
}

impl From<i32> for AppMode {
    /// Unknown values fall back to [`AppMode::Test`].
    fn from(raw: i32) -> Self {
        match raw {
            1 => AppMode::Combat,
            2 => AppMode::Control,
            _ => AppMode::Test,
        }
    }
}

impl From<AppMode> for i32 {
    fn from(mode: AppMode) -> Self {
        mode as i32
    }
}
