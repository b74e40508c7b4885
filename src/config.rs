//! Configuration loading.
//!
//! All user-tunable settings are centralized here and loaded from
//! `conf/config.toml` if present. Any missing or invalid entries fall back
//! to sensible defaults so the app can still launch.

use crate::visibility::WatcherParams;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
    #[serde(default = "default_section_height")]
    pub section_height: f32,
    #[serde(default = "default_row_offset")]
    pub row_offset: f32,
    #[serde(default = "default_header_allowance")]
    pub header_allowance: f32,
    #[serde(default = "default_marker_size")]
    pub marker_size: f32,
    #[serde(default = "default_marker_gap")]
    pub marker_gap: f32,
    #[serde(default = "default_step_duration_ms")]
    pub step_duration_ms: u64,
    #[serde(default = "default_min_scroll_delta")]
    pub min_scroll_delta: f32,
    #[serde(default = "default_direction_trust_ms")]
    pub direction_trust_ms: u64,
    #[serde(default = "default_enter_threshold")]
    pub enter_threshold: f32,
    #[serde(default = "default_exit_threshold")]
    pub exit_threshold: f32,
    #[serde(default = "default_ratio_gap")]
    pub ratio_gap: f32,
    #[serde(default = "default_dwell_ms")]
    pub dwell_ms: u64,
    #[serde(default = "default_skip_ahead_ratio")]
    pub skip_ahead_ratio: f32,
    #[serde(default = "default_fallback_ratio")]
    pub fallback_ratio: f32,
    #[serde(default = "default_margin_fraction")]
    pub margin_fraction: f32,
    #[serde(default = "default_scroll_idle_ms")]
    pub scroll_idle_ms: u64,
    #[serde(default = "default_compact_header_after")]
    pub compact_header_after: f32,
    #[serde(default = "default_scroll_top_after")]
    pub scroll_top_after: f32,
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            theme: ThemeMode::default(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            section_height: default_section_height(),
            row_offset: default_row_offset(),
            header_allowance: default_header_allowance(),
            marker_size: default_marker_size(),
            marker_gap: default_marker_gap(),
            step_duration_ms: default_step_duration_ms(),
            min_scroll_delta: default_min_scroll_delta(),
            direction_trust_ms: default_direction_trust_ms(),
            enter_threshold: default_enter_threshold(),
            exit_threshold: default_exit_threshold(),
            ratio_gap: default_ratio_gap(),
            dwell_ms: default_dwell_ms(),
            skip_ahead_ratio: default_skip_ahead_ratio(),
            fallback_ratio: default_fallback_ratio(),
            margin_fraction: default_margin_fraction(),
            scroll_idle_ms: default_scroll_idle_ms(),
            compact_header_after: default_compact_header_after(),
            scroll_top_after: default_scroll_top_after(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    pub fn step_duration(&self) -> Duration {
        Duration::from_millis(self.step_duration_ms)
    }

    pub fn scroll_idle(&self) -> Duration {
        Duration::from_millis(self.scroll_idle_ms)
    }

    pub fn watcher_params(&self) -> WatcherParams {
        WatcherParams {
            min_scroll_delta: self.min_scroll_delta,
            direction_trust: Duration::from_millis(self.direction_trust_ms),
            enter_threshold: self.enter_threshold,
            exit_threshold: self.exit_threshold,
            ratio_gap: self.ratio_gap,
            dwell: Duration::from_millis(self.dwell_ms),
            skip_ahead_ratio: self.skip_ahead_ratio,
            fallback_ratio: self.fallback_ratio,
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Day,
    Night,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Day
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err}");
            AppConfig::default()
        }
    }
}

fn default_window_width() -> f32 {
    1280.0
}

fn default_window_height() -> f32 {
    900.0
}

fn default_section_height() -> f32 {
    760.0
}

fn default_row_offset() -> f32 {
    96.0
}

fn default_header_allowance() -> f32 {
    80.0
}

fn default_marker_size() -> f32 {
    12.0
}

fn default_marker_gap() -> f32 {
    6.0
}

fn default_step_duration_ms() -> u64 {
    200
}

fn default_min_scroll_delta() -> f32 {
    2.0
}

fn default_direction_trust_ms() -> u64 {
    260
}

fn default_enter_threshold() -> f32 {
    0.58
}

fn default_exit_threshold() -> f32 {
    0.38
}

fn default_ratio_gap() -> f32 {
    0.1
}

fn default_dwell_ms() -> u64 {
    120
}

fn default_skip_ahead_ratio() -> f32 {
    0.7
}

fn default_fallback_ratio() -> f32 {
    0.5
}

fn default_margin_fraction() -> f32 {
    0.1
}

fn default_scroll_idle_ms() -> u64 {
    140
}

fn default_compact_header_after() -> f32 {
    50.0
}

fn default_scroll_top_after() -> f32 {
    500.0
}

fn default_log_level() -> LogLevel {
    LogLevel::Debug
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Debug
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").expect("empty config parses");
        assert_eq!(cfg.step_duration(), Duration::from_millis(200));
        assert_eq!(cfg.theme, ThemeMode::Day);
        assert!((cfg.enter_threshold - 0.58).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_overrides_keep_remaining_defaults() {
        let cfg: AppConfig =
            toml::from_str("theme = \"night\"\nstep_duration_ms = 150\ndwell_ms = 90\n")
                .expect("partial config parses");
        assert_eq!(cfg.theme, ThemeMode::Night);
        assert_eq!(cfg.step_duration(), Duration::from_millis(150));
        assert_eq!(cfg.watcher_params().dwell, Duration::from_millis(90));
        assert!((cfg.fallback_ratio - 0.5).abs() < f32::EPSILON);
    }
}
