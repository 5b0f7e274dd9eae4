//=========================================================================
// Application Configuration
//=========================================================================
//
// RON-backed settings for every tunable the application core exposes.
// Every section is `#[serde(default)]`, so a config file only needs the
// fields it changes.
//
// ```ron
// (
//     window: (title: "Demo", width: 1280, height: 720),
//     bindings: (restart: F5),
//     clock: (fixed_delta_seconds: Some(0.016)),
// )
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glam::Vec2;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::clock::ClockConfig;
use crate::core::game::{AudioCueConfig, KeyBindings};
use crate::core::render::{Aabb2, Rgba8};
use crate::core::subsystem::DisplayMode;

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

//=== AppConfig ===========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub clock: ClockConfig,
    pub bindings: KeyBindings,
    pub audio: AudioCueConfig,
    pub render: RenderConfig,
}

impl AppConfig {
    /// Parses and validates.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the runtime cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| Err(ConfigError::Invalid(message));
        let clock = &self.clock;

        if self.window.width == 0 || self.window.height == 0 {
            return invalid(format!(
                "window size must be positive, got {}x{}",
                self.window.width, self.window.height
            ));
        }
        if !(clock.nominal_frame_seconds.is_finite() && clock.nominal_frame_seconds > 0.0) {
            return invalid(format!(
                "clock.nominal_frame_seconds must be positive, got {}",
                clock.nominal_frame_seconds
            ));
        }
        if !(clock.max_delta_seconds.is_finite() && clock.max_delta_seconds > 0.0) {
            return invalid(format!(
                "clock.max_delta_seconds must be positive, got {}",
                clock.max_delta_seconds
            ));
        }
        if let Some(fixed) = clock.fixed_delta_seconds {
            if !(fixed.is_finite() && fixed >= 0.0) {
                return invalid(format!(
                    "clock.fixed_delta_seconds must not be negative, got {}",
                    fixed
                ));
            }
        }
        let scale = self.bindings.slow_motion_scale;
        if !(scale.is_finite() && scale >= 0.0) {
            return invalid(format!(
                "bindings.slow_motion_scale must not be negative, got {}",
                scale
            ));
        }
        Ok(())
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match Self::load(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                info!(target: "app", "No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }
}

//=== Sections ============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub display_mode: DisplayMode,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::from("Aetheric Runtime"),
            width: 1600,
            height: 800,
            display_mode: DisplayMode::Windowed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub clear_color: Rgba8,

    /// Screen-space strip the developer console draws into.
    pub console_mins: Vec2,
    pub console_maxs: Vec2,
}

impl RenderConfig {
    pub fn console_bounds(&self) -> Aabb2 {
        Aabb2::new(self.console_mins, self.console_maxs)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: Rgba8::GREY,
            console_mins: Vec2::ZERO,
            console_maxs: Vec2::new(1600.0, 30.0),
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;

    #[test]
    fn empty_document_is_all_defaults() {
        let config = AppConfig::from_ron_str("()").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_ron_str(
            r#"(
                window: (title: "Demo", display_mode: Fullscreen),
                bindings: (restart: F5),
                clock: (fixed_delta_seconds: Some(0.5)),
            )"#,
        )
        .unwrap();

        assert_eq!(config.window.title, "Demo");
        assert_eq!(config.window.width, 1600);
        assert_eq!(config.window.display_mode, DisplayMode::Fullscreen);
        assert_eq!(config.bindings.restart, KeyCode::F5);
        assert_eq!(config.bindings.activate, KeyCode::Space);
        assert_eq!(config.clock.fixed_delta_seconds, Some(0.5));
        assert_eq!(config.render.clear_color, Rgba8::GREY);
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut config = AppConfig::default();
        config.window.height = 600;
        config.audio.running.volume = 0.25;

        let text = config.to_ron_string().unwrap();
        assert_eq!(AppConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn malformed_document_is_parse_error() {
        let err = AppConfig::from_ron_str("(window: (width: \"wide\"))").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_nominal_frame_is_rejected() {
        let err = AppConfig::from_ron_str("(clock: (nominal_frame_seconds: 0.0))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref m) if m.contains("nominal_frame_seconds")));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for source in [
            "(clock: (max_delta_seconds: -1.0))",
            "(clock: (fixed_delta_seconds: Some(-0.5)))",
            "(window: (width: 0))",
            "(bindings: (slow_motion_scale: -0.1))",
        ] {
            let err = AppConfig::from_ron_str(source).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{source} gave {err:?}");
        }
    }

    #[test]
    fn invalid_file_is_an_error_not_a_panic() {
        let path = std::env::temp_dir().join(format!("aetheric_invalid_{}.ron", std::process::id()));
        std::fs::write(&path, "(clock: (nominal_frame_seconds: 0.0))").unwrap();

        let result = AppConfig::load_or_default(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_or_default("definitely/not/here.ron").unwrap();
        assert_eq!(config, AppConfig::default());

        let err = AppConfig::load("definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn default_console_strip() {
        let bounds = RenderConfig::default().console_bounds();
        assert_eq!(bounds.mins, Vec2::ZERO);
        assert_eq!(bounds.maxs, Vec2::new(1600.0, 30.0));
    }
}
