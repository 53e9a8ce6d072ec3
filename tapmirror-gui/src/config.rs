//! Mirror configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tapmirror_core::ScreenSize;

/// Top-level configuration for the mirror window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Device bridge settings.
    pub device: DeviceConfig,
    /// Window settings.
    pub display: DisplayConfig,
    /// Capture loop tuning.
    pub capture: CaptureConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

/// Device bridge settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Path or name of the `adb` executable.
    pub adb_path: String,
    /// Device serial (`adb -s`). Empty selects the only attached device.
    pub serial: String,
    /// Per-command timeout in milliseconds. 0 waits forever.
    pub timeout_ms: u64,
    /// Native screen width. 0 asks the device via `wm size`.
    pub screen_width: u16,
    /// Native screen height. 0 asks the device via `wm size`.
    pub screen_height: u16,
}

/// Window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Window title.
    pub title: String,
    /// Drawable width (frames are resized to this).
    pub width: u32,
    /// Drawable height.
    pub height: u32,
    /// Cap window updates to the monitor refresh rate.
    pub vsync: bool,
}

/// Capture loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Pause after an unchanged frame, in milliseconds.
    pub idle_sleep_ms: u64,
}

/// Logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (overridden by `RUST_LOG`).
    pub level: String,
}

// ── Defaults ─────────────────────────────────────────────────────

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            adb_path: "adb".into(),
            serial: String::new(),
            timeout_ms: 10_000,
            screen_width: 0,
            screen_height: 0,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "tapmirror".into(),
            width: 400,
            height: 855,
            vsync: true,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { idle_sleep_ms: 10 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

// ── Loading ──────────────────────────────────────────────────────

/// Where a loaded configuration came from. Logging is left to the caller
/// since the log level itself is read from the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from the file.
    File,
    /// No readable file; defaults used.
    Missing,
    /// The file did not parse; defaults used.
    Invalid(String),
}

impl MirrorConfig {
    /// Load from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> (Self, ConfigSource) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, ConfigSource::File),
                Err(e) => (Self::default(), ConfigSource::Invalid(e.to_string())),
            },
            Err(_) => (Self::default(), ConfigSource::Missing),
        }
    }

    /// Write default config to a file.
    pub fn write_default(path: &Path) -> std::io::Result<()> {
        let text = toml::to_string_pretty(&Self::default()).map_err(std::io::Error::other)?;
        std::fs::write(path, text)
    }

    /// Configured device size, if both dimensions are set.
    pub fn screen_override(&self) -> Option<ScreenSize> {
        let size = ScreenSize::new(self.device.screen_width, self.device.screen_height);
        size.is_known().then_some(size)
    }

    /// Store a device size override.
    pub fn set_screen(&mut self, size: ScreenSize) {
        self.device.screen_width = size.width;
        self.device.screen_height = size.height;
    }
}

/// Parse a `WIDTHxHEIGHT` argument such as `1080x2400`.
pub fn parse_screen_arg(value: &str) -> Result<ScreenSize, String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{value}`"))?;
    let width: u16 = w.trim().parse().map_err(|e| format!("bad width `{w}`: {e}"))?;
    let height: u16 = h.trim().parse().map_err(|e| format!("bad height `{h}`: {e}"))?;
    let size = ScreenSize::new(width, height);
    if !size.is_known() {
        return Err(format!("screen size must be non-zero, got {size}"));
    }
    Ok(size)
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let cfg = MirrorConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert!(text.contains("adb_path"));
        assert!(text.contains("idle_sleep_ms"));
    }

    #[test]
    fn roundtrip_config() {
        let cfg = MirrorConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: MirrorConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.display.width, 400);
        assert_eq!(parsed.display.height, 855);
        assert_eq!(parsed.capture.idle_sleep_ms, 10);
    }

    #[test]
    fn write_default_then_load() {
        let path = std::env::temp_dir().join(format!("tapmirror-{}.toml", std::process::id()));
        MirrorConfig::write_default(&path).unwrap();
        let (loaded, source) = MirrorConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(source, ConfigSource::File);
        assert_eq!(loaded.device.timeout_ms, 10_000);
        assert_eq!(loaded.logging.level, "info");
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let path =
            std::env::temp_dir().join(format!("tapmirror-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[device\ntimeout_ms = 5\n").unwrap();
        let (loaded, source) = MirrorConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(source, ConfigSource::Invalid(_)));
        assert_eq!(loaded.device.timeout_ms, 10_000);
    }

    #[test]
    fn missing_file_is_reported() {
        let path = std::env::temp_dir().join("tapmirror-does-not-exist.toml");
        let (loaded, source) = MirrorConfig::load(&path);
        assert_eq!(source, ConfigSource::Missing);
        assert_eq!(loaded.display.width, 400);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: MirrorConfig = toml::from_str("[device]\nserial = \"R58M\"\n").unwrap();
        assert_eq!(parsed.device.serial, "R58M");
        assert_eq!(parsed.device.adb_path, "adb");
        assert!(parsed.display.vsync);
    }

    #[test]
    fn screen_override_requires_both_dimensions() {
        let mut cfg = MirrorConfig::default();
        assert_eq!(cfg.screen_override(), None);

        cfg.device.screen_width = 1080;
        assert_eq!(cfg.screen_override(), None);

        cfg.set_screen(ScreenSize::new(1080, 2400));
        assert_eq!(cfg.screen_override(), Some(ScreenSize::new(1080, 2400)));
    }

    #[test]
    fn parses_screen_argument() {
        assert_eq!(parse_screen_arg("1080x2400"), Ok(ScreenSize::new(1080, 2400)));
        assert_eq!(parse_screen_arg("720X1600"), Ok(ScreenSize::new(720, 1600)));
        assert!(parse_screen_arg("1080").is_err());
        assert!(parse_screen_arg("0x2400").is_err());
        assert!(parse_screen_arg("axb").is_err());
    }
}
