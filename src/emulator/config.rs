// Configuration management
//
// Emulator settings and their TOML persistence.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use super::timing::TimingMode;
use crate::cpu::JamBehavior;

/// Emulator configuration
///
/// Every section falls back to its defaults when missing from the file, so a
/// partial TOML document is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorConfig {
    /// Frame timing and pacing
    pub timing: TimingConfig,

    /// CPU behavior
    pub cpu: CpuConfig,
}

/// Timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Video standard (emphasis bit layout)
    pub mode: TimingMode,

    /// Accumulated lag in milliseconds after which the emulator pauses
    /// instead of catching up
    pub pause_threshold_ms: f64,

    /// Most frames run unpainted in a single pacing step
    pub max_catch_up_frames: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            mode: TimingMode::Ntsc,
            pause_threshold_ms: 2000.0,
            max_catch_up_frames: 120,
        }
    }
}

/// CPU configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuConfig {
    /// What a KIL opcode does
    pub jam: JamBehavior,
}

impl EmulatorConfig {
    /// Load configuration from a file, falling back to defaults
    ///
    /// No file is written when loading fails.
    ///
    /// # Example
    ///
    /// ```
    /// use nes_core::EmulatorConfig;
    ///
    /// let config = EmulatorConfig::load_or_default("does-not-exist.toml");
    /// assert_eq!(config, EmulatorConfig::default());
    /// ```
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::load_from(path).unwrap_or_else(|e| {
            log::debug!("Using default configuration ({}: {})", path.display(), e);
            Self::default()
        })
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// I/O errors from reading the file, or `InvalidData` when the contents
    /// are not a valid configuration.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Save configuration to a file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nes_core::EmulatorConfig;
    ///
    /// let config = EmulatorConfig::default();
    /// config.save_to("nes-core.toml").expect("Failed to save configuration");
    /// ```
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), io::Error> {
        fs::write(path, self.to_toml()?)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, io::Error> {
        toml::from_str(contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Render configuration as TOML text
    pub fn to_toml(&self) -> Result<String, io::Error> {
        toml::to_string_pretty(self).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
