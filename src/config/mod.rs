// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for STICKWORK.
//!
//! Practice settings are loaded once at startup from a YAML file. Runtime
//! changes made through the UI are deliberately not written back.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::session::{AdvanceMode, MAX_REPEATS, MIN_REPEATS};
use crate::timing::{ClickPolicy, Subdivision, TimeSignature};

/// Root configuration for a practice session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PracticeFile {
    /// Practice settings
    pub practice: PracticeConfig,
}

impl PracticeFile {
    /// Load a practice configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a practice configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }
}

impl Default for PracticeFile {
    fn default() -> Self {
        Self {
            practice: PracticeConfig::default(),
        }
    }
}

/// Practice settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PracticeConfig {
    /// Tempo in BPM
    #[serde(default = "default_bpm")]
    pub bpm: f64,
    /// Note subdivision name ("quarter", "eighth", "triplet", ...)
    #[serde(default = "default_subdivision")]
    pub subdivision: String,
    /// Time signature label ("4/4", "3/4", "2/4", "6/8")
    #[serde(default = "default_time_signature")]
    pub time_signature: String,
    /// Two-measure cycle span
    #[serde(default = "default_two_measure")]
    pub two_measure: bool,
    /// Click policy ("every-note" or "quarter-only")
    #[serde(default = "default_click")]
    pub click: String,
    /// Master volume (0.0 - 1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Cycles played per pattern before advancing
    #[serde(default = "default_repeats")]
    pub repeats: u32,
    /// Advance mode ("sequential" or "random")
    #[serde(default = "default_advance")]
    pub advance: String,
    /// Combined pattern index to start from
    #[serde(default)]
    pub start_index: u64,
}

fn default_bpm() -> f64 {
    120.0
}
fn default_subdivision() -> String {
    "sixteenth".to_string()
}
fn default_time_signature() -> String {
    "4/4".to_string()
}
fn default_two_measure() -> bool {
    true
}
fn default_click() -> String {
    "every-note".to_string()
}
fn default_volume() -> f32 {
    0.8
}
fn default_repeats() -> u32 {
    4
}
fn default_advance() -> String {
    "sequential".to_string()
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            bpm: default_bpm(),
            subdivision: default_subdivision(),
            time_signature: default_time_signature(),
            two_measure: default_two_measure(),
            click: default_click(),
            volume: default_volume(),
            repeats: default_repeats(),
            advance: default_advance(),
            start_index: 0,
        }
    }
}

impl PracticeConfig {
    /// Resolved subdivision, falling back to sixteenths
    pub fn subdivision(&self) -> Subdivision {
        Subdivision::from_name(&self.subdivision).unwrap_or(Subdivision::SixteenthNote)
    }

    /// Resolved time signature, falling back to 4/4
    pub fn time_signature(&self) -> TimeSignature {
        TimeSignature::from_label(&self.time_signature).unwrap_or(TimeSignature::FourFour)
    }

    /// Resolved click policy, falling back to every note
    pub fn click_policy(&self) -> ClickPolicy {
        ClickPolicy::from_name(&self.click).unwrap_or(ClickPolicy::EveryNote)
    }

    /// Resolved advance mode, falling back to sequential
    pub fn advance_mode(&self) -> AdvanceMode {
        AdvanceMode::from_name(&self.advance).unwrap_or(AdvanceMode::Sequential)
    }
}

/// Validate a configuration, returning human-readable warnings.
///
/// Out-of-range numbers are clamped at the consuming setters; these
/// warnings only tell the user their file said something odd.
pub fn validate_config(config: &PracticeConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if !(20.0..=300.0).contains(&config.bpm) {
        warnings.push(format!("bpm {} outside [20, 300], will be clamped", config.bpm));
    }
    if Subdivision::from_name(&config.subdivision).is_none() {
        warnings.push(format!(
            "unknown subdivision '{}', using sixteenth",
            config.subdivision
        ));
    }
    if TimeSignature::from_label(&config.time_signature).is_none() {
        warnings.push(format!(
            "unknown time signature '{}', using 4/4",
            config.time_signature
        ));
    }
    if ClickPolicy::from_name(&config.click).is_none() {
        warnings.push(format!("unknown click policy '{}', using every-note", config.click));
    }
    if AdvanceMode::from_name(&config.advance).is_none() {
        warnings.push(format!("unknown advance mode '{}', using sequential", config.advance));
    }
    if !(0.0..=1.0).contains(&config.volume) {
        warnings.push(format!("volume {} outside [0, 1], will be clamped", config.volume));
    }
    if !(MIN_REPEATS..=MAX_REPEATS).contains(&config.repeats) {
        warnings.push(format!(
            "repeats {} outside [{}, {}], will be clamped",
            config.repeats, MIN_REPEATS, MAX_REPEATS
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_practice_config() {
        let yaml = r#"
practice:
  bpm: 96
  subdivision: eighth
  time_signature: "6/8"
  two_measure: false
  click: quarter-only
  repeats: 8
  advance: random
"#;

        let config = PracticeFile::from_yaml(yaml).unwrap();
        assert_eq!(config.practice.bpm, 96.0);
        assert_eq!(config.practice.subdivision(), Subdivision::EighthNote);
        assert_eq!(config.practice.time_signature(), TimeSignature::SixEight);
        assert!(!config.practice.two_measure);
        assert_eq!(config.practice.click_policy(), ClickPolicy::QuarterOnly);
        assert_eq!(config.practice.repeats, 8);
        assert_eq!(config.practice.advance_mode(), AdvanceMode::Random);
    }

    #[test]
    fn test_default_values() {
        let yaml = r#"
practice:
  bpm: 100
"#;

        let config = PracticeFile::from_yaml(yaml).unwrap();
        assert_eq!(config.practice.bpm, 100.0);
        assert_eq!(config.practice.subdivision(), Subdivision::SixteenthNote);
        assert_eq!(config.practice.time_signature(), TimeSignature::FourFour);
        assert!(config.practice.two_measure);
        assert_eq!(config.practice.repeats, 4);
        assert_eq!(config.practice.start_index, 0);
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let mut config = PracticeConfig::default();
        config.subdivision = "thirty-second".to_string();
        config.time_signature = "7/8".to_string();
        config.click = "loud".to_string();
        config.advance = "backwards".to_string();

        assert_eq!(config.subdivision(), Subdivision::SixteenthNote);
        assert_eq!(config.time_signature(), TimeSignature::FourFour);
        assert_eq!(config.click_policy(), ClickPolicy::EveryNote);
        assert_eq!(config.advance_mode(), AdvanceMode::Sequential);
    }

    #[test]
    fn test_validation_warnings() {
        let mut config = PracticeConfig::default();
        assert!(validate_config(&config).is_empty());

        config.bpm = 500.0;
        config.subdivision = "nope".to_string();
        config.volume = 2.0;
        config.repeats = 0;

        let warnings = validate_config(&config);
        assert_eq!(warnings.len(), 4);
        assert!(warnings[0].contains("bpm"));
    }

    #[test]
    fn test_round_trip() {
        let original = PracticeFile {
            practice: PracticeConfig {
                bpm: 140.0,
                subdivision: "triplet".to_string(),
                time_signature: "3/4".to_string(),
                two_measure: true,
                click: "every-note".to_string(),
                volume: 0.5,
                repeats: 2,
                advance: "random".to_string(),
                start_index: 42,
            },
        };

        let yaml = original.to_yaml().unwrap();
        let parsed = PracticeFile::from_yaml(&yaml).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let result = PracticeFile::load("/nonexistent/stickwork.yaml");
        assert!(result.is_err());
    }
}
