//! Runtime configuration.
//!
//! Every setting is optional: a missing file, an empty document, and any
//! individually absent key all resolve to built-in defaults, and malformed
//! values degrade to those defaults with a logged warning instead of an
//! error. Startup is the only place configuration problems surface; the
//! frame loop never sees them.

use std::ops::RangeInclusive;

use log::warn;

use crate::channels::DEFAULT_CHANNEL_RANGE;
use crate::layout::LayoutSettings;
use crate::notes::scale::builtin_presets;
use crate::notes::{parse_note, ScalePreset};
use crate::tracking::Finger;

/// Which fingertips may trigger notes: the keyword `"all"`, a single
/// finger name, or an explicit list of names.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum TargetFingers {
    Keyword(String),
    List(Vec<String>),
}

impl Default for TargetFingers {
    fn default() -> Self {
        TargetFingers::Keyword("all".to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutOptions {
    pub padding: f32,
    pub rows: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            padding: 10.0,
            rows: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MidiOptions {
    /// Substring to pick an output port by; first port wins when absent.
    pub port: Option<String>,
    /// "pressure" routes intensity to channel pressure, "cc" to a
    /// control change on `intensity_cc`.
    pub intensity: String,
    pub intensity_cc: u8,
}

impl Default for MidiOptions {
    fn default() -> Self {
        Self {
            port: None,
            intensity: "pressure".to_string(),
            intensity_cc: 74,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    pub resolution: [u32; 2],
    pub starting_note: String,
    pub num_octaves: u32,
    pub active_scale: Option<String>,
    pub preset_scales: Vec<ScalePreset>,
    pub zone_labels: bool,
    /// `[low, high]`, both within 1..=16. Anything else falls back to
    /// the default range.
    pub channel_range: Vec<i64>,
    pub target_fingers: TargetFingers,
    pub layout: LayoutOptions,
    pub midi: MidiOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: [1280, 720],
            starting_note: "C4".to_string(),
            num_octaves: 2,
            active_scale: None,
            preset_scales: builtin_presets(),
            zone_labels: true,
            channel_range: vec![2, 16],
            target_fingers: TargetFingers::default(),
            layout: LayoutOptions::default(),
            midi: MidiOptions::default(),
        }
    }
}

impl Config {
    /// The MPE member-channel range, falling back to 2..=16 when the
    /// configured pair is out of 1..16, inverted, or the wrong shape.
    pub fn mpe_channel_range(&self) -> RangeInclusive<u8> {
        match self.channel_range.as_slice() {
            [low, high]
                if (1..=16).contains(low) && (1..=16).contains(high) && low <= high =>
            {
                *low as u8..=*high as u8
            }
            other => {
                warn!("invalid channel_range {:?}, using [2, 16]", other);
                DEFAULT_CHANNEL_RANGE
            }
        }
    }

    /// Resolve the configured fingers. Unknown names are skipped with a
    /// warning; an empty result falls back to the index finger.
    pub fn target_fingers(&self) -> Vec<Finger> {
        let names: &[String] = match &self.target_fingers {
            TargetFingers::Keyword(word) if word.eq_ignore_ascii_case("all") => {
                return Finger::ALL.to_vec();
            }
            TargetFingers::Keyword(word) => match Finger::from_name(word) {
                Some(finger) => return vec![finger],
                None => {
                    warn!("unknown target_fingers value '{}', using all fingers", word);
                    return Finger::ALL.to_vec();
                }
            },
            TargetFingers::List(names) => names,
        };

        let mut fingers = Vec::new();
        for name in names {
            match Finger::from_name(name) {
                Some(finger) if !fingers.contains(&finger) => fingers.push(finger),
                Some(_) => {}
                None => warn!("unknown finger name '{}' in target_fingers", name),
            }
        }
        if fingers.is_empty() {
            warn!("target_fingers lists no usable fingers, using the index finger");
            fingers.push(Finger::Index);
        }
        fingers
    }

    /// Bundle the layout-facing settings for `ZoneLayout`.
    pub fn layout_settings(&self) -> LayoutSettings {
        LayoutSettings {
            width: self.resolution[0] as f32,
            height: self.resolution[1] as f32,
            padding: self.layout.padding,
            rows: self.layout.rows,
            starting_note: self.starting_note.clone(),
            num_octaves: self.num_octaves,
            active_scale: self.active_scale.clone(),
            preset_scales: self.preset_scales.clone(),
            zone_labels: self.zone_labels,
        }
    }

    /// Log a warning for every suspect setting. Nothing here is fatal;
    /// each consumer applies its own fallback at the point of use.
    pub fn validate(&self) {
        if self.resolution[0] == 0 || self.resolution[1] == 0 {
            warn!("resolution {:?} has a zero dimension", self.resolution);
        }
        if self.num_octaves == 0 {
            warn!("num_octaves is 0, the chromatic layout will be empty");
        }
        if let Err(err) = parse_note(&self.starting_note) {
            warn!("starting_note '{}' is invalid: {}", self.starting_note, err);
        }
        for preset in &self.preset_scales {
            if preset.notes.is_empty() {
                warn!("preset scale '{}' has no notes", preset.name);
            }
        }
        if self.midi.intensity != "pressure" && self.midi.intensity != "cc" {
            warn!(
                "midi.intensity '{}' is not 'pressure' or 'cc', using pressure",
                self.midi.intensity
            );
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

#[cfg(feature = "serde")]
impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config file: {}", err),
            ConfigError::Parse(err) => write!(f, "failed to parse config file: {}", err),
        }
    }
}

#[cfg(feature = "serde")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "serde")]
impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

#[cfg(feature = "serde")]
impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

#[cfg(feature = "serde")]
impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Load the file if it exists, defaulting (with a log line) on a
    /// missing or broken file.
    pub fn load_or_default(path: &std::path::Path) -> Self {
        if !path.exists() {
            log::info!("no config file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("{}, using defaults", err);
                Self::default()
            }
        }
    }
}
