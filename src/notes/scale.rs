//! Preset scales and the note source used by layout generation.

use log::warn;

use super::{note_name, parse_note};
use crate::MIDI_NOTE_MAX;

/// A named, ordered list of spelled notes from configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalePreset {
    pub name: String,
    pub notes: Vec<String>,
}

impl ScalePreset {
    pub fn new(name: &str, notes: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            notes: notes.iter().map(|n| n.to_string()).collect(),
        }
    }
}

/// The presets shipped by default, all rooted on C4.
pub fn builtin_presets() -> Vec<ScalePreset> {
    vec![
        ScalePreset::new(
            "Major Pentatonic",
            &["C4", "D4", "E4", "G4", "A4", "C5", "D5", "E5", "G5", "A5"],
        ),
        ScalePreset::new(
            "Minor Pentatonic",
            &["C4", "Eb4", "F4", "G4", "Bb4", "C5", "Eb5", "F5", "G5", "Bb5"],
        ),
        ScalePreset::new("Blues", &["C4", "Eb4", "F4", "F#4", "G4", "Bb4", "C5"]),
    ]
}

/// Resolve the (name, value) note list for a layout.
///
/// A named preset wins if it exists and yields at least one valid note;
/// anything else degrades to the chromatic run with a warning. Invalid
/// tokens inside a preset are skipped individually, also with a warning.
pub fn resolve_notes(
    active_scale: Option<&str>,
    presets: &[ScalePreset],
    start: u8,
    num_octaves: u32,
) -> Vec<(String, u8)> {
    if let Some(name) = active_scale {
        match presets.iter().find(|p| p.name == name) {
            Some(preset) => {
                let notes = preset_notes(preset);
                if !notes.is_empty() {
                    return notes;
                }
                warn!(
                    "scale '{}' contains no valid notes, defaulting to chromatic",
                    name
                );
            }
            None => {
                warn!("scale '{}' not found in presets, defaulting to chromatic", name);
            }
        }
    }
    chromatic_run(start, num_octaves * 12)
}

fn preset_notes(preset: &ScalePreset) -> Vec<(String, u8)> {
    let mut notes = Vec::with_capacity(preset.notes.len());
    for token in &preset.notes {
        match parse_note(token) {
            Ok(value) => notes.push((token.clone(), value)),
            Err(err) => warn!("invalid note '{}' in scale '{}': {}", token, preset.name, err),
        }
    }
    notes
}

/// A chromatic run of `count` semitones from `start`, clipped to the MIDI
/// range. Keeps the sharp-normalized spelling for display.
pub fn chromatic_run(start: u8, count: u32) -> Vec<(String, u8)> {
    (0..count)
        .map(|i| start as u32 + i)
        .take_while(|&v| v <= MIDI_NOTE_MAX as u32)
        .map(|v| (note_name(v as u8), v as u8))
        .collect()
}
