/*
Note Names and MIDI Values
==========================

Conversions between spelled note names ("C4", "F#5", "Eb3") and MIDI note
numbers. Middle C (C4) = MIDI note 60, the standard reference point.

The MIDI formula: note_number = 12 * (octave + 1) + semitone
Where semitone: C=0, C#=1, D=2, D#=3, E=4, F=5, F#=6, G=7, G#=8, A=9,
A#=10, B=11

Flats normalize to sharps by semitone index: "Eb3" parses to the same
value as "D#3". The normalization is purely index-based (letter index
minus one, mod 12), so "Cb4" lands on B in the SAME numbered octave.

Valid values span 0 ("C-1") through 127 ("G9"); anything outside is
rejected rather than wrapped.
*/

pub mod scale;

pub use scale::ScalePreset;

use std::fmt;

use crate::MIDI_NOTE_MAX;

pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteError {
    /// Token has no name/octave split, or the octave is not a number
    Malformed(String),
    /// Spelled part is not a recognized note name
    UnknownName(String),
    /// Parsed fine but lands outside MIDI 0..=127
    OutOfRange(String, i32),
}

impl fmt::Display for NoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteError::Malformed(token) => {
                write!(f, "malformed note name '{}'", token)
            }
            NoteError::UnknownName(token) => {
                write!(f, "unknown note name in '{}'", token)
            }
            NoteError::OutOfRange(token, value) => {
                write!(
                    f,
                    "note '{}' is outside the MIDI range 0..=127 (got {})",
                    token, value
                )
            }
        }
    }
}

impl std::error::Error for NoteError {}

/// Parse a spelled note name into its MIDI value.
///
/// Accepts naturals, sharps ('#') and flats ('b'), any letter case, and
/// octaves -1 through 9 as long as the result stays in 0..=127.
pub fn parse_note(name: &str) -> Result<u8, NoteError> {
    let token = name.trim();
    let split = token
        .char_indices()
        .find(|(_, c)| *c == '-' || c.is_ascii_digit())
        .map(|(i, _)| i);

    let (spelled, octave_str) = match split {
        Some(pos) if pos > 0 => token.split_at(pos),
        _ => return Err(NoteError::Malformed(token.to_string())),
    };

    let octave: i32 = octave_str
        .parse()
        .map_err(|_| NoteError::Malformed(token.to_string()))?;

    let semitone =
        semitone_index(spelled).ok_or_else(|| NoteError::UnknownName(token.to_string()))?;

    let value = (octave + 1) * 12 + semitone as i32;
    if !(0..=MIDI_NOTE_MAX as i32).contains(&value) {
        return Err(NoteError::OutOfRange(token.to_string(), value));
    }
    Ok(value as u8)
}

/// Spell a MIDI value as a sharp-normalized note name ("C4", "F#5").
pub fn note_name(value: u8) -> String {
    let octave = (value / 12) as i32 - 1;
    let name = NOTE_NAMES[(value % 12) as usize];
    format!("{}{}", name, octave)
}

fn semitone_index(spelled: &str) -> Option<usize> {
    let upper = spelled.to_ascii_uppercase();
    if let Some(index) = NOTE_NAMES.iter().position(|&n| n == upper) {
        return Some(index);
    }
    // Flat spelling: resolve the bare letter, then step one semitone down.
    if upper.len() == 2 && upper.ends_with('B') {
        let letter = &upper[..1];
        let index = NOTE_NAMES.iter().position(|&n| n == letter)?;
        return Some((index + 11) % 12);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_c_is_60() {
        assert_eq!(parse_note("C4"), Ok(60));
    }

    #[test]
    fn sharps_and_octaves() {
        assert_eq!(parse_note("A4"), Ok(69));
        assert_eq!(parse_note("C5"), Ok(72));
        assert_eq!(parse_note("F#5"), Ok(78));
        assert_eq!(parse_note("G9"), Ok(127));
        assert_eq!(parse_note("C-1"), Ok(0));
    }

    #[test]
    fn flats_normalize_to_sharps() {
        assert_eq!(parse_note("Eb3"), parse_note("D#3"));
        assert_eq!(parse_note("Bb3"), Ok(58));
        // Index-based normalization: Cb stays in its numbered octave.
        assert_eq!(parse_note("Cb4"), Ok(71));
    }

    #[test]
    fn parsing_ignores_case_and_whitespace() {
        assert_eq!(parse_note("c4"), Ok(60));
        assert_eq!(parse_note(" f#5 "), Ok(78));
        assert_eq!(parse_note("bb3"), Ok(58));
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(matches!(parse_note("InvalidNote"), Err(NoteError::Malformed(_))));
        assert!(matches!(parse_note("C"), Err(NoteError::Malformed(_))));
        assert!(matches!(parse_note("4"), Err(NoteError::Malformed(_))));
        assert!(matches!(parse_note(""), Err(NoteError::Malformed(_))));
        assert!(matches!(parse_note("H2"), Err(NoteError::UnknownName(_))));
        assert!(matches!(parse_note("C##4"), Err(NoteError::UnknownName(_))));
    }

    #[test]
    fn rejects_out_of_range_octaves() {
        assert!(matches!(parse_note("C10"), Err(NoteError::OutOfRange(_, 132))));
        assert!(matches!(parse_note("A9"), Err(NoteError::OutOfRange(_, 129))));
        assert!(matches!(parse_note("B-2"), Err(NoteError::OutOfRange(_, -1))));
    }

    #[test]
    fn spelling_round_trips() {
        assert_eq!(note_name(60), "C4");
        assert_eq!(note_name(68), "G#4");
        assert_eq!(note_name(0), "C-1");
        assert_eq!(note_name(127), "G9");
        for value in [0u8, 57, 60, 61, 71, 127] {
            assert_eq!(parse_note(&note_name(value)), Ok(value));
        }
    }
}
