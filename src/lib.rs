pub mod channels;
pub mod config; // Recognized options, defaults, TOML loading
pub mod engine;
pub mod expression; // Finger position → pitch bend / intensity
pub mod io;
pub mod layout;
pub mod notes;
pub mod tracking; // Hand-frame data model consumed each frame

pub const MIDI_NOTE_MAX: u8 = 127;
