use std::ops::RangeInclusive;

use log::{info, warn};
use midir::{MidiOutput, MidiOutputConnection};

use super::NoteSink;
use crate::channels::ChannelAllocator;
use crate::tracking::FingerId;

/// How per-finger intensity reaches the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntensityMode {
    /// Channel pressure (aftertouch), the MPE-native route.
    #[default]
    ChannelPressure,
    /// A control change on the given controller number.
    ControlChange(u8),
}

/// MIDI output backend speaking MPE.
///
/// Keeps its own channel pool so every sounding finger gets a dedicated
/// wire channel; expression messages for a finger go out on that channel
/// only while its note is held.
pub struct MidiBackend {
    conn: MidiOutputConnection,
    channels: ChannelAllocator,
    intensity: IntensityMode,
}

impl MidiBackend {
    /// Open a MIDI output port.
    ///
    /// When `preferred` is given, the first port whose name contains it
    /// (case-insensitive) wins; otherwise the first port available. Returns
    /// `None` when no port exists or the connection fails, so callers can
    /// fall back to a null sink.
    pub fn open(
        preferred: Option<&str>,
        range: RangeInclusive<u8>,
        intensity: IntensityMode,
    ) -> Option<Self> {
        let midi_out = match MidiOutput::new("airfret") {
            Ok(out) => out,
            Err(err) => {
                warn!("MIDI init failed: {}", err);
                return None;
            }
        };

        let ports = midi_out.ports();
        if ports.is_empty() {
            warn!("no MIDI output ports found");
            return None;
        }

        let port_idx = match preferred {
            Some(wanted) => {
                let wanted = wanted.to_lowercase();
                let found = ports.iter().position(|p| {
                    midi_out
                        .port_name(p)
                        .map(|n| n.to_lowercase().contains(&wanted))
                        .unwrap_or(false)
                });
                if found.is_none() {
                    warn!("no MIDI port matching '{}', using the first port", wanted);
                }
                found.unwrap_or(0)
            }
            None => 0,
        };

        let port = &ports[port_idx];
        let name = midi_out
            .port_name(port)
            .unwrap_or_else(|_| "unknown".to_string());

        match midi_out.connect(port, "airfret-out") {
            Ok(conn) => {
                info!("opened MIDI port: {}", name);
                Some(Self {
                    conn,
                    channels: ChannelAllocator::new(range),
                    intensity,
                })
            }
            Err(err) => {
                warn!("failed to connect to MIDI port {}: {}", name, err);
                None
            }
        }
    }

    /// Release every channel and close the port.
    pub fn close(mut self) {
        self.channels.reset();
        self.conn.close();
    }

    fn send(&mut self, bytes: &[u8]) {
        if let Err(err) = self.conn.send(bytes) {
            warn!("MIDI send failed: {}", err);
        }
    }
}

// Status bytes carry the zero-based channel, so channel N maps to N - 1
// in the low nibble.
fn status(kind: u8, channel: u8) -> u8 {
    kind | ((channel - 1) & 0x0F)
}

impl NoteSink for MidiBackend {
    fn note_on(&mut self, note: u8, velocity: u8, finger: FingerId) {
        let channel = match self.channels.assign(finger) {
            Some(ch) => ch,
            None => {
                warn!("out of MPE channels, dropping note {} for {}", note, finger);
                return;
            }
        };
        self.send(&[status(0x90, channel), note, velocity]);
    }

    fn note_off(&mut self, note: u8, finger: FingerId) {
        if let Some(channel) = self.channels.release(finger) {
            self.send(&[status(0x80, channel), note, 0]);
        }
    }

    fn pitch_bend(&mut self, value: i16, finger: FingerId) {
        if let Some(channel) = self.channels.channel_for(finger) {
            let bend = (value as i32 + 8192).clamp(0, 16383) as u16;
            self.send(&[
                status(0xE0, channel),
                (bend & 0x7F) as u8,
                (bend >> 7) as u8,
            ]);
        }
    }

    fn intensity_update(&mut self, value: u8, finger: FingerId, _note: u8) {
        if let Some(channel) = self.channels.channel_for(finger) {
            match self.intensity {
                IntensityMode::ChannelPressure => {
                    self.send(&[status(0xD0, channel), value]);
                }
                IntensityMode::ControlChange(controller) => {
                    self.send(&[status(0xB0, channel), controller, value]);
                }
            }
        }
    }
}
