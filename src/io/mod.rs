// Purpose - sink boundary: note event trait, command encoding, doubles

#[cfg(feature = "midi")]
pub mod midi;
#[cfg(feature = "rtrb")]
pub mod queue;

use crate::tracking::FingerId;

/// Fire-and-forget note event sink.
///
/// The engine emits into this once per event; order matters within a
/// frame (releases come before new claims) and calls must return fast.
/// Backends that can block belong behind a queue (see the rtrb feature).
pub trait NoteSink {
    fn note_on(&mut self, note: u8, velocity: u8, finger: FingerId);
    fn note_off(&mut self, note: u8, finger: FingerId);
    fn pitch_bend(&mut self, value: i16, finger: FingerId);
    fn intensity_update(&mut self, value: u8, finger: FingerId, note: u8);
}

/// One sink call as a value, for queues and recordings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkCommand {
    NoteOn { note: u8, velocity: u8, finger: FingerId },
    NoteOff { note: u8, finger: FingerId },
    PitchBend { value: i16, finger: FingerId },
    Intensity { value: u8, finger: FingerId, note: u8 },
}

impl SinkCommand {
    /// Replay this command into a sink.
    pub fn apply(self, sink: &mut dyn NoteSink) {
        match self {
            SinkCommand::NoteOn { note, velocity, finger } => sink.note_on(note, velocity, finger),
            SinkCommand::NoteOff { note, finger } => sink.note_off(note, finger),
            SinkCommand::PitchBend { value, finger } => sink.pitch_bend(value, finger),
            SinkCommand::Intensity { value, finger, note } => {
                sink.intensity_update(value, finger, note)
            }
        }
    }
}

/// Discards every event. Stands in when no output backend is wired up.
#[derive(Debug, Default)]
pub struct NullSink;

impl NoteSink for NullSink {
    fn note_on(&mut self, _note: u8, _velocity: u8, _finger: FingerId) {}
    fn note_off(&mut self, _note: u8, _finger: FingerId) {}
    fn pitch_bend(&mut self, _value: i16, _finger: FingerId) {}
    fn intensity_update(&mut self, _value: u8, _finger: FingerId, _note: u8) {}
}

/// Records every command in emission order. The test and debug double.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub commands: Vec<SinkCommand>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn note_ons(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, SinkCommand::NoteOn { .. }))
            .count()
    }

    pub fn note_offs(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, SinkCommand::NoteOff { .. }))
            .count()
    }
}

impl NoteSink for RecordingSink {
    fn note_on(&mut self, note: u8, velocity: u8, finger: FingerId) {
        self.commands.push(SinkCommand::NoteOn { note, velocity, finger });
    }

    fn note_off(&mut self, note: u8, finger: FingerId) {
        self.commands.push(SinkCommand::NoteOff { note, finger });
    }

    fn pitch_bend(&mut self, value: i16, finger: FingerId) {
        self.commands.push(SinkCommand::PitchBend { value, finger });
    }

    fn intensity_update(&mut self, value: u8, finger: FingerId, note: u8) {
        self.commands.push(SinkCommand::Intensity { value, finger, note });
    }
}
