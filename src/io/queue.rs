use log::warn;
use rtrb::{Consumer, Producer, RingBuffer};

use super::{NoteSink, SinkCommand};
use crate::tracking::FingerId;

pub trait CommandReceiver {
    fn pop(&mut self) -> Option<SinkCommand>;
}

impl CommandReceiver for Consumer<SinkCommand> {
    fn pop(&mut self) -> Option<SinkCommand> {
        Consumer::pop(self).ok()
    }
}

/// Bounded command queue between the frame loop and an output backend.
///
/// The producer half implements [`NoteSink`] and never blocks; commands
/// that do not fit are counted and dropped. Drain the consumer half with
/// [`drain_into`] from the backend thread.
pub fn command_queue(capacity: usize) -> (QueuedSink, Consumer<SinkCommand>) {
    let (tx, rx) = RingBuffer::new(capacity);
    (QueuedSink { tx, dropped: 0 }, rx)
}

pub struct QueuedSink {
    tx: Producer<SinkCommand>,
    dropped: u64,
}

impl QueuedSink {
    /// Commands lost to a full queue since creation.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    fn push(&mut self, command: SinkCommand) {
        if self.tx.push(command).is_err() {
            self.dropped += 1;
            warn!("command queue full, dropping {:?}", command);
        }
    }
}

impl NoteSink for QueuedSink {
    fn note_on(&mut self, note: u8, velocity: u8, finger: FingerId) {
        self.push(SinkCommand::NoteOn { note, velocity, finger });
    }

    fn note_off(&mut self, note: u8, finger: FingerId) {
        self.push(SinkCommand::NoteOff { note, finger });
    }

    fn pitch_bend(&mut self, value: i16, finger: FingerId) {
        self.push(SinkCommand::PitchBend { value, finger });
    }

    fn intensity_update(&mut self, value: u8, finger: FingerId, note: u8) {
        self.push(SinkCommand::Intensity { value, finger, note });
    }
}

/// Pop every pending command and replay it into `sink`.
///
/// Returns the number of commands applied.
pub fn drain_into(rx: &mut impl CommandReceiver, sink: &mut dyn NoteSink) -> usize {
    let mut applied = 0;
    while let Some(command) = rx.pop() {
        command.apply(sink);
        applied += 1;
    }
    applied
}
