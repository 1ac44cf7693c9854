//! MPE channel pool.
//!
//! Channel 1 is the global/master channel and never carries individual
//! notes; member channels come from a bounded inclusive range, 2..=16 by
//! default. Every concurrently sounding note holds a distinct member
//! channel so per-note pitch bend and pressure stay independent.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use crate::tracking::FingerId;

/// The MPE global channel, reserved for zone-wide messages.
pub const MASTER_CHANNEL: u8 = 1;
/// Member channel range used when configuration is absent or invalid.
pub const DEFAULT_CHANNEL_RANGE: RangeInclusive<u8> = 2..=16;

/// Fixed-capacity pool of member channels keyed by finger.
///
/// Invariant: every channel in the configured range is either in the
/// available set or assigned to exactly one finger, never both. Failed
/// assignments mutate nothing.
#[derive(Debug, Clone)]
pub struct ChannelAllocator {
    range: RangeInclusive<u8>,
    available: Vec<u8>, // descending, so pop() hands out the lowest first
    assigned: HashMap<FingerId, u8>,
}

impl ChannelAllocator {
    pub fn new(range: RangeInclusive<u8>) -> Self {
        Self {
            available: range.clone().rev().collect(),
            range,
            assigned: HashMap::new(),
        }
    }

    /// Channel for this finger: the one it already holds (re-trigger), or
    /// the lowest available. None means the pool is exhausted and the
    /// caller must drop the note-on.
    pub fn assign(&mut self, finger: FingerId) -> Option<u8> {
        if let Some(&channel) = self.assigned.get(&finger) {
            return Some(channel);
        }
        let channel = self.available.pop()?;
        self.assigned.insert(finger, channel);
        Some(channel)
    }

    /// Return the finger's channel to the pool. No-op for fingers that
    /// hold nothing.
    pub fn release(&mut self, finger: FingerId) -> Option<u8> {
        let channel = self.assigned.remove(&finger)?;
        self.available.push(channel);
        self.available.sort_unstable_by(|a, b| b.cmp(a));
        Some(channel)
    }

    /// Reclaim every assigned channel. Used on full shutdown.
    pub fn reset(&mut self) {
        self.assigned.clear();
        self.available = self.range.clone().rev().collect();
    }

    pub fn channel_for(&self, finger: FingerId) -> Option<u8> {
        self.assigned.get(&finger).copied()
    }

    pub fn available(&self) -> usize {
        self.available.len()
    }

    pub fn assigned(&self) -> usize {
        self.assigned.len()
    }

    pub fn capacity(&self) -> usize {
        self.available.len() + self.assigned.len()
    }
}

impl Default for ChannelAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_RANGE)
    }
}
