//! Frame-by-frame interaction engine.
//!
//! Each frame the engine reconciles tracked hands against the zone grid:
//!
//! 1. No hands at all releases every sounding note immediately.
//! 2. Sustain pass: every existing binding is checked against the new
//!    frame. A finger that is still extended inside its original zone
//!    keeps its note and gets fresh pitch bend and intensity from its
//!    current position; anything else (hand gone, finger retracted or
//!    curled, tip outside the zone) releases the note, the zone, and the
//!    channel.
//! 3. Claim pass: every targeted, extended, unbound fingertip is tested
//!    against the zones in order. The first zone containing it decides:
//!    a free zone is claimed and a note-on fires with velocity from the
//!    vertical position; an occupied zone absorbs the finger without a
//!    note and without falling through to later zones.
//!
//! Releases always precede new claims within a frame, so a finger that
//! slides from one zone into the next produces note-off then note-on in
//! that order, and the freed zone can be re-claimed in the same frame.

use log::{debug, warn};

use crate::channels::ChannelAllocator;
use crate::expression::{level_for_y, pitch_bend_for_x};
use crate::io::NoteSink;
use crate::layout::{NoteZone, ZoneRect};
use crate::tracking::{Finger, FingerId, Hand};

/// One sounding note: the finger holding it, the zone it came from, and
/// the channel it plays on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveBinding {
    pub finger: FingerId,
    pub zone_index: usize,
    pub note: u8,
    pub channel: u8,
    /// Vertical tip position at claim time, kept for relative-motion
    /// expression experiments.
    pub initial_y: f32,
}

pub struct InteractionEngine {
    bindings: Vec<ActiveBinding>,
    channels: ChannelAllocator,
    targets: Vec<Finger>,
}

impl InteractionEngine {
    /// Engine with the default channel range and all five fingers active.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            channels: ChannelAllocator::default(),
            targets: Finger::ALL.to_vec(),
        }
    }

    pub fn with_channel_range(mut self, range: std::ops::RangeInclusive<u8>) -> Self {
        self.channels = ChannelAllocator::new(range);
        self
    }

    pub fn with_targets(mut self, targets: Vec<Finger>) -> Self {
        self.set_targets(targets);
        self
    }

    /// Restrict which fingers may trigger notes. An empty list falls back
    /// to the index finger so the engine never goes completely deaf.
    pub fn set_targets(&mut self, targets: Vec<Finger>) {
        if targets.is_empty() {
            warn!("no target fingers configured, falling back to the index finger");
            self.targets = vec![Finger::Index];
        } else {
            self.targets = targets;
        }
    }

    pub fn targets(&self) -> &[Finger] {
        &self.targets
    }

    pub fn bindings(&self) -> &[ActiveBinding] {
        &self.bindings
    }

    pub fn active_notes(&self) -> usize {
        self.bindings.len()
    }

    pub fn channels(&self) -> &ChannelAllocator {
        &self.channels
    }

    pub fn binding_for(&self, finger: FingerId) -> Option<&ActiveBinding> {
        self.bindings.iter().find(|b| b.finger == finger)
    }

    /// Reconcile one frame of tracking data against the zones.
    pub fn process_frame(
        &mut self,
        hands: &[Hand],
        zones: &mut [NoteZone],
        sink: &mut dyn NoteSink,
    ) {
        if hands.is_empty() {
            self.release_all(zones, sink);
            return;
        }
        let processed = self.sustain_pass(hands, zones, sink);
        self.claim_pass(hands, zones, &processed, sink);
    }

    /// Release every sounding note, freeing zones and channels.
    pub fn release_all(&mut self, zones: &mut [NoteZone], sink: &mut dyn NoteSink) {
        if self.bindings.is_empty() {
            return;
        }
        debug!("releasing {} active notes", self.bindings.len());
        for binding in std::mem::take(&mut self.bindings) {
            self.release_binding(binding, zones, sink);
        }
    }

    /// Check every binding against the frame. Returns the fingers that
    /// kept their notes; released fingers stay eligible for the claim
    /// pass so a zone-to-zone slide retriggers in one frame.
    fn sustain_pass(
        &mut self,
        hands: &[Hand],
        zones: &mut [NoteZone],
        sink: &mut dyn NoteSink,
    ) -> Vec<FingerId> {
        let mut processed = Vec::with_capacity(self.bindings.len());
        let mut kept = Vec::with_capacity(self.bindings.len());

        for binding in std::mem::take(&mut self.bindings) {
            match locate_tip(&binding, hands, zones) {
                Some((x, y, rect)) => {
                    sink.pitch_bend(pitch_bend_for_x(x, rect), binding.finger);
                    sink.intensity_update(level_for_y(y, rect), binding.finger, binding.note);
                    processed.push(binding.finger);
                    kept.push(binding);
                }
                None => self.release_binding(binding, zones, sink),
            }
        }

        self.bindings = kept;
        processed
    }

    fn claim_pass(
        &mut self,
        hands: &[Hand],
        zones: &mut [NoteZone],
        processed: &[FingerId],
        sink: &mut dyn NoteSink,
    ) {
        for hand in hands {
            for ti in 0..self.targets.len() {
                let finger = FingerId::new(hand.id, self.targets[ti]);
                if processed.contains(&finger) || self.binding_for(finger).is_some() {
                    continue;
                }
                if !hand.finger_state(finger.finger).is_extended() {
                    continue;
                }
                let tip = match hand.tip(finger.finger) {
                    Some(lm) => lm,
                    None => continue,
                };
                let (x, y) = (tip.x as f32, tip.y as f32);
                // Only the first zone containing the tip is considered;
                // an occupied hit does not fall through to later zones.
                if let Some(zone_index) = zones.iter().position(|z| z.contains(x, y)) {
                    self.try_claim(finger, zone_index, y, zones, sink);
                }
            }
        }
    }

    fn try_claim(
        &mut self,
        finger: FingerId,
        zone_index: usize,
        y: f32,
        zones: &mut [NoteZone],
        sink: &mut dyn NoteSink,
    ) {
        let zone = &mut zones[zone_index];
        if !zone.is_free() {
            return;
        }
        let channel = match self.channels.assign(finger) {
            Some(ch) => ch,
            None => {
                warn!(
                    "channel pool exhausted, dropping note {} for {}",
                    zone.note(),
                    finger
                );
                return;
            }
        };
        let velocity = level_for_y(y, zone.rect());
        sink.note_on(zone.note(), velocity, finger);
        zone.claim(finger);
        self.bindings.push(ActiveBinding {
            finger,
            zone_index,
            note: zone.note(),
            channel,
            initial_y: y,
        });
    }

    fn release_binding(
        &mut self,
        binding: ActiveBinding,
        zones: &mut [NoteZone],
        sink: &mut dyn NoteSink,
    ) {
        sink.note_off(binding.note, binding.finger);
        match zones.get_mut(binding.zone_index) {
            Some(zone) if zone.claimed_by() == Some(binding.finger) => zone.release(),
            _ => warn!(
                "{} referenced a replaced zone, released note {} only",
                binding.finger, binding.note
            ),
        }
        self.channels.release(binding.finger);
    }
}

impl Default for InteractionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the binding's fingertip in the frame, provided the finger is
/// still extended and inside its claimed zone. A stale zone index (the
/// layout was rebuilt under a live binding) reads as a miss.
fn locate_tip(
    binding: &ActiveBinding,
    hands: &[Hand],
    zones: &[NoteZone],
) -> Option<(f32, f32, ZoneRect)> {
    let zone = zones.get(binding.zone_index)?;
    let hand = hands.iter().find(|h| h.id == binding.finger.hand)?;
    if !hand.finger_state(binding.finger.finger).is_extended() {
        return None;
    }
    let tip = hand.tip(binding.finger.finger)?;
    let (x, y) = (tip.x as f32, tip.y as f32);
    if zone.contains(x, y) {
        Some((x, y, zone.rect()))
    } else {
        None
    }
}
