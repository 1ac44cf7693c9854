/*
Hand-Frame Data Model
=====================

The shape the engine consumes every frame, as produced by an external
hand detector (or the demo's scripted stand-in).

Each hand carries:
- an identity: the handedness label when the detector reports one, else a
  per-frame slot index (NOT stable across frames; see HandId::from_label)
- a total per-finger state map (missing entries read as Unknown)
- a landmark list of (id, x, y, z) points in image-pixel coordinates

Fingertip landmark ids follow the MediaPipe hand model:
  THUMB_TIP = 4, INDEX_TIP = 8, MIDDLE_TIP = 12, RING_TIP = 16,
  PINKY_TIP = 20

A FingerId pairs a hand identity with a finger and is the key for every
claim, binding, and channel assignment in the crate. It is a small Copy
value with structural equality and hashing.
*/

use std::fmt;

/// One of the five fingers, in landmark order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// MediaPipe landmark id of this finger's tip.
    pub fn tip_landmark(self) -> u8 {
        match self {
            Finger::Thumb => 4,
            Finger::Index => 8,
            Finger::Middle => 12,
            Finger::Ring => 16,
            Finger::Pinky => 20,
        }
    }

    pub fn from_tip_landmark(id: u8) -> Option<Finger> {
        Finger::ALL.into_iter().find(|f| f.tip_landmark() == id)
    }

    /// Parse a configured finger name, case-insensitive.
    pub fn from_name(name: &str) -> Option<Finger> {
        match name.trim().to_ascii_lowercase().as_str() {
            "thumb" => Some(Finger::Thumb),
            "index" => Some(Finger::Index),
            "middle" => Some(Finger::Middle),
            "ring" => Some(Finger::Ring),
            "pinky" => Some(Finger::Pinky),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Finger::Thumb => "thumb",
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Pinky => "pinky",
        }
    }

    fn slot(self) -> usize {
        match self {
            Finger::Thumb => 0,
            Finger::Index => 1,
            Finger::Middle => 2,
            Finger::Ring => 3,
            Finger::Pinky => 4,
        }
    }
}

impl fmt::Display for Finger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-finger classification from the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FingerState {
    Extended,
    Retracted,
    #[default]
    Unknown,
}

impl FingerState {
    /// Only a positive Extended classification counts; Unknown does not.
    pub fn is_extended(self) -> bool {
        self == FingerState::Extended
    }
}

/// Hand identity: handedness label when available, else a per-frame slot.
///
/// Slot identities are not stable across frames. A binding keyed on a slot
/// can orphan when hands appear or reorder; it is cleaned up by the
/// engine's absence checks rather than by identity tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HandId {
    Left,
    Right,
    Slot(u8),
}

impl HandId {
    /// Resolve an identity from an optional handedness label and the
    /// hand's index within the frame.
    pub fn from_label(label: Option<&str>, slot: usize) -> HandId {
        match label {
            Some(l) if l.eq_ignore_ascii_case("left") => HandId::Left,
            Some(l) if l.eq_ignore_ascii_case("right") => HandId::Right,
            _ => HandId::Slot(slot as u8),
        }
    }
}

impl fmt::Display for HandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandId::Left => f.write_str("left"),
            HandId::Right => f.write_str("right"),
            HandId::Slot(i) => write!(f, "hand_{}", i),
        }
    }
}

/// Composite key for one tracked fingertip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FingerId {
    pub hand: HandId,
    pub finger: Finger,
}

impl FingerId {
    pub fn new(hand: HandId, finger: Finger) -> Self {
        Self { hand, finger }
    }

    pub fn tip_landmark(self) -> u8 {
        self.finger.tip_landmark()
    }
}

impl fmt::Display for FingerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hand, self.finger)
    }
}

/// One tracked point on a hand, in image-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub id: u8,
    pub x: i32,
    pub y: i32,
    pub z: f32,
}

/// Total map of finger states; unreported fingers read as Unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerStates([FingerState; 5]);

impl FingerStates {
    pub fn get(&self, finger: Finger) -> FingerState {
        self.0[finger.slot()]
    }

    pub fn set(&mut self, finger: Finger, state: FingerState) {
        self.0[finger.slot()] = state;
    }
}

/// One hand as reported for a single frame.
#[derive(Debug, Clone)]
pub struct Hand {
    pub id: HandId,
    pub fingers: FingerStates,
    pub landmarks: Vec<Landmark>,
}

impl Hand {
    pub fn new(id: HandId) -> Self {
        Self {
            id,
            fingers: FingerStates::default(),
            landmarks: Vec::new(),
        }
    }

    pub fn with_finger(mut self, finger: Finger, state: FingerState) -> Self {
        self.fingers.set(finger, state);
        self
    }

    pub fn with_landmark(mut self, id: u8, x: i32, y: i32, z: f32) -> Self {
        self.landmarks.push(Landmark { id, x, y, z });
        self
    }

    pub fn finger_state(&self, finger: Finger) -> FingerState {
        self.fingers.get(finger)
    }

    /// Look up a landmark by id. Detectors may omit points, so absence is
    /// an expected case, not an error.
    pub fn landmark(&self, id: u8) -> Option<Landmark> {
        self.landmarks.iter().copied().find(|lm| lm.id == id)
    }

    pub fn tip(&self, finger: Finger) -> Option<Landmark> {
        self.landmark(finger.tip_landmark())
    }
}
