//! A screen-space rectangle bound to one note, with its claim state.

use crate::tracking::FingerId;

/// Zone geometry in image-pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ZoneRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open containment: inclusive on the min edges, exclusive on the
    /// max edges, so adjacent zones sharing an edge never both contain the
    /// same point. Zero-size axes contain nothing.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x
            && px < self.x + self.width
            && py >= self.y
            && py < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClaimState {
    #[default]
    Free,
    Claimed(FingerId),
}

/// One note zone. Geometry, note and name are fixed at generation time;
/// only the claim state mutates, and only through claim/release.
#[derive(Debug, Clone)]
pub struct NoteZone {
    rect: ZoneRect,
    note: u8,
    name: String,
    label: Option<String>,
    claim: ClaimState,
}

impl NoteZone {
    pub fn new(rect: ZoneRect, note: u8, name: String, label: Option<String>) -> Self {
        Self {
            rect,
            note,
            name,
            label,
            claim: ClaimState::Free,
        }
    }

    pub fn rect(&self) -> ZoneRect {
        self.rect
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    /// Spelled note name, as configured (flats keep their spelling).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label; None when labels are disabled.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.rect.contains(x, y)
    }

    /// Free → Claimed. Returns false without mutating if already claimed;
    /// the caller must check ownership first.
    pub fn claim(&mut self, finger: FingerId) -> bool {
        match self.claim {
            ClaimState::Free => {
                self.claim = ClaimState::Claimed(finger);
                true
            }
            ClaimState::Claimed(_) => false,
        }
    }

    /// Claimed → Free, unconditionally.
    pub fn release(&mut self) {
        self.claim = ClaimState::Free;
    }

    pub fn is_free(&self) -> bool {
        self.claim == ClaimState::Free
    }

    pub fn claimed_by(&self) -> Option<FingerId> {
        match self.claim {
            ClaimState::Free => None,
            ClaimState::Claimed(finger) => Some(finger),
        }
    }
}
