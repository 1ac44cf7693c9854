//! Scripted hand source for the demo.
//!
//! Stands in for a camera-driven detector: two hands drift across the
//! display area on sine paths, extending and curling their fingers so
//! zones trigger, bend, and release without any real tracking hardware.

use std::f32::consts::PI;

use airfret::tracking::{Finger, FingerState, Hand, HandId};

pub struct SimHands {
    width: f32,
    height: f32,
    t: f32,
}

impl SimHands {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            t: 0.0,
        }
    }

    /// Produce the next frame of hands. The left hand is always present;
    /// the right hand periodically leaves the frame entirely, exercising
    /// the hand-vanished release path.
    pub fn next_frame(&mut self) -> Vec<Hand> {
        self.t += 1.0 / 60.0;
        let mut hands = vec![self.hand(HandId::Left, 0.0)];
        if (self.t * 0.1).sin() > -0.4 {
            hands.push(self.hand(HandId::Right, PI));
        }
        hands
    }

    fn hand(&self, id: HandId, phase: f32) -> Hand {
        let cx = (0.5 + 0.4 * (self.t * 0.31 + phase).sin()) * self.width;
        let cy = (0.5 + 0.35 * (self.t * 0.23 + phase).cos()) * self.height;
        let index_state = if (self.t * 0.7 + phase).sin() > -0.6 {
            FingerState::Extended
        } else {
            FingerState::Retracted
        };
        Hand::new(id)
            .with_finger(Finger::Index, index_state)
            .with_finger(Finger::Middle, FingerState::Extended)
            .with_landmark(Finger::Index.tip_landmark(), cx as i32, cy as i32, 0.0)
            .with_landmark(
                Finger::Middle.tip_landmark(),
                (cx + 0.08 * self.width) as i32,
                (cy - 0.05 * self.height) as i32,
                0.0,
            )
    }
}
