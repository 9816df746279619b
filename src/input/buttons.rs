//! Edge detection and press counting for controller buttons

use std::collections::HashMap;

use tracing::debug;

use crate::types::{ButtonEdge, ButtonKind, ButtonSample, Hand};

#[derive(Debug, Default, Clone, Copy)]
struct HandState {
    pressed: [bool; 4],
    presses: [u32; 4],
}

/// Turns per-tick button readings into pressed/released transitions
///
/// Only rising edges are counted. A reading the device did not report leaves
/// the previous state untouched.
#[derive(Debug, Default)]
pub struct ButtonTracker {
    hands: HashMap<Hand, HandState>,
}

impl ButtonTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, hand: Hand, sample: ButtonSample) -> Vec<ButtonEdge> {
        let state = self.hands.entry(hand).or_default();
        let mut edges = Vec::new();

        for button in ButtonKind::ALL {
            let Some(pressed) = sample.get(button) else {
                continue;
            };
            let slot = button.slot();
            if pressed == state.pressed[slot] {
                continue;
            }

            state.pressed[slot] = pressed;
            if pressed {
                state.presses[slot] += 1;
            }

            let edge = ButtonEdge {
                hand,
                button,
                pressed,
                press_count: state.presses[slot],
            };
            debug!("{}", edge);
            edges.push(edge);
        }

        edges
    }

    pub fn press_count(&self, hand: Hand, button: ButtonKind) -> u32 {
        self.hands
            .get(&hand)
            .map(|s| s.presses[button.slot()])
            .unwrap_or(0)
    }

    pub fn is_pressed(&self, hand: Hand, button: ButtonKind) -> bool {
        self.hands
            .get(&hand)
            .map(|s| s.pressed[button.slot()])
            .unwrap_or(false)
    }
}
