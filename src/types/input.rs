//! Controller input samples and button transitions

use serde::{Deserialize, Serialize};

/// Which hand a controller belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    Left,
    Right,
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hand::Left => write!(f, "Left Controller"),
            Hand::Right => write!(f, "Right Controller"),
        }
    }
}

/// Digital controller buttons tracked per hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    Primary,
    Secondary,
    Trigger,
    Grip,
}

impl ButtonKind {
    pub const ALL: [ButtonKind; 4] = [
        ButtonKind::Primary,
        ButtonKind::Secondary,
        ButtonKind::Trigger,
        ButtonKind::Grip,
    ];

    pub(crate) fn slot(self) -> usize {
        match self {
            ButtonKind::Primary => 0,
            ButtonKind::Secondary => 1,
            ButtonKind::Trigger => 2,
            ButtonKind::Grip => 3,
        }
    }
}

impl std::fmt::Display for ButtonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ButtonKind::Primary => write!(f, "Primary Button"),
            ButtonKind::Secondary => write!(f, "Secondary Button"),
            ButtonKind::Trigger => write!(f, "Trigger Button"),
            ButtonKind::Grip => write!(f, "Grip Button"),
        }
    }
}

/// One tick's raw button readings for a controller
///
/// `None` means the device did not report that feature this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSample {
    #[serde(default)]
    pub primary: Option<bool>,
    #[serde(default)]
    pub secondary: Option<bool>,
    #[serde(default)]
    pub trigger: Option<bool>,
    #[serde(default)]
    pub grip: Option<bool>,
}

impl ButtonSample {
    pub fn get(&self, button: ButtonKind) -> Option<bool> {
        match button {
            ButtonKind::Primary => self.primary,
            ButtonKind::Secondary => self.secondary,
            ButtonKind::Trigger => self.trigger,
            ButtonKind::Grip => self.grip,
        }
    }

    pub fn with(mut self, button: ButtonKind, pressed: bool) -> Self {
        let slot = match button {
            ButtonKind::Primary => &mut self.primary,
            ButtonKind::Secondary => &mut self.secondary,
            ButtonKind::Trigger => &mut self.trigger,
            ButtonKind::Grip => &mut self.grip,
        };
        *slot = Some(pressed);
        self
    }
}

/// A pressed/released transition of one button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonEdge {
    pub hand: Hand,
    pub button: ButtonKind,
    pub pressed: bool,
    /// Total presses of this button so far, including this one
    #[serde(rename = "pressCount")]
    pub press_count: u32,
}

impl std::fmt::Display for ButtonEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.pressed {
            write!(
                f,
                "{}: {} Pressed (Count: {})",
                self.hand, self.button, self.press_count
            )
        } else {
            write!(f, "{}: {} Released", self.hand, self.button)
        }
    }
}
