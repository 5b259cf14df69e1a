use bevy::prelude::*;

/// Edge-triggered key presses for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub step_down: bool,
    pub step_up: bool,
    pub dismiss: bool,
}

/// Arrow presses handed to the single control that claimed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowPress {
    pub left: bool,
    pub right: bool,
}

/// Per-frame arbitration state, threaded by `&mut` through every control and
/// popup drawn this frame.
///
/// Both claims are write-once per frame: the first control to take the arrow
/// press or the outside-click dismissal owns it, everyone after sees it taken.
#[derive(Resource, Debug, Default)]
pub struct FrameContext {
    input: FrameInput,
    dismissal_claimed: bool,
    key_claimed: bool,
}

impl FrameContext {
    pub fn new(input: FrameInput) -> Self {
        Self {
            input,
            ..default()
        }
    }

    /// Starts a new frame. Must run once, before any control is drawn.
    pub fn begin(&mut self, input: FrameInput) {
        *self = Self::new(input);
    }

    pub fn input(&self) -> FrameInput {
        self.input
    }

    pub fn claim_arrows(&mut self) -> Option<ArrowPress> {
        if self.key_claimed || !(self.input.step_down || self.input.step_up) {
            return None;
        }
        self.key_claimed = true;
        Some(ArrowPress {
            left: self.input.step_down,
            right: self.input.step_up,
        })
    }

    pub fn dismissal_claimed(&self) -> bool {
        self.dismissal_claimed
    }

    pub fn claim_dismissal(&mut self) {
        self.dismissal_claimed = true;
    }
}
