//! Edge-triggered pointer input.
//!
//! A click is recognised only on the transition from "not pressed" to
//! "pressed"; holding the button down does not repeat it. The window
//! samples the pointer every time it processes events, which can be
//! several times per loop iteration while a capture is in flight, so the
//! first press is latched until the controller takes it.

/// One pointer sample taken during the input poll.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Primary (left) button is currently held.
    pub primary_down: bool,
    /// Cursor position in surface coordinates, `None` when outside.
    pub position: Option<(f32, f32)>,
}

impl PointerState {
    pub fn released() -> Self {
        Self::default()
    }

    pub fn pressed_at(x: f32, y: f32) -> Self {
        Self {
            primary_down: true,
            position: Some((x, y)),
        }
    }
}

/// Tracks the previous button state and reports rising edges.
#[derive(Debug, Default)]
pub struct EdgeTrigger {
    was_down: bool,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current button state; returns `true` only when the
    /// button went down since the previous call.
    pub fn pressed_this_iteration(&mut self, down: bool) -> bool {
        let edge = down && !self.was_down;
        self.was_down = down;
        edge
    }
}

/// Remembers the first rising edge seen between two [`PressLatch::take`]
/// calls, so a press released before the next input poll still counts.
#[derive(Debug, Default)]
pub struct PressLatch {
    trigger: EdgeTrigger,
    pending: Option<PointerState>,
}

impl PressLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one pointer sample taken after processing window events.
    pub fn observe(&mut self, sample: PointerState) {
        if self.trigger.pressed_this_iteration(sample.primary_down) && self.pending.is_none() {
            self.pending = Some(sample);
        }
    }

    /// The latched press, if any. Clears the latch.
    pub fn take(&mut self) -> Option<PointerState> {
        self.pending.take()
    }
}
