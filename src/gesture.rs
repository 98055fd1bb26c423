//! The drawing state machine: one pointer drag proposing one region.
//!
//! Two states only. `pointer_down` arms the gesture and captures the anchor
//! corner; `pointer_up` disarms it and reports the raw rectangle between the
//! anchor and the release point. The rectangle is intentionally not
//! normalized — a leftward/upward drag produces negative width/height, and
//! downstream conversion preserves those signs.
//!
//! Label eligibility is deliberately not checked here: drags are always
//! allowed to start, and a drag with nothing to label is silently discarded
//! by the engine at completion.

/// Raw output of a completed gesture: anchor corner plus signed extent, in
/// canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum DrawState {
    Idle,
    Armed { anchor_x: f64, anchor_y: f64 },
}

/// Tracks the single in-progress drag. At most one gesture exists; pointer
/// downs arriving while already armed are ignored, so a second pointer can
/// never move the anchor mid-gesture.
#[derive(Debug)]
pub struct DrawGesture {
    state: DrawState,
}

impl DrawGesture {
    pub fn new() -> Self {
        Self { state: DrawState::Idle }
    }

    /// Whether a drag is currently in progress.
    pub fn is_armed(&self) -> bool {
        matches!(self.state, DrawState::Armed { .. })
    }

    /// Arm the gesture at `(x, y)`. No-op when already armed.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if let DrawState::Idle = self.state {
            self.state = DrawState::Armed { anchor_x: x, anchor_y: y };
        }
    }

    /// Complete the gesture at `(x, y)`, returning the raw rectangle from
    /// the captured anchor. Returns `None` when no gesture was armed.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> Option<GestureRect> {
        match self.state {
            DrawState::Armed { anchor_x, anchor_y } => {
                self.state = DrawState::Idle;
                Some(GestureRect {
                    x: anchor_x,
                    y: anchor_y,
                    width: x - anchor_x,
                    height: y - anchor_y,
                })
            }
            DrawState::Idle => None,
        }
    }
}

impl Default for DrawGesture {
    fn default() -> Self {
        Self::new()
    }
}
