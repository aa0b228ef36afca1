//! Per-frame input intent.
//!
//! The windowing layer decodes keys and mouse motion into an [`InputIntent`] once per frame. The
//! simulation only ever sees this structure, never raw key codes.

/// What the player wants to do this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputIntent {
    /// Forward (+1) or backward (-1) along the look direction.
    pub forward: f32,
    /// Right (+1) or left (-1) relative to the look direction.
    pub strafe: f32,
    /// Mouse movement in pixels since the last frame, `[dx, dy]`. Zero unless look is enabled.
    pub look_delta: [f32; 2],
    /// Jump held.
    pub jump: bool,
    /// Leave after this frame.
    pub quit: bool,
}

impl InputIntent {
    /// No movement, no look, no actions.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Copy with movement axes clamped to `[-1, 1]`. Non-finite axes become zero.
    pub fn clamped(&self) -> Self {
        let clamp_axis = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        Self {
            forward: clamp_axis(self.forward),
            strafe: clamp_axis(self.strafe),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_limits_axes() {
        let intent = InputIntent {
            forward: 3.0,
            strafe: f32::NAN,
            jump: true,
            ..InputIntent::idle()
        }
        .clamped();
        assert_eq!(intent.forward, 1.0);
        assert_eq!(intent.strafe, 0.0);
        assert!(intent.jump);
    }
}
