//! Movement intent components.
//!
//! Intents represent the desired movement direction from player input or AI.
//! The controller systems read these intents and feed them through the force
//! model each fixed timestep.

use bevy::prelude::*;

/// Per-character movement intent.
///
/// The crate does not poll input devices. You sample your input source every
/// frame (keyboard, gamepad, touch, AI, network) and write the result here;
/// the controller consumes it on the next fixed timestep.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use force_platformer_controller::prelude::*;
///
/// let mut intent = MovementIntent::new();
/// intent.set_direction(Vec2::new(1.0, 0.0));
/// intent.set_jump_pressed(true);
/// assert!(intent.jump_just_pressed());
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct MovementIntent {
    /// Desired movement direction, each axis clamped to [-1, 1].
    ///
    /// Only the x axis drives the force model; the y axis is carried for
    /// input sources that report a full 2D vector.
    pub direction: Vec2,
    /// Whether the jump action is currently active.
    ///
    /// Set this every frame with the current button state. With
    /// [`JumpTrigger::Edge`](crate::config::JumpTrigger) the controller
    /// detects the false-to-true transition itself; with
    /// [`JumpTrigger::Held`](crate::config::JumpTrigger) the raw state is
    /// used directly.
    pub jump_pressed: bool,
    /// Previous tick's `jump_pressed` state, for edge detection.
    /// Managed by the controller in `FixedPostUpdate`.
    pub(crate) jump_pressed_prev: bool,
}

impl MovementIntent {
    /// Create a new empty intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the movement direction. Each axis is clamped to [-1, 1].
    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    /// Set only the horizontal axis (-1.0 = left, 1.0 = right), clamped.
    pub fn set_walk(&mut self, direction: f32) {
        self.direction.x = direction.clamp(-1.0, 1.0);
    }

    /// Clear the movement direction.
    pub fn clear(&mut self) {
        self.direction = Vec2::ZERO;
    }

    /// Check if there is active horizontal input.
    pub fn is_walking(&self) -> bool {
        self.direction.x.abs() > 0.001
    }

    /// Set the jump state. Pass `true` while the player/AI wants to jump.
    pub fn set_jump_pressed(&mut self, pressed: bool) {
        self.jump_pressed = pressed;
    }

    /// Check if jump is currently active.
    pub fn is_jump_pressed(&self) -> bool {
        self.jump_pressed
    }

    /// Check if jump was pressed this tick (rising edge).
    pub fn jump_just_pressed(&self) -> bool {
        self.jump_pressed && !self.jump_pressed_prev
    }

    /// Latch the current jump state for next tick's edge detection.
    pub(crate) fn latch_jump(&mut self) {
        self.jump_pressed_prev = self.jump_pressed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_new() {
        let intent = MovementIntent::new();
        assert_eq!(intent.direction, Vec2::ZERO);
        assert!(!intent.jump_pressed);
        assert!(!intent.jump_pressed_prev);
    }

    #[test]
    fn set_direction_clamps_each_axis() {
        let mut intent = MovementIntent::new();
        intent.set_direction(Vec2::new(5.0, -3.0));
        assert_eq!(intent.direction, Vec2::new(1.0, -1.0));

        intent.set_direction(Vec2::new(0.5, 0.25));
        assert_eq!(intent.direction, Vec2::new(0.5, 0.25));
    }

    #[test]
    fn set_walk_clamps() {
        let mut intent = MovementIntent::new();
        intent.set_walk(2.0);
        assert_eq!(intent.direction.x, 1.0);

        intent.set_walk(-2.0);
        assert_eq!(intent.direction.x, -1.0);
    }

    #[test]
    fn is_walking() {
        let mut intent = MovementIntent::new();
        assert!(!intent.is_walking());

        intent.set_walk(0.5);
        assert!(intent.is_walking());

        intent.set_walk(0.0001); // Below threshold
        assert!(!intent.is_walking());
    }

    #[test]
    fn clear_resets_direction() {
        let mut intent = MovementIntent::new();
        intent.set_direction(Vec2::ONE);
        intent.clear();
        assert_eq!(intent.direction, Vec2::ZERO);
    }

    #[test]
    fn jump_just_pressed_is_a_rising_edge() {
        let mut intent = MovementIntent::new();
        assert!(!intent.jump_just_pressed());

        intent.set_jump_pressed(true);
        assert!(intent.jump_just_pressed());

        // Still held after the latch: no longer "just" pressed
        intent.latch_jump();
        assert!(intent.is_jump_pressed());
        assert!(!intent.jump_just_pressed());

        // Release and press again: a new edge
        intent.set_jump_pressed(false);
        intent.latch_jump();
        intent.set_jump_pressed(true);
        assert!(intent.jump_just_pressed());
    }
}
