//! The per-tick movement pipeline.
//!
//! [`step`] is the whole model as a pure state transition: force model,
//! Newtonian integration with the jump override, then the noise filter. The
//! only state that survives a tick is the velocity itself; everything else
//! is the immutable config and the ephemeral [`TickInput`].

use bevy::prelude::*;

use crate::config::{JumpTrigger, MovementConfig};
use crate::forces;

/// Everything the model consumes for one fixed timestep.
///
/// Ephemeral: built by the host each tick and discarded afterwards. The
/// direction is expected in [-1, 1] per axis; [`step`] clamps defensively.
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Normalized movement direction. Only the x axis drives the model.
    pub direction: Vec2,
    /// Whether the jump action is held this tick.
    pub jump_pressed: bool,
    /// Whether the jump action transitioned from released to pressed this
    /// tick.
    pub jump_just_pressed: bool,
    /// Floor-contact fact, supplied by the host's collision layer.
    pub on_floor: bool,
    /// Seconds since the last tick. Must be positive; `step` is a no-op
    /// otherwise.
    pub dt: f32,
}

/// Advance the velocity by one fixed timestep.
///
/// Stages run in fixed order: force model, integration (with the jump
/// override on the vertical axis), noise filter. Pure: no hidden state, no
/// queries; the host owns collision resolution and feeds back whatever
/// velocity actually resulted on the next tick.
///
/// A non-positive `dt` is a contract violation by the host's scheduler; the
/// velocity is returned unchanged rather than dividing by zero in the
/// friction stop-force clamp.
pub fn step(config: &MovementConfig, velocity: Vec2, input: &TickInput) -> Vec2 {
    if !(input.dt > 0.0) {
        return velocity;
    }
    let direction = input.direction.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));

    let force_x =
        forces::horizontal_force(config, velocity.x, direction.x, input.on_floor, input.dt);
    let next_x = velocity.x + force_x / config.mass * input.dt;

    // Jump is an instantaneous impulse, not an accumulated force: it replaces
    // this tick's vertical integration entirely.
    let next_y = if jump_triggered(config, input) {
        config.jump_velocity
    } else {
        let force_y = forces::vertical_force(config, velocity.y, input.on_floor);
        velocity.y + force_y / config.mass * input.dt
    };

    remove_float_noise(config.noise_threshold, Vec2::new(next_x, next_y))
}

/// Whether the jump impulse fires this tick. Always requires floor contact;
/// the edge/held distinction is the config's trigger policy.
fn jump_triggered(config: &MovementConfig, input: &TickInput) -> bool {
    if !input.on_floor {
        return false;
    }
    match config.jump_trigger {
        JumpTrigger::Edge => input.jump_just_pressed,
        JumpTrigger::Held => input.jump_pressed,
    }
}

/// Zero each velocity component whose magnitude is below `threshold`.
///
/// The quadratic drag and clamped friction models approach zero
/// asymptotically without ever algebraically reaching it; this snap is what
/// lets a character intended to be at rest read as exactly `(0, 0)`.
/// Idempotent, per axis.
pub fn remove_float_noise(threshold: f32, velocity: Vec2) -> Vec2 {
    Vec2::new(
        snap_to_zero(threshold, velocity.x),
        snap_to_zero(threshold, velocity.y),
    )
}

#[inline]
fn snap_to_zero(threshold: f32, component: f32) -> f32 {
    if component.abs() < threshold {
        0.0
    } else {
        component
    }
}
