//! The force model.
//!
//! Pure functions that turn the current kinematic state and input direction
//! into horizontal and vertical forces. No hidden state: everything is a
//! function of the config, the velocity, the floor flag and the timestep.
//!
//! Horizontal force is drive + damping + friction. Vertical force is drag +
//! gravity while airborne and exactly zero on the floor, where contact
//! absorbs gravity and the integrator's jump override handles the rest.

use crate::config::MovementConfig;

/// Sign with `sign(0) = 0`.
///
/// `f32::signum` maps `0.0` to `1.0`, which would give a resting body drag
/// and friction directions it must not have.
#[inline]
fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Quadratic drag opposing the current velocity: `-sign(v) * c * v²`.
///
/// Exactly zero at rest. Used vertically while airborne, and horizontally in
/// place of ground friction when there is no traction.
#[inline]
pub fn drag(config: &MovementConfig, velocity: f32) -> f32 {
    -sign(velocity) * config.drag_coefficient * velocity * velocity
}

/// Horizontal resistance, state-dependent.
///
/// - Airborne: quadratic [`drag`] only, since there is no traction in the air.
/// - Grounded with nonzero input in the direction of motion: zero. Nothing
///   opposes active, same-direction drive.
/// - Grounded otherwise (coasting or braking): kinetic friction opposing the
///   velocity, clamped so it can never reverse the velocity within one tick.
pub fn friction(
    config: &MovementConfig,
    velocity_x: f32,
    direction_x: f32,
    on_floor: bool,
    dt: f32,
) -> f32 {
    if !on_floor {
        return drag(config, velocity_x);
    }
    if direction_x != 0.0 && sign(direction_x) == sign(velocity_x) {
        return 0.0;
    }
    kinetic_friction(config, velocity_x, dt)
}

/// Clamped kinetic friction for a grounded, coasting or braking character.
///
/// Magnitude is `friction_coefficient * mass * |gravity|` (flat-ground normal
/// force), capped at the stop force `|v| * mass / dt` that would zero the
/// velocity exactly this tick. Without the cap a constant friction force
/// overshoots zero and flips the velocity sign every tick. Below the noise
/// threshold friction is zero: the velocity is about to be snapped to rest
/// anyway, and the stop-force division would blow up.
fn kinetic_friction(config: &MovementConfig, velocity_x: f32, dt: f32) -> f32 {
    if velocity_x.abs() < config.noise_threshold {
        return 0.0;
    }
    let max_friction = config.friction_coefficient * config.mass * config.gravity.abs();
    let stop_force = velocity_x.abs() * config.mass / dt;
    -sign(velocity_x) * max_friction.min(stop_force)
}

/// Net horizontal force: drive + damping + friction.
///
/// Damping cancels the drive term while the character is past
/// `target_max_speed` and still driving in the direction of motion. It never
/// actively decelerates below the cap.
pub fn horizontal_force(
    config: &MovementConfig,
    velocity_x: f32,
    direction_x: f32,
    on_floor: bool,
    dt: f32,
) -> f32 {
    let drive = direction_x * config.drive_force();

    let damping = if velocity_x.abs() > config.target_max_speed && sign(drive) == sign(velocity_x)
    {
        -drive
    } else {
        0.0
    };

    drive + damping + friction(config, velocity_x, direction_x, on_floor, dt)
}

/// Net vertical force: drag + gravity while airborne, zero on the floor.
pub fn vertical_force(config: &MovementConfig, velocity_y: f32, on_floor: bool) -> f32 {
    if on_floor {
        return 0.0;
    }
    drag(config, velocity_y) + config.mass * config.gravity
}
