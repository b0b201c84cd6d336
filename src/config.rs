//! Movement configuration components.
//!
//! This module defines the tunable constants of the force model: drive
//! strength, mass, gravity, drag and friction coefficients, the speed cap,
//! jump velocity and the noise threshold. All of them are set at construction
//! and read-only afterwards.

use bevy::prelude::*;
use thiserror::Error;

/// Parameterization of the horizontal drive term.
///
/// The drive can be tuned either as a raw force or as a target acceleration
/// that is scaled by the character's mass. Both produce a force; they only
/// differ in which number the designer keeps constant when mass changes.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DriveStrength {
    /// Horizontal propulsion as a force in newtons (mass-dependent feel).
    Force(f32),
    /// Horizontal propulsion as an acceleration; the applied force is
    /// `acceleration * mass` (mass-independent feel).
    Acceleration(f32),
}

impl DriveStrength {
    /// Resolve the drive term to a force for the given mass.
    #[inline]
    pub fn as_force(&self, mass: f32) -> f32 {
        match *self {
            Self::Force(force) => force,
            Self::Acceleration(acceleration) => acceleration * mass,
        }
    }
}

/// Jump trigger policy.
///
/// Edge-triggered jumping fires once per press. Held-triggered jumping fires
/// on every grounded tick while the button is down, which causes continuous
/// re-jumping; kept only for characters that genuinely want pogo behavior.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JumpTrigger {
    /// Jump only on the tick the button transitions from released to pressed.
    #[default]
    Edge,
    /// Jump on every grounded tick while the button is held.
    Held,
}

/// Tunable constants for the force-based movement model.
///
/// Immutable per character: set the fields at construction (builder methods
/// below) and insert the component. Invalid values are rejected when the
/// component is added; see [`MovementConfig::validate`].
///
/// The vertical convention is Bevy's y-up: `gravity` is a signed y-axis
/// acceleration (negative pulls down) and `jump_velocity` is positive-up.
///
/// # Example
///
/// ```rust
/// use force_platformer_controller::prelude::*;
///
/// let config = MovementConfig::default()
///     .with_drive_acceleration(1000.0)
///     .with_mass(84.0)
///     .with_jump_velocity(300.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementConfig {
    /// Horizontal propulsion strength, as a force or a mass-scaled
    /// acceleration.
    pub drive: DriveStrength,

    /// Character mass in kilograms. Must be positive; converts forces to
    /// accelerations.
    pub mass: f32,

    /// Signed y-axis gravity acceleration (negative = down).
    ///
    /// Set explicitly, or use [`MovementConfig::with_environment_gravity`] to
    /// adopt the host physics environment's gravity once at spawn.
    pub gravity: f32,

    /// Quadratic air-resistance factor (≥ 0). Applied vertically while
    /// airborne and horizontally in place of ground friction.
    pub drag_coefficient: f32,

    /// Ground kinetic-friction factor (≥ 0). The friction force is clamped so
    /// it can never reverse the velocity within one tick.
    pub friction_coefficient: f32,

    /// Horizontal speed above which damping cancels the drive force (> 0).
    /// Damping never actively brakes below the cap.
    pub target_max_speed: f32,

    /// Vertical speed set instantaneously on jump (positive-up).
    pub jump_velocity: f32,

    /// Velocity magnitude below which a component snaps to zero (≥ 0).
    ///
    /// This is a tuning knob, not a semantic constant; sensible values for
    /// different characters differ by an order of magnitude.
    pub noise_threshold: f32,

    /// When the jump impulse fires. Defaults to [`JumpTrigger::Edge`].
    pub jump_trigger: JumpTrigger,

    /// Set by `with_environment_gravity`; consumed once when the component is
    /// added.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) gravity_from_environment: bool,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            // F = ma, so the drive force is large
            drive: DriveStrength::Force(70_000.0),
            mass: 70.0,
            gravity: -980.0,
            drag_coefficient: 0.0043,
            friction_coefficient: 1.2,
            target_max_speed: 300.0,
            jump_velocity: 275.0,
            noise_threshold: 10.0,
            jump_trigger: JumpTrigger::Edge,
            gravity_from_environment: false,
        }
    }
}

impl MovementConfig {
    /// Create a config with the default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config tuned for a responsive player character, parameterized
    /// by acceleration rather than raw force.
    pub fn player() -> Self {
        Self {
            drive: DriveStrength::Acceleration(1000.0),
            mass: 84.0,
            friction_coefficient: 2.0,
            jump_velocity: 300.0,
            ..Self::default()
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found: non-positive mass or target
    /// max speed, or a negative drag coefficient, friction coefficient, or
    /// noise threshold. NaN fails every check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.mass > 0.0) {
            return Err(ConfigError::NonPositiveMass(self.mass));
        }
        if !(self.target_max_speed > 0.0) {
            return Err(ConfigError::NonPositiveTargetMaxSpeed(self.target_max_speed));
        }
        if !(self.drag_coefficient >= 0.0) {
            return Err(ConfigError::NegativeDragCoefficient(self.drag_coefficient));
        }
        if !(self.friction_coefficient >= 0.0) {
            return Err(ConfigError::NegativeFrictionCoefficient(
                self.friction_coefficient,
            ));
        }
        if !(self.noise_threshold >= 0.0) {
            return Err(ConfigError::NegativeNoiseThreshold(self.noise_threshold));
        }
        Ok(())
    }

    /// Resolve the drive term to a force for this config's mass.
    #[inline]
    pub fn drive_force(&self) -> f32 {
        self.drive.as_force(self.mass)
    }

    /// Builder: set the drive term as a raw force.
    pub fn with_drive_force(mut self, force: f32) -> Self {
        self.drive = DriveStrength::Force(force);
        self
    }

    /// Builder: set the drive term as a mass-scaled acceleration.
    pub fn with_drive_acceleration(mut self, acceleration: f32) -> Self {
        self.drive = DriveStrength::Acceleration(acceleration);
        self
    }

    /// Builder: set the mass.
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Builder: set the gravity acceleration (signed, negative = down).
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self.gravity_from_environment = false;
        self
    }

    /// Builder: adopt the physics backend's ambient gravity once, when the
    /// component is added. Until then `gravity` keeps its current value.
    pub fn with_environment_gravity(mut self) -> Self {
        self.gravity_from_environment = true;
        self
    }

    /// Builder: set the quadratic drag coefficient.
    pub fn with_drag_coefficient(mut self, coefficient: f32) -> Self {
        self.drag_coefficient = coefficient;
        self
    }

    /// Builder: set the ground friction coefficient.
    pub fn with_friction_coefficient(mut self, coefficient: f32) -> Self {
        self.friction_coefficient = coefficient;
        self
    }

    /// Builder: set the horizontal speed cap.
    pub fn with_target_max_speed(mut self, speed: f32) -> Self {
        self.target_max_speed = speed;
        self
    }

    /// Builder: set the jump velocity (positive-up).
    pub fn with_jump_velocity(mut self, velocity: f32) -> Self {
        self.jump_velocity = velocity;
        self
    }

    /// Builder: set the noise threshold.
    pub fn with_noise_threshold(mut self, threshold: f32) -> Self {
        self.noise_threshold = threshold;
        self
    }

    /// Builder: set the jump trigger policy.
    pub fn with_jump_trigger(mut self, trigger: JumpTrigger) -> Self {
        self.jump_trigger = trigger;
        self
    }
}

/// Configuration errors reported by [`MovementConfig::validate`].
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Mass must be positive to convert forces to accelerations.
    #[error("mass must be positive, got {0}")]
    NonPositiveMass(f32),
    /// The damping stage needs a positive speed cap.
    #[error("target max speed must be positive, got {0}")]
    NonPositiveTargetMaxSpeed(f32),
    /// Negative drag would accelerate the character along its velocity.
    #[error("drag coefficient must be non-negative, got {0}")]
    NegativeDragCoefficient(f32),
    /// Negative friction would accelerate the character along its velocity.
    #[error("friction coefficient must be non-negative, got {0}")]
    NegativeFrictionCoefficient(f32),
    /// The noise filter threshold is a magnitude.
    #[error("noise threshold must be non-negative, got {0}")]
    NegativeNoiseThreshold(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(MovementConfig::default().validate(), Ok(()));
    }

    #[test]
    fn player_preset_is_valid() {
        let player = MovementConfig::player();
        assert_eq!(player.validate(), Ok(()));
        assert_eq!(player.mass, 84.0);
        assert_eq!(player.jump_trigger, JumpTrigger::Edge);
    }

    #[test]
    fn drive_force_parameterization() {
        let config = MovementConfig::default().with_drive_force(70_000.0);
        assert_eq!(config.drive_force(), 70_000.0);

        // Same force either way: 1000 * 70 = 70_000
        let config = config.with_drive_acceleration(1000.0);
        assert_eq!(config.drive_force(), 70_000.0);
    }

    #[test]
    fn drive_acceleration_scales_with_mass() {
        let config = MovementConfig::default()
            .with_mass(2.0)
            .with_drive_acceleration(10.0);
        assert_eq!(config.drive_force(), 20.0);
    }

    #[test]
    fn non_positive_mass_is_rejected() {
        let config = MovementConfig::default().with_mass(0.0);
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveMass(0.0)));

        let config = MovementConfig::default().with_mass(-5.0);
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveMass(-5.0)));
    }

    #[test]
    fn nan_mass_is_rejected() {
        let config = MovementConfig::default().with_mass(f32::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveMass(_))
        ));
    }

    #[test]
    fn non_positive_target_max_speed_is_rejected() {
        let config = MovementConfig::default().with_target_max_speed(0.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveTargetMaxSpeed(0.0))
        );
    }

    #[test]
    fn negative_coefficients_are_rejected() {
        let config = MovementConfig::default().with_drag_coefficient(-0.1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeDragCoefficient(_))
        ));

        let config = MovementConfig::default().with_friction_coefficient(-1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeFrictionCoefficient(_))
        ));

        let config = MovementConfig::default().with_noise_threshold(-10.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeNoiseThreshold(_))
        ));
    }

    #[test]
    fn zero_coefficients_are_valid() {
        let config = MovementConfig::default()
            .with_drag_coefficient(0.0)
            .with_friction_coefficient(0.0)
            .with_noise_threshold(0.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn with_gravity_clears_environment_flag() {
        let config = MovementConfig::default()
            .with_environment_gravity()
            .with_gravity(-490.0);
        assert!(!config.gravity_from_environment);
        assert_eq!(config.gravity, -490.0);
    }

    #[test]
    fn environment_gravity_flag_is_set_by_builder() {
        let config = MovementConfig::default().with_environment_gravity();
        assert!(config.gravity_from_environment);
    }
}
