//! # `force_platformer_controller`
//!
//! A force-based 2D platformer character controller with physics backend
//! abstraction.
//!
//! This crate turns a normalized 2-axis input and the character's current
//! velocity into the next-frame velocity, once per fixed timestep:
//! - Horizontal motion is driven by a propulsion force, capped by a damping
//!   term past the target speed, and resisted by clamped kinetic friction on
//!   the ground or quadratic drag in the air
//! - Vertical motion integrates gravity and quadratic drag while airborne;
//!   jumping overrides the vertical velocity with an instantaneous impulse
//! - A final noise filter snaps near-zero components to exact rest, so
//!   floating-point residue never reads as micro-sliding
//!
//! ## Architecture
//!
//! The model itself is a pure state transition ([`step::step`]); everything
//! engine-facing sits behind a backend trait:
//! 1. You write a [`intent::MovementIntent`] from your input source
//! 2. The backend reports the velocity and the floor-contact fact
//! 3. The pipeline computes the next velocity in `FixedUpdate`
//! 4. The backend's move-and-resolve step applies it to the world; whatever
//!    velocity survives collision resolution is next tick's input
//!
//! ## Usage
//!
//! With the Rapier2D backend (feature `rapier2d`):
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_rapier2d::prelude::*;
//! use force_platformer_controller::prelude::*;
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(100.0))
//!     .add_plugins(PlatformerControllerPlugin::<Rapier2dBackend>::default())
//!     .run();
//! ```

use bevy::prelude::*;

pub mod backend;
pub mod config;
pub mod forces;
pub mod intent;
pub mod state;
pub mod step;
pub mod systems;

#[cfg(feature = "rapier2d")]
pub mod rapier;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::backend::CharacterPhysicsBackend;
    pub use crate::config::{ConfigError, DriveStrength, JumpTrigger, MovementConfig};
    pub use crate::intent::MovementIntent;
    pub use crate::state::{Airborne, Grounded};
    pub use crate::step::{step, TickInput};
    pub use crate::{ControllerSet, PlatformerControllerPlugin};

    #[cfg(feature = "rapier2d")]
    pub use crate::rapier::{Rapier2dBackend, RapierPlatformerBundle};
}

/// Execution phases of the controller within `FixedUpdate`.
///
/// The phases are chained: backend feedback from the previous tick's
/// collision resolution, then the movement pipeline, then the hand-off of
/// the new velocity to the backend's move-and-resolve step.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerSet {
    /// The backend folds last tick's collision outcome into the velocity.
    Feedback,
    /// Force model, integration and noise filter.
    Movement,
    /// The backend hands the new velocity to collision resolution.
    Actuation,
}

/// Main plugin for the platformer controller.
///
/// Generic over a physics backend `B` which owns velocity storage, floor
/// detection and collision resolution.
///
/// # Type Parameters
/// - `B`: The physics backend implementation (e.g., `Rapier2dBackend`)
pub struct PlatformerControllerPlugin<B: backend::CharacterPhysicsBackend> {
    _marker: std::marker::PhantomData<B>,
}

impl<B: backend::CharacterPhysicsBackend> Default for PlatformerControllerPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<B: backend::CharacterPhysicsBackend> Plugin for PlatformerControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        // Register core types
        app.register_type::<config::MovementConfig>();
        app.register_type::<intent::MovementIntent>();
        app.register_type::<state::Grounded>();
        app.register_type::<state::Airborne>();

        // Add the physics backend plugin
        app.add_plugins(B::plugin());

        app.configure_sets(
            FixedUpdate,
            (
                ControllerSet::Feedback,
                ControllerSet::Movement,
                ControllerSet::Actuation,
            )
                .chain(),
        );

        // Core pipeline in FixedUpdate for consistent physics behavior
        app.add_systems(
            FixedUpdate,
            (
                systems::reject_invalid_configs,
                systems::adopt_ambient_gravity::<B>,
                systems::apply_movement::<B>,
                systems::sync_state_markers::<B>,
            )
                .chain()
                .in_set(ControllerSet::Movement),
        );

        // Latch jump states at end of fixed update for edge detection
        app.add_systems(FixedPostUpdate, systems::latch_jump_edges);
    }
}
