//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement to
//! work with the movement model. The model itself never talks to an engine
//! type: it consumes a velocity and a floor-contact fact, and hands the next
//! velocity back for the backend's own move-and-resolve step.

use bevy::prelude::*;

/// Trait for physics backend implementations.
///
/// The contract is deliberately narrow, matching what the model consumes per
/// tick: read/write the character's velocity, report the floor fact, supply
/// the fixed timestep and the ambient gravity. Collision resolution and floor
/// detection stay entirely on the backend's side; whatever the backend does
/// to the velocity after moving the body is ground truth for the next tick.
///
/// For an example implementation, see the `rapier` module's `Rapier2dBackend`
/// (feature `rapier2d`).
pub trait CharacterPhysicsBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Get the current linear velocity of an entity.
    fn velocity(world: &World, entity: Entity) -> Vec2;

    /// Set the linear velocity of an entity.
    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec2);

    /// Whether the entity currently has floor contact.
    ///
    /// A boolean fact: contact normals, slopes and multi-shape contacts are
    /// the backend's business.
    fn on_floor(world: &World, entity: Entity) -> bool;

    /// Get the fixed timestep delta in seconds.
    fn fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<Time<Fixed>>()
            .map(|t| t.delta_secs())
            .filter(|&dt| dt > 0.0)
            .unwrap_or(1.0 / 60.0)
    }

    /// The environment's y-axis gravity acceleration (negative = down).
    ///
    /// Queried once per character, when its config is added, never per tick.
    fn ambient_gravity(_world: &World) -> f32 {
        -980.0
    }
}

/// Empty plugin for backends that don't need additional setup.
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}
