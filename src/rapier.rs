//! Rapier2D physics backend implementation.
//!
//! This module provides the physics backend for Bevy Rapier2D. Enable with
//! the `rapier2d` feature.
//!
//! The character is a kinematic body: the movement model owns gravity, drag
//! and friction, so Rapier's job is reduced to what the model treats as
//! external: moving the body by the computed velocity, sliding it along
//! level geometry, and reporting whether it ended up on the floor.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::config::MovementConfig;
use crate::ControllerSet;

/// The environment's y-axis gravity, cached once at startup.
///
/// Reading `RapierConfiguration` needs a query; the movement systems only
/// need the number, so it is captured into a resource before the first tick
/// and never re-queried.
#[derive(Resource, Debug, Clone, Copy)]
pub struct AmbientGravity(pub f32);

/// Rapier2D physics backend for the platformer controller.
///
/// Velocity lives in Rapier's [`Velocity`] component; the floor fact comes
/// from [`KinematicCharacterControllerOutput`]; motion is resolved by
/// Rapier's kinematic character controller.
pub struct Rapier2dBackend;

impl CharacterPhysicsBackend for Rapier2dBackend {
    fn plugin() -> impl Plugin {
        Rapier2dBackendPlugin
    }

    fn velocity(world: &World, entity: Entity) -> Vec2 {
        world
            .get::<Velocity>(entity)
            .map(|v| v.linvel)
            .unwrap_or(Vec2::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec2) {
        if let Some(mut vel) = world.get_mut::<Velocity>(entity) {
            vel.linvel = velocity;
        }
    }

    fn on_floor(world: &World, entity: Entity) -> bool {
        world
            .get::<KinematicCharacterControllerOutput>(entity)
            .map(|output| output.grounded)
            .unwrap_or(false)
    }

    fn ambient_gravity(world: &World) -> f32 {
        world
            .get_resource::<AmbientGravity>()
            .map(|gravity| gravity.0)
            .unwrap_or(-980.0)
    }
}

/// Plugin that sets up Rapier2D-specific systems for the controller.
pub struct Rapier2dBackendPlugin;

impl Plugin for Rapier2dBackendPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostStartup, cache_ambient_gravity);

        // Fold last tick's collision outcome into the velocity before the
        // movement pipeline reads it
        app.add_systems(
            FixedUpdate,
            absorb_ground_impact.in_set(ControllerSet::Feedback),
        );

        // Hand the new velocity to Rapier's move-and-slide resolution
        app.add_systems(
            FixedUpdate,
            drive_move_and_slide.in_set(ControllerSet::Actuation),
        );
    }
}

/// Capture the ambient gravity from the Rapier configuration.
fn cache_ambient_gravity(
    mut commands: Commands,
    q_rapier_config: Query<&RapierConfiguration>,
) {
    if let Ok(rapier_config) = q_rapier_config.get_single() {
        commands.insert_resource(AmbientGravity(rapier_config.gravity.y));
    }
}

/// Zero the downward velocity of grounded characters.
///
/// Rapier clamps the body's motion against the floor but leaves the velocity
/// we fed it untouched; the model's contract is that collision outcomes are
/// ground truth for the next tick, so a grounded character must not carry a
/// phantom downward speed into the force model.
fn absorb_ground_impact(
    mut q_characters: Query<
        (&mut Velocity, &KinematicCharacterControllerOutput),
        With<MovementConfig>,
    >,
) {
    for (mut velocity, output) in &mut q_characters {
        if output.grounded && velocity.linvel.y < 0.0 {
            velocity.linvel.y = 0.0;
        }
    }
}

/// Feed the computed velocity into Rapier's kinematic character controller.
///
/// This is the external move-and-resolve step: Rapier integrates the
/// translation, slides it along colliders, and reports floor contact in
/// [`KinematicCharacterControllerOutput`] for the next tick.
fn drive_move_and_slide(
    time: Res<Time<Fixed>>,
    mut q_characters: Query<(&Velocity, &mut KinematicCharacterController), With<MovementConfig>>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    for (velocity, mut controller) in &mut q_characters {
        controller.translation = Some(velocity.linvel * dt);
    }
}

/// Bundle for creating a character with Rapier2D physics.
///
/// The rigid body is kinematic: the movement model computes velocities
/// directly, so nothing here should be force-integrated by Rapier. The
/// [`Velocity`] component is the character's persistent movement state.
///
/// # Example
///
/// ```ignore
/// use bevy::prelude::*;
/// use bevy_rapier2d::prelude::*;
/// use force_platformer_controller::prelude::*;
///
/// fn spawn_player(mut commands: Commands) {
///     commands.spawn((
///         Transform::from_xyz(0.0, 100.0, 0.0),
///         MovementConfig::player().with_environment_gravity(),
///         MovementIntent::default(),
///         RapierPlatformerBundle::default(),
///         Collider::capsule_y(8.0, 4.0),
///     ));
/// }
/// ```
#[derive(Bundle)]
pub struct RapierPlatformerBundle {
    /// Kinematic body: moved by the controller, resolved by Rapier.
    pub rigid_body: RigidBody,
    /// Rapier's move-and-slide resolver. Receives the per-tick translation.
    pub controller: KinematicCharacterController,
    /// The character's linear velocity, i.e. the movement state itself.
    pub velocity: Velocity,
}

impl Default for RapierPlatformerBundle {
    fn default() -> Self {
        Self::new()
    }
}

impl RapierPlatformerBundle {
    /// Create a bundle with Rapier's default character-controller settings.
    pub fn new() -> Self {
        Self {
            rigid_body: RigidBody::KinematicPositionBased,
            controller: KinematicCharacterController::default(),
            velocity: Velocity::zero(),
        }
    }

    /// Builder: replace the kinematic character controller settings
    /// (autostep, slopes, snap-to-ground).
    pub fn with_controller(mut self, controller: KinematicCharacterController) -> Self {
        self.controller = controller;
        self
    }
}
