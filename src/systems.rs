//! Core controller systems.
//!
//! These systems host the pure movement pipeline inside Bevy's fixed
//! timestep. They are generic over the physics backend so different physics
//! engines can be used.

use bevy::prelude::*;
use log::{debug, error};

use crate::backend::CharacterPhysicsBackend;
use crate::config::MovementConfig;
use crate::intent::MovementIntent;
use crate::state::{Airborne, Grounded};
use crate::step::{step, TickInput};

/// Reject invalid configs when they are added.
///
/// A bad config (non-positive mass, negative coefficients) is a construction
/// error, not something the per-tick pipeline tolerates: the component is
/// removed and the error logged once.
pub fn reject_invalid_configs(
    mut commands: Commands,
    q_configs: Query<(Entity, &MovementConfig), Added<MovementConfig>>,
) {
    for (entity, config) in &q_configs {
        if let Err(err) = config.validate() {
            error!("rejecting movement config on {entity}: {err}");
            commands.entity(entity).remove::<MovementConfig>();
        }
    }
}

/// Fill in gravity from the physics environment for configs that asked for it.
///
/// Runs on the flag set by `MovementConfig::with_environment_gravity`; the
/// flag is cleared after adoption, so the environment is consulted once per
/// character and never re-queried per tick.
pub fn adopt_ambient_gravity<B: CharacterPhysicsBackend>(world: &mut World) {
    let gravity = B::ambient_gravity(world);
    let mut q_configs = world.query::<(Entity, &mut MovementConfig)>();
    for (entity, mut config) in q_configs.iter_mut(world) {
        if config.gravity_from_environment {
            config.gravity = gravity;
            config.gravity_from_environment = false;
            debug!("adopted ambient gravity {gravity} on {entity}");
        }
    }
}

/// Run the movement pipeline for every character.
///
/// Reads the previous velocity and the floor fact from the backend, advances
/// the model by one tick, and hands the next velocity back. The backend's
/// move-and-resolve step owns everything after that: whatever velocity it
/// leaves behind is this system's input on the next tick.
pub fn apply_movement<B: CharacterPhysicsBackend>(world: &mut World) {
    let dt = B::fixed_timestep(world);

    let characters: Vec<(Entity, MovementConfig, MovementIntent)> = world
        .query::<(Entity, &MovementConfig, &MovementIntent)>()
        .iter(world)
        .map(|(entity, config, intent)| (entity, *config, *intent))
        .collect();

    for (entity, config, intent) in characters {
        let velocity = B::velocity(world, entity);
        let input = TickInput {
            direction: intent.direction,
            jump_pressed: intent.jump_pressed,
            jump_just_pressed: intent.jump_just_pressed(),
            on_floor: B::on_floor(world, entity),
            dt,
        };
        let next = step(&config, velocity, &input);
        B::set_velocity(world, entity, next);
    }
}

/// Sync [`Grounded`]/[`Airborne`] markers from the backend's floor fact.
pub fn sync_state_markers<B: CharacterPhysicsBackend>(world: &mut World) {
    let characters: Vec<(Entity, bool, bool)> = world
        .query_filtered::<(Entity, Has<Grounded>, Has<Airborne>), With<MovementConfig>>()
        .iter(world)
        .map(|(entity, has_grounded, has_airborne)| (entity, has_grounded, has_airborne))
        .collect();

    for (entity, has_grounded, has_airborne) in characters {
        let on_floor = B::on_floor(world, entity);
        let mut character = world.entity_mut(entity);
        if on_floor {
            if !has_grounded {
                character.insert(Grounded);
            }
            if has_airborne {
                character.remove::<Airborne>();
            }
        } else {
            if !has_airborne {
                character.insert(Airborne);
            }
            if has_grounded {
                character.remove::<Grounded>();
            }
        }
    }
}

/// Latch jump states at the end of each fixed update, so the next tick can
/// detect the rising edge.
pub fn latch_jump_edges(mut q_intents: Query<&mut MovementIntent>) {
    for mut intent in &mut q_intents {
        intent.latch_jump();
    }
}
