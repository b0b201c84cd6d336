//! State marker components.
//!
//! These components mirror the floor-contact fact reported by the physics
//! backend so downstream game systems (animation, audio, AI) can filter on
//! it with plain queries. They are added and removed by the controller each
//! tick and are mutually exclusive.

use bevy::prelude::*;

/// Marker component indicating the character is on the floor.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use force_platformer_controller::prelude::*;
///
/// // Grounded is a marker component - just use it in queries
/// fn check_grounded(grounded: Option<&Grounded>) -> bool {
///     grounded.is_some()
/// }
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Grounded;

/// Marker component indicating the character has no floor contact.
///
/// Mutually exclusive with [`Grounded`].
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Airborne;
