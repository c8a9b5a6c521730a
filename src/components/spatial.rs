//! World-space placement components.
//!
//! Written by the platform and pickup systems; hosts mirror them into
//! whatever scene representation they render with.

use bevy_ecs::prelude::Component;
use glam::Vec3;

/// World-space position in scene units.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec3);

/// Orientation as pitch/yaw/roll degrees.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation(pub Vec3);
