//! Engine-side interaction triggers.
//!
//! The host engine owns collision detection, input, and animation; what
//! crosses into this crate is a small set of triggered events. Systems and
//! observers here never ask *how* an overlap was detected — they only react
//! to these notifications.
//!
//! # Usage
//!
//! ```ignore
//! // Host detected a character stepping onto a switch's trigger volume:
//! commands.trigger(OverlapBegin { volume: switch_entity, other: character });
//! ```

use bevy_ecs::prelude::*;

/// Something entered an entity's trigger volume.
#[derive(Event, Debug, Clone, Copy)]
pub struct OverlapBegin {
    /// The entity owning the trigger volume.
    pub volume: Entity,
    /// The entity that entered it.
    pub other: Entity,
}

/// Something left an entity's trigger volume.
#[derive(Event, Debug, Clone, Copy)]
pub struct OverlapEnd {
    pub volume: Entity,
    pub other: Entity,
}

/// Damage directed at an entity's vitals.
///
/// Triggered by hosts and by [`crate::systems::weapon`] when an enabled
/// weapon overlaps a target.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageReceived {
    pub target: Entity,
    pub amount: f32,
    /// Who dealt it, when known.
    pub instigator: Option<Entity>,
}

/// A direct use/interact input aimed at an entity (a door handle, a lever).
///
/// Consumed by [`crate::systems::door::observe_door_interact`], which
/// toggles the targeted door.
#[derive(Event, Debug, Clone, Copy)]
pub struct Interact {
    pub target: Entity,
    pub instigator: Option<Entity>,
}
