//! Pickup notifications.

use bevy_ecs::prelude::*;

use crate::components::pickup::PickupKind;

/// A pickup was collected and is about to despawn.
#[derive(Event, Debug, Clone, Copy)]
pub struct PickupCollected {
    pub pickup: Entity,
    pub collector: Entity,
    pub kind: PickupKind,
}
