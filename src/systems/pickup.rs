//! Pickup systems.
//!
//! The overlap observer applies a pickup's effect to its collector and
//! despawns the pickup entity; the animation system keeps idle pickups
//! bobbing and spinning in place.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::components::inventory::Inventory;
use crate::components::pickup::{Pickup, PickupKind};
use crate::components::spatial::{Orientation, Position};
use crate::components::vitals::Vitals;
use crate::events::interaction::OverlapBegin;
use crate::events::pickup::PickupCollected;
use crate::resources::worldtime::WorldTime;

/// Collect a pickup when something walks into it.
pub fn observe_pickup_overlap(
    trigger: On<OverlapBegin>,
    mut pickups: Query<&mut Pickup>,
    mut vitals: Query<&mut Vitals>,
    mut inventories: Query<&mut Inventory>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Ok(mut pickup) = pickups.get_mut(event.volume) else {
        return;
    };
    if !pickup.claim() {
        return;
    }

    match pickup.kind() {
        PickupKind::Coin { value } => {
            if let Ok(mut inventory) = inventories.get_mut(event.other) {
                inventory.add_coins(value);
            }
        }
        PickupKind::Potion { heal } => {
            if let Ok(mut v) = vitals.get_mut(event.other) {
                v.heal(heal, true);
            }
        }
        PickupKind::Weapon { damage, slot } => {
            if let Ok(mut inventory) = inventories.get_mut(event.other) {
                inventory.equip_weapon(slot, damage);
            }
        }
    }

    commands.trigger(PickupCollected {
        pickup: event.volume,
        collector: event.other,
        kind: pickup.kind(),
    });
    commands.entity(event.volume).despawn();
}

/// Bob and spin idle pickups around their spawn position.
pub fn pickup_animation_system(
    world_time: Res<WorldTime>,
    mut query: Query<(&mut Pickup, &mut Position, &mut Orientation)>,
) {
    let dt = world_time.delta.max(0.0);
    for (mut pickup, mut position, mut orientation) in query.iter_mut() {
        let (pos, yaw_delta) = pickup.animate(dt, position.0);
        position.0 = pos;
        orientation.0.y += yaw_delta;
    }
}
