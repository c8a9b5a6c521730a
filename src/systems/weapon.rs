//! Weapon overlap observer.
//!
//! Converts an overlap of an enabled weapon into a [`DamageReceived`]
//! trigger aimed at whatever it hit. The weapon never despawns or damages
//! anything itself; the target's vitals decide what the hit means.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::components::weapon::Weapon;
use crate::events::interaction::{DamageReceived, OverlapBegin};

/// Deal the weapon's damage to whatever entered its collision volume.
pub fn observe_weapon_overlap(
    trigger: On<OverlapBegin>,
    weapons: Query<&Weapon>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Ok(weapon) = weapons.get(event.volume) else {
        return;
    };
    if !weapon.is_collision_enabled() {
        return;
    }
    commands.trigger(DamageReceived {
        target: event.other,
        amount: weapon.damage(),
        instigator: Some(event.volume),
    });
}
