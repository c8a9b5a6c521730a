//! Vitals systems and the damage observer.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::components::vitals::Vitals;
use crate::events::interaction::DamageReceived;
use crate::events::vitals::VitalsEvent;
use crate::resources::worldtime::WorldTime;

/// Route damage into the target's vitals.
pub fn observe_damage(trigger: On<DamageReceived>, mut vitals: Query<&mut Vitals>) {
    let event = trigger.event();
    if let Ok(mut v) = vitals.get_mut(event.target) {
        v.take_damage(event.amount);
    }
}

/// Advance every character's gauges and publish their changes.
pub fn vitals_update_system(
    world_time: Res<WorldTime>,
    mut commands: Commands,
    mut query: Query<(Entity, &mut Vitals)>,
) {
    let dt = world_time.delta.max(0.0);
    for (entity, mut vitals) in query.iter_mut() {
        for (gauge, change) in vitals.update(dt) {
            commands.trigger(VitalsEvent {
                entity,
                gauge,
                change,
            });
        }
    }
}
