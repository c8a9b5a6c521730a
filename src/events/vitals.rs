//! Vitals notifications.
//!
//! Triggered by [`crate::systems::vitals`] for every gauge change a
//! character's vitals produce. A `Depleted` change on the health gauge is
//! the "character died" signal hosts usually care about.

use bevy_ecs::prelude::*;

use crate::components::gauge::GaugeEvent;
use crate::components::vitals::VitalKind;

/// A change in one of an entity's vital gauges.
#[derive(Event, Debug, Clone, Copy)]
pub struct VitalsEvent {
    pub entity: Entity,
    pub gauge: VitalKind,
    pub change: GaugeEvent,
}
