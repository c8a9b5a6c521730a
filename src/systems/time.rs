//! Simulation clock update.
//!
//! [`Sim::tick`](crate::sim::Sim::tick) advances the clock before running
//! the schedule, so every system in the frame reads the same scaled delta
//! from [`WorldTime`](crate::resources::worldtime::WorldTime).

use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Scale the host's frame delta and accumulate it on `WorldTime`.
///
/// `dt` is the unscaled frame delta in seconds; negative values (a host
/// clock hiccup) are treated as zero so the simulation never runs
/// backwards.
pub fn advance_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled = dt.max(0.0) * wt.time_scale;
    wt.elapsed += scaled;
    wt.delta = scaled;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_scaled_and_accumulated() {
        let mut world = World::new();
        world.init_resource::<WorldTime>();
        world.resource_mut::<WorldTime>().time_scale = 0.5;

        advance_world_time(&mut world, 1.0);
        advance_world_time(&mut world, 1.0);
        let wt = world.resource::<WorldTime>();
        assert_eq!(wt.delta, 0.5);
        assert_eq!(wt.elapsed, 1.0);
    }

    #[test]
    fn test_negative_delta_clamped() {
        let mut world = World::new();
        world.init_resource::<WorldTime>();

        advance_world_time(&mut world, 1.0);
        advance_world_time(&mut world, -0.25);
        let wt = world.resource::<WorldTime>();
        assert_eq!(wt.delta, 0.0);
        assert_eq!(wt.elapsed, 1.0);
    }
}
