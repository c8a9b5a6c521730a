//! Headless simulation driver.
//!
//! [`Sim`] owns the ECS `World` and the per-frame `Schedule` with every
//! interactive-object system wired in deterministic order: commands are
//! applied first, then each object family advances and publishes its
//! notifications, then the message mailboxes roll over. Hosts and
//! integration tests drive it one frame at a time:
//!
//! ```ignore
//! let mut sim = Sim::new();
//! sim.world.add_observer(|trigger: On<DoorEvent>| { /* ... */ });
//! let door = sim.world.spawn(Door::default()).id();
//! sim.send_door_command(door, DoorAction::Open);
//! sim.tick(1.0 / 60.0);
//! ```
//!
//! Everything runs single-threaded; observers fire synchronously inside
//! the frame that triggered them.

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;

use crate::events::door::{DoorAction, DoorCommand};
use crate::events::floorswitch::{SwitchAction, SwitchCommand};
use crate::events::interaction::{DamageReceived, Interact, OverlapBegin, OverlapEnd};
use crate::events::platform::{PlatformAction, PlatformCommand, PlatformProgress};
use crate::resources::splinestore::SplineStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::door::{
    door_command_system, door_update_system, observe_door_interact, update_door_commands,
};
use crate::systems::floorswitch::{
    observe_switch_overlap_begin, observe_switch_overlap_end, switch_command_system,
    switch_update_system, update_switch_commands,
};
use crate::systems::pickup::{observe_pickup_overlap, pickup_animation_system};
use crate::systems::platform::{
    floating_platform_update_system, moving_platform_progress_system,
    moving_platform_update_system, platform_command_system, update_platform_commands,
    update_platform_progress,
};
use crate::systems::time::advance_world_time;
use crate::systems::vitals::{observe_damage, vitals_update_system};
use crate::systems::weapon::observe_weapon_overlap;

/// World plus per-frame schedule, ready to tick.
pub struct Sim {
    pub world: World,
    schedule: Schedule,
}

impl Default for Sim {
    fn default() -> Self {
        Self::new()
    }
}

impl Sim {
    pub fn new() -> Self {
        let mut world = World::new();
        world.init_resource::<WorldTime>();
        world.init_resource::<SplineStore>();
        world.init_resource::<Messages<DoorCommand>>();
        world.init_resource::<Messages<SwitchCommand>>();
        world.init_resource::<Messages<PlatformCommand>>();
        world.init_resource::<Messages<PlatformProgress>>();

        world.add_observer(observe_door_interact);
        world.add_observer(observe_switch_overlap_begin);
        world.add_observer(observe_switch_overlap_end);
        world.add_observer(observe_weapon_overlap);
        world.add_observer(observe_pickup_overlap);
        world.add_observer(observe_damage);

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                door_command_system,
                switch_command_system,
                platform_command_system,
                moving_platform_progress_system,
            )
                .chain(),
        );
        schedule.add_systems(
            (
                door_update_system.after(door_command_system),
                switch_update_system.after(switch_command_system),
                floating_platform_update_system.after(platform_command_system),
                moving_platform_update_system.after(moving_platform_progress_system),
                vitals_update_system,
                pickup_animation_system,
            )
                .chain(),
        );
        schedule.add_systems(
            (
                update_door_commands.after(door_update_system),
                update_switch_commands.after(switch_update_system),
                update_platform_commands.after(floating_platform_update_system),
                update_platform_progress.after(moving_platform_update_system),
            )
                .chain(),
        );

        Self { world, schedule }
    }

    /// Advance one frame: update the clock, then run every system.
    pub fn tick(&mut self, dt: f32) {
        advance_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
    }

    /// Register splines the path walkers can resolve.
    pub fn insert_spline(
        &mut self,
        key: impl Into<String>,
        spline: crate::resources::splinestore::Spline,
    ) {
        self.world
            .resource_mut::<SplineStore>()
            .insert(key, spline);
    }

    pub fn send_door_command(&mut self, entity: Entity, action: DoorAction) {
        self.world
            .resource_mut::<Messages<DoorCommand>>()
            .write(DoorCommand { entity, action });
    }

    pub fn send_switch_command(&mut self, entity: Entity, action: SwitchAction) {
        self.world
            .resource_mut::<Messages<SwitchCommand>>()
            .write(SwitchCommand { entity, action });
    }

    pub fn send_platform_command(&mut self, entity: Entity, action: PlatformAction) {
        self.world
            .resource_mut::<Messages<PlatformCommand>>()
            .write(PlatformCommand { entity, action });
    }

    pub fn send_platform_progress(&mut self, entity: Entity, progress: f32, leg_finished: bool) {
        self.world
            .resource_mut::<Messages<PlatformProgress>>()
            .write(PlatformProgress {
                entity,
                progress,
                leg_finished,
            });
    }

    /// Host-side collision result: something entered a trigger volume.
    pub fn overlap_begin(&mut self, volume: Entity, other: Entity) {
        self.world.trigger(OverlapBegin { volume, other });
    }

    /// Host-side collision result: a trigger volume was vacated.
    pub fn overlap_end(&mut self, volume: Entity, other: Entity) {
        self.world.trigger(OverlapEnd { volume, other });
    }

    /// Host-side use/interact input aimed at an entity.
    pub fn interact(&mut self, target: Entity, instigator: Option<Entity>) {
        self.world.trigger(Interact { target, instigator });
    }

    /// Host-side damage (environmental hazards, scripts).
    pub fn deal_damage(&mut self, target: Entity, amount: f32, instigator: Option<Entity>) {
        self.world.trigger(DamageReceived {
            target,
            amount,
            instigator,
        });
    }
}
