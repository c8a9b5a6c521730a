//! Platform systems.
//!
//! Self-driving platforms are advanced by [`floating_platform_update_system`],
//! which resolves each platform's spline, integrates its progress, writes the
//! sampled pose into `Position`/`Orientation`, and publishes
//! [`PlatformNotice`]s. Externally-animated platforms are fed through the
//! [`PlatformProgress`] mailbox instead. A platform whose spline key is not
//! in the [`SplineStore`] stays inert and reports it once.

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;

use crate::components::platform::{FloatingPlatform, MovingPlatform};
use crate::components::spatial::{Orientation, Position};
use crate::events::platform::{PlatformAction, PlatformCommand, PlatformNotice, PlatformProgress};
use crate::resources::splinestore::SplineStore;
use crate::resources::worldtime::WorldTime;

/// Apply queued start/stop/move-to-point commands.
pub fn platform_command_system(
    mut reader: MessageReader<PlatformCommand>,
    splines: Res<SplineStore>,
    mut platforms: Query<&mut FloatingPlatform>,
) {
    for cmd in reader.read() {
        let Ok(mut platform) = platforms.get_mut(cmd.entity) else {
            log::warn!(
                "platform command for {:?}, which has no FloatingPlatform",
                cmd.entity
            );
            continue;
        };
        match cmd.action {
            PlatformAction::Start => {
                platform.start();
            }
            PlatformAction::Stop => {
                platform.stop();
            }
            PlatformAction::MoveToPoint(index) => {
                let Some(spline) = splines.get(platform.walker().spline_key()) else {
                    platform.report_missing_path();
                    continue;
                };
                if !platform.move_to_point(index, spline) {
                    log::debug!(
                        "platform {:?} rejected move to out-of-bounds point {index}",
                        cmd.entity
                    );
                }
            }
        }
    }
}

/// Frame-boundary maintenance for the platform command mailbox.
pub fn update_platform_commands(mut msgs: ResMut<Messages<PlatformCommand>>) {
    msgs.update();
}

/// Frame-boundary maintenance for the external progress mailbox.
pub fn update_platform_progress(mut msgs: ResMut<Messages<PlatformProgress>>) {
    msgs.update();
}

/// Advance self-driving platforms and write their poses.
pub fn floating_platform_update_system(
    world_time: Res<WorldTime>,
    splines: Res<SplineStore>,
    mut commands: Commands,
    mut platforms: Query<(Entity, &mut FloatingPlatform, &mut Position, &mut Orientation)>,
) {
    let dt = world_time.delta.max(0.0);
    for (entity, mut platform, mut position, mut orientation) in platforms.iter_mut() {
        let Some(spline) = splines.get(platform.walker().spline_key()) else {
            platform.report_missing_path();
            continue;
        };

        for kind in platform.update(dt, spline) {
            commands.trigger(PlatformNotice { entity, kind });
        }

        let (pos, orient) = platform.sample_pose(spline, orientation.0);
        position.0 = pos;
        orientation.0 = orient;
    }
}

/// Apply externally-driven progress to moving platforms.
pub fn moving_platform_progress_system(
    mut reader: MessageReader<PlatformProgress>,
    splines: Res<SplineStore>,
    mut platforms: Query<(&mut MovingPlatform, &mut Position, &mut Orientation)>,
) {
    for msg in reader.read() {
        let Ok((mut platform, mut position, mut orientation)) = platforms.get_mut(msg.entity)
        else {
            log::warn!(
                "platform progress for {:?}, which has no MovingPlatform",
                msg.entity
            );
            continue;
        };
        let Some(spline) = splines.get(platform.walker().spline_key()) else {
            platform.report_missing_path();
            continue;
        };

        let progress = msg.progress.clamp(0.0, 1.0);
        let (pos, orient) = platform.process_movement(progress, spline, orientation.0);
        position.0 = pos;
        orientation.0 = orient;

        if msg.leg_finished {
            platform.change_target_point();
        }
    }
}

/// Advance moving-platform wait timers and publish their notifications.
pub fn moving_platform_update_system(
    world_time: Res<WorldTime>,
    mut commands: Commands,
    mut platforms: Query<(Entity, &mut MovingPlatform)>,
) {
    let dt = world_time.delta.max(0.0);
    for (entity, mut platform) in platforms.iter_mut() {
        for kind in platform.update(dt) {
            commands.trigger(PlatformNotice { entity, kind });
        }
    }
}
