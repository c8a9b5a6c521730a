//! Door systems.
//!
//! [`door_command_system`] applies queued [`DoorCommand`] messages to door
//! components; [`observe_door_interact`] toggles a door on a direct use
//! input; [`door_update_system`] advances every door each frame and
//! triggers a [`DoorEvent`] for each notable change.

use bevy_ecs::message::Messages;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::components::door::{Door, DoorState};
use crate::components::statemachine::StateEvent;
use crate::events::door::{DoorAction, DoorCommand, DoorEvent, DoorEventKind};
use crate::events::interaction::Interact;
use crate::resources::worldtime::WorldTime;

/// Toggle a door on a use/interact input: open it if it will, close it
/// otherwise. Locked and disabled doors reject both.
pub fn observe_door_interact(trigger: On<Interact>, mut doors: Query<&mut Door>) {
    if let Ok(mut door) = doors.get_mut(trigger.event().target) {
        if !door.open() && !door.close() {
            log::debug!(
                "door {:?} ignored interact in state {:?}",
                trigger.event().target,
                door.state()
            );
        }
    }
}

/// Apply queued door commands. Rejected commands are logged and dropped.
pub fn door_command_system(mut reader: MessageReader<DoorCommand>, mut doors: Query<&mut Door>) {
    for cmd in reader.read() {
        let Ok(mut door) = doors.get_mut(cmd.entity) else {
            log::warn!("door command for {:?}, which has no Door", cmd.entity);
            continue;
        };
        let accepted = match cmd.action {
            DoorAction::Open => door.open(),
            DoorAction::Close => door.close(),
            DoorAction::Lock => door.lock(),
            DoorAction::Unlock => door.unlock(),
            DoorAction::Disable => door.disable(),
            DoorAction::Enable(state) => door.enable(state),
            DoorAction::SetTransitionDuration(duration) => {
                door.set_transition_duration(duration);
                true
            }
        };
        if !accepted {
            log::debug!(
                "door {:?} rejected {:?} in state {:?}",
                cmd.entity,
                cmd.action,
                door.state()
            );
        }
    }
}

/// Frame-boundary maintenance for the door command mailbox.
pub fn update_door_commands(mut msgs: ResMut<Messages<DoorCommand>>) {
    msgs.update();
}

/// Advance door timers and publish their notifications.
pub fn door_update_system(
    world_time: Res<WorldTime>,
    mut commands: Commands,
    mut doors: Query<(Entity, &mut Door)>,
) {
    let dt = world_time.delta.max(0.0);
    for (entity, mut door) in doors.iter_mut() {
        for event in door.update(dt) {
            let kind = match event {
                StateEvent::TransitionStarted { .. } => DoorEventKind::TransitionStarted,
                StateEvent::TransitionReverted { .. } => DoorEventKind::TransitionReverted,
                StateEvent::Settled(DoorState::Opened) => DoorEventKind::Opened,
                StateEvent::Settled(_) => DoorEventKind::Closed,
                StateEvent::Forced { from, to } => match (from, to) {
                    (_, DoorState::Locked) => DoorEventKind::Locked,
                    (_, DoorState::Disabled) => DoorEventKind::Disabled,
                    (DoorState::Locked, _) => DoorEventKind::Unlocked,
                    (DoorState::Disabled, _) => DoorEventKind::Enabled,
                    _ => DoorEventKind::StateChanged,
                },
                StateEvent::Changed { .. } => DoorEventKind::StateChanged,
            };
            commands.trigger(DoorEvent {
                entity,
                kind,
                state: door.state(),
            });
        }
    }
}
