//! Floor switch systems and overlap observers.
//!
//! Overlap traffic is delivered by the observers
//! ([`observe_switch_overlap_begin`] / [`observe_switch_overlap_end`]);
//! commands go through the [`SwitchCommand`] mailbox; the per-frame system
//! advances timers and publishes [`SwitchEvent`]s.

use bevy_ecs::message::Messages;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::components::floorswitch::{FloorSwitch, SwitchState};
use crate::components::statemachine::StateEvent;
use crate::events::floorswitch::{SwitchAction, SwitchCommand, SwitchEvent, SwitchEventKind};
use crate::events::interaction::{OverlapBegin, OverlapEnd};
use crate::resources::worldtime::WorldTime;

/// Press the switch when something enters its trigger volume.
pub fn observe_switch_overlap_begin(
    trigger: On<OverlapBegin>,
    mut switches: Query<&mut FloorSwitch>,
) {
    if let Ok(mut switch) = switches.get_mut(trigger.event().volume) {
        switch.step_on();
    }
}

/// Release the switch when its trigger volume is vacated.
pub fn observe_switch_overlap_end(trigger: On<OverlapEnd>, mut switches: Query<&mut FloorSwitch>) {
    if let Ok(mut switch) = switches.get_mut(trigger.event().volume) {
        switch.step_off();
    }
}

/// Apply queued switch commands.
pub fn switch_command_system(
    mut reader: MessageReader<SwitchCommand>,
    mut switches: Query<&mut FloorSwitch>,
) {
    for cmd in reader.read() {
        let Ok(mut switch) = switches.get_mut(cmd.entity) else {
            log::warn!("switch command for {:?}, which has no FloorSwitch", cmd.entity);
            continue;
        };
        let accepted = match cmd.action {
            SwitchAction::Lock => switch.lock(),
            SwitchAction::Unlock(state) => switch.unlock(state),
            SwitchAction::Disable => switch.disable(),
            SwitchAction::Enable => switch.enable(),
            SwitchAction::IncreasePresses(n) => {
                switch.increase_presses(n);
                true
            }
            SwitchAction::DecreasePresses(n) => {
                switch.decrease_presses(n);
                true
            }
            SwitchAction::SetTransitionDuration(duration) => {
                switch.set_transition_duration(duration);
                true
            }
        };
        if !accepted {
            log::debug!(
                "switch {:?} rejected {:?} in state {:?}",
                cmd.entity,
                cmd.action,
                switch.state()
            );
        }
    }
}

/// Frame-boundary maintenance for the switch command mailbox.
pub fn update_switch_commands(mut msgs: ResMut<Messages<SwitchCommand>>) {
    msgs.update();
}

/// Advance switch timers and publish their notifications.
pub fn switch_update_system(
    world_time: Res<WorldTime>,
    mut commands: Commands,
    mut switches: Query<(Entity, &mut FloorSwitch)>,
) {
    let dt = world_time.delta.max(0.0);
    for (entity, mut switch) in switches.iter_mut() {
        for event in switch.update(dt) {
            let kind = match event {
                StateEvent::TransitionStarted { .. } => SwitchEventKind::TransitionStarted,
                StateEvent::TransitionReverted { .. } => SwitchEventKind::TransitionReverted,
                StateEvent::Settled(SwitchState::Pressed) => SwitchEventKind::Pressed,
                StateEvent::Settled(_) => SwitchEventKind::Idle,
                StateEvent::Forced { from, to } => match (from, to) {
                    (_, SwitchState::Locked) => SwitchEventKind::Locked,
                    (_, SwitchState::Disabled) => SwitchEventKind::Disabled,
                    (SwitchState::Locked, _) => SwitchEventKind::Unlocked,
                    (SwitchState::Disabled, _) => SwitchEventKind::Enabled,
                    _ => SwitchEventKind::StateChanged,
                },
                StateEvent::Changed { .. } => SwitchEventKind::StateChanged,
            };
            commands.trigger(SwitchEvent {
                entity,
                kind,
                state: switch.state(),
            });
        }

        if switch.reports_pressing() {
            commands.trigger(SwitchEvent {
                entity,
                kind: SwitchEventKind::Pressing,
                state: switch.state(),
            });
        }
    }
}
