//! Floor switch commands and notifications.
//!
//! Overlap traffic reaches switches through the observers in
//! [`crate::systems::floorswitch`]; everything else (locking, press budget
//! tweaks) goes through [`SwitchCommand`] messages. State changes come back
//! as triggered [`SwitchEvent`]s.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::*;

use crate::components::floorswitch::SwitchState;

/// What to do with a floor switch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwitchAction {
    Lock,
    /// Unlock into the given resting state.
    Unlock(SwitchState),
    Disable,
    Enable,
    IncreasePresses(u32),
    DecreasePresses(u32),
    SetTransitionDuration(f32),
}

/// Queued command for one switch entity.
#[derive(Message, Debug, Clone, Copy)]
pub struct SwitchCommand {
    pub entity: Entity,
    pub action: SwitchAction,
}

/// What happened to a floor switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchEventKind {
    Idle,
    Pressed,
    /// Emitted once per frame while the plate is held down, when the switch
    /// opted into pressing notifications.
    Pressing,
    Locked,
    Unlocked,
    Disabled,
    Enabled,
    TransitionStarted,
    TransitionReverted,
    StateChanged,
}

/// Notification triggered on every notable switch change.
#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchEvent {
    pub entity: Entity,
    pub kind: SwitchEventKind,
    pub state: SwitchState,
}
