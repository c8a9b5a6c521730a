//! Door commands and notifications.
//!
//! Hosts drive doors by writing [`DoorCommand`] messages; the door system
//! applies them, runs the state machine, and triggers a [`DoorEvent`] per
//! notable change. Observers subscribe to `DoorEvent` the usual way:
//!
//! ```ignore
//! world.add_observer(|trigger: On<DoorEvent>| {
//!     if trigger.event().kind == DoorEventKind::Opened {
//!         // play the open sound, update nav mesh, ...
//!     }
//! });
//! ```

use bevy_ecs::message::Message;
use bevy_ecs::prelude::*;

use crate::components::door::DoorState;

/// What to do with a door.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DoorAction {
    Open,
    Close,
    Lock,
    Unlock,
    Disable,
    /// Re-enable a disabled door in the given resting state.
    Enable(DoorState),
    SetTransitionDuration(f32),
}

/// Queued command for one door entity.
#[derive(Message, Debug, Clone, Copy)]
pub struct DoorCommand {
    pub entity: Entity,
    pub action: DoorAction,
}

/// What happened to a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorEventKind {
    Opened,
    Closed,
    Locked,
    Unlocked,
    Disabled,
    Enabled,
    TransitionStarted,
    TransitionReverted,
    StateChanged,
}

/// Notification triggered on every notable door change.
#[derive(Event, Debug, Clone, Copy)]
pub struct DoorEvent {
    pub entity: Entity,
    pub kind: DoorEventKind,
    pub state: DoorState,
}
