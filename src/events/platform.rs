//! Platform commands and notifications.
//!
//! Hosts start, stop, and redirect self-driving platforms with
//! [`PlatformCommand`] messages, and feed externally-animated platforms a
//! progress value with [`PlatformProgress`]. Movement milestones come back
//! as triggered [`PlatformNotice`]s.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::*;

use crate::components::platform::PlatformEvent;

/// What to do with a floating platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformAction {
    Start,
    Stop,
    /// Send a manual-mode platform to the given stopover index.
    MoveToPoint(usize),
}

/// Queued command for one floating platform entity.
#[derive(Message, Debug, Clone, Copy)]
pub struct PlatformCommand {
    pub entity: Entity,
    pub action: PlatformAction,
}

/// Externally-driven leg progress for a [`MovingPlatform`] entity.
///
/// [`MovingPlatform`]: crate::components::platform::MovingPlatform
#[derive(Message, Debug, Clone, Copy)]
pub struct PlatformProgress {
    pub entity: Entity,
    /// 0..1 along the current leg.
    pub progress: f32,
    /// The host's timeline finished this leg; advance to the next stopover.
    pub leg_finished: bool,
}

/// Movement milestone for a platform entity.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlatformNotice {
    pub entity: Entity,
    pub kind: PlatformEvent,
}
