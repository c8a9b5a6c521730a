//! Door component.
//!
//! A thin adapter composing a [`StateMachine`] over [`DoorState`]: open and
//! close requests run a timed transition, lock/unlock and disable/enable
//! force states directly, and an optional close delay re-closes a door some
//! seconds after it settles opened. The per-frame work lives in
//! [`crate::systems::door`], which feeds the machine's drained events into
//! engine notifications.

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

use crate::components::statemachine::{StateEvent, StateMachine, StateTag};
use crate::components::timer::TimerSlot;

/// Door states. `Transition` covers both the opening and closing motion;
/// the machine's target tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorState {
    Opened,
    Closed,
    Locked,
    Transition,
    Disabled,
}

impl StateTag for DoorState {
    const TRANSITION: Self = DoorState::Transition;

    fn opposite(self) -> Self {
        match self {
            DoorState::Closed => DoorState::Opened,
            _ => DoorState::Closed,
        }
    }
}

/// A door an entity can open, close, lock and disable.
#[derive(Component, Debug, Clone)]
pub struct Door {
    machine: StateMachine<DoorState>,
    close_delay: f32,
    close_timer: TimerSlot,
}

impl Default for Door {
    fn default() -> Self {
        Self::new(DoorState::Closed)
    }
}

impl Door {
    pub fn new(initial: DoorState) -> Self {
        Self {
            machine: StateMachine::new(initial)
                .with_blocked(&[DoorState::Locked, DoorState::Disabled]),
            close_delay: 0.0,
            close_timer: TimerSlot::idle(),
        }
    }

    pub fn with_transition_duration(mut self, duration: f32) -> Self {
        self.machine = self.machine.with_transition_duration(duration);
        self
    }

    pub fn with_revertible(mut self, revertible: bool) -> Self {
        self.machine = self.machine.with_revertible(revertible);
        self
    }

    /// Seconds an opened door stays open before closing itself; zero
    /// disables auto-close.
    pub fn with_close_delay(mut self, delay: f32) -> Self {
        self.close_delay = delay.max(0.0);
        self
    }

    pub fn state(&self) -> DoorState {
        self.machine.current()
    }

    pub fn previous_state(&self) -> DoorState {
        self.machine.previous()
    }

    pub fn target_state(&self) -> DoorState {
        self.machine.target()
    }

    pub fn is_transitioning(&self) -> bool {
        self.machine.is_transitioning()
    }

    pub fn transition_duration(&self) -> f32 {
        self.machine.transition_duration()
    }

    pub fn set_transition_duration(&mut self, duration: f32) {
        self.machine.set_transition_duration(duration);
    }

    /// Start opening. Rejected when locked, disabled, already opened, or
    /// mid-transition (unless revertible toward closed).
    pub fn open(&mut self) -> bool {
        let accepted = self.machine.request(DoorState::Opened);
        if accepted {
            // A new transition supersedes a pending auto-close.
            self.close_timer.cancel();
        }
        accepted
    }

    /// Start closing. An explicit close also cancels a pending auto-close.
    pub fn close(&mut self) -> bool {
        let accepted = self.machine.request(DoorState::Closed);
        if accepted {
            self.close_timer.cancel();
        }
        accepted
    }

    /// Lock the door. Only a closed door can be locked.
    pub fn lock(&mut self) -> bool {
        if self.machine.current() != DoorState::Closed {
            return false;
        }
        self.machine.force(DoorState::Locked);
        true
    }

    /// Unlock a locked door back to closed.
    pub fn unlock(&mut self) -> bool {
        if self.machine.current() != DoorState::Locked {
            return false;
        }
        self.machine.force(DoorState::Closed);
        true
    }

    /// Take the door out of service. Only a resting door can be disabled.
    pub fn disable(&mut self) -> bool {
        match self.machine.current() {
            DoorState::Opened | DoorState::Closed => {
                self.close_timer.cancel();
                self.machine.force(DoorState::Disabled);
                true
            }
            _ => false,
        }
    }

    /// Bring a disabled door back into service in the given resting state
    /// (`Opened` or `Closed`).
    pub fn enable(&mut self, state: DoorState) -> bool {
        if self.machine.current() != DoorState::Disabled
            || !matches!(state, DoorState::Opened | DoorState::Closed)
        {
            return false;
        }
        self.machine.force(state);
        true
    }

    /// Advance the transition and auto-close timers and drain the queued
    /// machine events.
    pub fn update(&mut self, delta: f32) -> SmallVec<[StateEvent<DoorState>; 4]> {
        self.machine.update(delta);

        if self.close_timer.tick(delta) {
            self.machine.request(DoorState::Closed);
        }

        let events = self.machine.take_events();
        for event in &events {
            if matches!(event, StateEvent::Settled(DoorState::Opened)) && self.close_delay > 0.0 {
                self.close_timer.arm(self.close_delay, false);
            }
        }
        events
    }
}
