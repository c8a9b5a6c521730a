//! Floor switch component.
//!
//! A pressure plate driven by overlap begin/end: stepping on presses it,
//! stepping off releases it. On top of the shared [`StateMachine`] it adds
//! a press delay (the plate sinks only after being stood on for a while), a
//! pressed duration (the plate stays down a while after being vacated), and
//! a limited press budget that locks the switch for good once spent.
//!
//! Settling into `Pressed` can immediately schedule or run follow-up
//! transitions (auto-release, auto-lock), so the component pumps the
//! machine's event queue in a loop until it is quiet; the blocked-state
//! guard bounds that loop.

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

use crate::components::statemachine::{StateEvent, StateMachine, StateTag};
use crate::components::timer::TimerSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    Idle,
    Pressed,
    Locked,
    Transition,
    Disabled,
}

impl StateTag for SwitchState {
    const TRANSITION: Self = SwitchState::Transition;

    fn opposite(self) -> Self {
        match self {
            SwitchState::Idle => SwitchState::Pressed,
            _ => SwitchState::Idle,
        }
    }
}

/// A floor switch pressed by standing on its trigger volume.
#[derive(Component, Debug, Clone)]
pub struct FloorSwitch {
    machine: StateMachine<SwitchState>,
    limited_presses: bool,
    presses_left: u32,
    press_delay: f32,
    press_delay_timer: TimerSlot,
    pressed_duration: f32,
    pressed_timer: TimerSlot,
    occupied: bool,
    pressing_notifications: bool,
    pending: SmallVec<[StateEvent<SwitchState>; 8]>,
}

impl Default for FloorSwitch {
    fn default() -> Self {
        Self::new(SwitchState::Idle)
    }
}

impl FloorSwitch {
    pub fn new(initial: SwitchState) -> Self {
        Self {
            machine: StateMachine::new(initial)
                .with_blocked(&[SwitchState::Locked, SwitchState::Disabled]),
            limited_presses: false,
            presses_left: 0,
            press_delay: 0.0,
            press_delay_timer: TimerSlot::idle(),
            pressed_duration: 0.0,
            pressed_timer: TimerSlot::idle(),
            occupied: false,
            pressing_notifications: false,
            pending: SmallVec::new(),
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

    /// Seconds of standing on the plate before the press starts.
    pub fn with_press_delay(mut self, delay: f32) -> Self {
        self.press_delay = delay.max(0.0);
        self
    }

    /// Seconds the plate stays pressed after being vacated.
    pub fn with_pressed_duration(mut self, duration: f32) -> Self {
        self.pressed_duration = duration.max(0.0);
        self
    }

    /// Give the switch a press budget; it locks itself when spent.
    pub fn with_limited_presses(mut self, count: u32) -> Self {
        self.limited_presses = true;
        self.presses_left = count;
        self
    }

    /// Emit a per-frame pressing notification while the plate is down.
    pub fn with_pressing_notifications(mut self, enabled: bool) -> Self {
        self.pressing_notifications = enabled;
        self
    }

    pub fn state(&self) -> SwitchState {
        self.machine.current()
    }

    pub fn target_state(&self) -> SwitchState {
        self.machine.target()
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn presses_left(&self) -> u32 {
        self.presses_left
    }

    pub fn reports_pressing(&self) -> bool {
        self.pressing_notifications && self.machine.current() == SwitchState::Pressed
    }

    pub fn set_transition_duration(&mut self, duration: f32) {
        self.machine.set_transition_duration(duration);
    }

    /// Something entered the trigger volume.
    pub fn step_on(&mut self) {
        self.occupied = true;

        match self.machine.current() {
            SwitchState::Locked | SwitchState::Disabled => {}
            SwitchState::Transition => {
                if self.machine.is_revertible() {
                    self.machine.revert();
                    self.pump();
                }
            }
            SwitchState::Idle => {
                if self.press_delay > 0.0 {
                    self.press_delay_timer.arm(self.press_delay, false);
                } else {
                    self.machine.request(SwitchState::Pressed);
                    self.pump();
                }
            }
            _ => {}
        }
    }

    /// The trigger volume was vacated.
    pub fn step_off(&mut self) {
        self.occupied = false;

        match self.machine.current() {
            SwitchState::Locked | SwitchState::Disabled => return,
            _ => {}
        }

        // Leaving before the press delay fired aborts the press entirely.
        if self.press_delay_timer.is_armed() {
            self.press_delay_timer.cancel();
            return;
        }

        if self.machine.current() == SwitchState::Transition {
            if self.machine.is_revertible() {
                self.machine.revert();
                self.pump();
            }
            return;
        }

        if self.limited_presses && self.presses_left == 0 {
            return;
        }

        if self.machine.current() == SwitchState::Pressed {
            if self.pressed_duration > 0.0 {
                self.pressed_timer.arm(self.pressed_duration, false);
            } else {
                self.machine.request(SwitchState::Idle);
                self.pump();
            }
        }
    }

    /// Lock the switch. Rejected while locked or mid-transition; a pending
    /// press delay is abandoned.
    pub fn lock(&mut self) -> bool {
        match self.machine.current() {
            SwitchState::Locked | SwitchState::Transition => false,
            _ => {
                self.press_delay_timer.cancel();
                self.pressed_timer.cancel();
                self.machine.force(SwitchState::Locked);
                self.pump();
                true
            }
        }
    }

    /// Unlock into the given resting state (`Idle` or `Pressed`).
    pub fn unlock(&mut self, state: SwitchState) -> bool {
        if self.machine.current() != SwitchState::Locked
            || !matches!(state, SwitchState::Idle | SwitchState::Pressed)
        {
            return false;
        }
        self.machine.force(state);
        self.pump();
        true
    }

    /// Take the switch out of service. Rejected while disabled or
    /// mid-transition.
    pub fn disable(&mut self) -> bool {
        match self.machine.current() {
            SwitchState::Disabled | SwitchState::Transition => false,
            _ => {
                self.occupied = false;
                self.press_delay_timer.cancel();
                self.pressed_timer.cancel();
                self.machine.force(SwitchState::Disabled);
                self.pump();
                true
            }
        }
    }

    /// Bring a disabled switch back into service, idle.
    pub fn enable(&mut self) -> bool {
        if self.machine.current() != SwitchState::Disabled {
            return false;
        }
        self.machine.force(SwitchState::Idle);
        self.pump();
        true
    }

    pub fn increase_presses(&mut self, amount: u32) -> u32 {
        self.presses_left += amount;
        self.presses_left
    }

    pub fn decrease_presses(&mut self, amount: u32) -> u32 {
        self.presses_left = self.presses_left.saturating_sub(amount);
        self.presses_left
    }

    /// Advance the transition, press-delay, and pressed-duration timers and
    /// drain everything the machine queued.
    pub fn update(&mut self, delta: f32) -> SmallVec<[StateEvent<SwitchState>; 8]> {
        self.machine.update(delta);
        self.pump();

        if self.press_delay_timer.tick(delta) {
            self.machine.request(SwitchState::Pressed);
            self.pump();
        }
        if self.pressed_timer.tick(delta) {
            self.machine.request(SwitchState::Idle);
            self.pump();
        }

        std::mem::take(&mut self.pending)
    }

    /// Drain the machine queue until quiet, running press settlement
    /// follow-ups. Follow-ups only force blocked states or start new
    /// transitions, so the loop terminates.
    fn pump(&mut self) {
        loop {
            let events = self.machine.take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                let pressed = matches!(
                    event,
                    StateEvent::Settled(SwitchState::Pressed)
                        | StateEvent::Forced {
                            to: SwitchState::Pressed,
                            ..
                        }
                );
                self.pending.push(event);
                if pressed {
                    self.on_pressed();
                }
            }
        }
    }

    fn on_pressed(&mut self) {
        if self.limited_presses {
            self.decrease_presses(1);
            if self.presses_left == 0 {
                // Budget spent: the switch stays pressed and locks for good.
                self.machine.force(SwitchState::Locked);
            }
            return;
        }

        if self.occupied {
            return;
        }

        // Whoever pressed it already left: schedule or run the release.
        if self.pressed_duration > 0.0 {
            self.pressed_timer.arm(self.pressed_duration, false);
        } else {
            self.machine.request(SwitchState::Idle);
        }
    }
}
