//! Timed state machine for interactive objects.
//!
//! [`StateMachine`] is the discrete-state engine shared by every timed
//! interactive object in the crate (doors, floor switches, and anything an
//! adapter wants to drive through a resting/transition cycle). It holds the
//! current, previous, and target states, enforces which requests are legal,
//! and runs a timed *Transition* state between the two resting states.
//!
//! # Architecture
//!
//! - **States are adapter enums** implementing [`StateTag`]: a dedicated
//!   `TRANSITION` variant plus an "opposite resting state" rule
//! - **Requests toggle**: a legal [`request`](StateMachine::request) leaves
//!   the current resting state, enters `TRANSITION`, and arms the finish
//!   timer toward the opposite resting state
//! - **Revertible transitions** can be redirected mid-flight back where they
//!   came from; the redirected timer is re-armed with the *elapsed* time of
//!   the cancelled one (see [`revert`](StateMachine::revert))
//! - **Forced states** ([`force`](StateMachine::force)) bypass the timer
//!   machinery entirely; adapters use this for lock/unlock/disable/enable
//! - **Notifications are queued** as [`StateEvent`]s and drained by the
//!   owning adapter with [`take_events`](StateMachine::take_events), which
//!   maps them to engine-facing events
//!
//! # Invariant
//!
//! `current == TRANSITION` exactly when the finish timer is armed. A
//! non-positive transition duration settles in the same call that started
//! the transition, without arming the timer, so the invariant holds from
//! the outside at all times.
//!
//! # Related
//!
//! - [`crate::components::door::Door`] / [`crate::components::floorswitch::FloorSwitch`]
//!   – the adapters composing this machine
//! - [`crate::components::timer::TimerSlot`] – the finish-timer primitive

use std::fmt::Debug;

use smallvec::SmallVec;

use crate::components::timer::TimerSlot;

/// State enums drivable by a [`StateMachine`].
///
/// `TRANSITION` is the transient in-between state; `opposite` is the
/// resting state a transition out of `self` heads toward. `opposite` is
/// never consulted for the `TRANSITION` variant itself.
pub trait StateTag: Copy + Eq + Debug + Send + Sync + 'static {
    const TRANSITION: Self;

    fn opposite(self) -> Self;
}

/// Notification queued by the machine on every state change.
///
/// `Settled` and `Forced` carry enough context for adapters to map them to
/// per-state notifications (opened, locked, unlocked, ...); `Changed`
/// mirrors the generic state-changed broadcast and always follows one of
/// the other variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent<S> {
    /// A transition left `from` and is heading toward `target`.
    TransitionStarted { from: S, target: S },
    /// An in-flight transition was redirected toward `target`.
    TransitionReverted { target: S },
    /// The finish timer expired and the machine settled in a resting state.
    Settled(S),
    /// A state was entered directly, bypassing the transition machinery.
    Forced { from: S, to: S },
    /// Generic state-changed notification, emitted after `Settled`/`Forced`.
    Changed { from: S, to: S },
}

/// Discrete-state machine with a timed transition between resting states.
#[derive(Debug, Clone)]
pub struct StateMachine<S: StateTag> {
    current: S,
    previous: S,
    target: S,
    transition_duration: f32,
    revertible: bool,
    blocked: SmallVec<[S; 2]>,
    finish_timer: TimerSlot,
    events: SmallVec<[StateEvent<S>; 4]>,
}

impl<S: StateTag> StateMachine<S> {
    /// Create a machine resting in `initial`.
    ///
    /// The default target is the opposite of the initial state, so the
    /// first request toggles away from it even when the configured initial
    /// state is not the adapter's usual resting state.
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            previous: initial,
            target: initial.opposite(),
            transition_duration: 0.25,
            revertible: false,
            blocked: SmallVec::new(),
            finish_timer: TimerSlot::idle(),
            events: SmallVec::new(),
        }
    }

    /// States from which every request is rejected (locked/disabled set).
    pub fn with_blocked(mut self, states: &[S]) -> Self {
        self.blocked = SmallVec::from_slice(states);
        self
    }

    pub fn with_transition_duration(mut self, duration: f32) -> Self {
        self.transition_duration = duration;
        self
    }

    pub fn with_revertible(mut self, revertible: bool) -> Self {
        self.revertible = revertible;
        self
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn previous(&self) -> S {
        self.previous
    }

    pub fn target(&self) -> S {
        self.target
    }

    pub fn is_transitioning(&self) -> bool {
        self.current == S::TRANSITION
    }

    pub fn is_revertible(&self) -> bool {
        self.revertible
    }

    pub fn transition_duration(&self) -> f32 {
        self.transition_duration
    }

    /// Change the duration used by future transitions. Stored as an
    /// absolute value; the transition already in flight is not affected.
    pub fn set_transition_duration(&mut self, duration: f32) {
        self.transition_duration = duration.abs();
    }

    pub fn set_revertible(&mut self, revertible: bool) {
        self.revertible = revertible;
    }

    /// Request a transition toward `desired`.
    ///
    /// Rejected (returns `false`, queues nothing) when the current state is
    /// in the blocked set, when the machine already rests in `desired`, or
    /// when a transition is in flight and the revert clause does not apply.
    /// While transitioning, a revertible machine accepts a request for the
    /// opposite of the in-flight target by redirecting the transition
    /// instead of starting a new one.
    pub fn request(&mut self, desired: S) -> bool {
        if self.blocked.contains(&self.current) || self.current == desired {
            return false;
        }

        if self.current == S::TRANSITION {
            if self.revertible && desired == self.target.opposite() {
                return self.revert();
            }
            return false;
        }

        self.start_transition();
        true
    }

    /// Redirect an in-flight transition back toward the state it left.
    ///
    /// The finish timer is re-armed with the **elapsed** time of the
    /// cancelled timer, not with the remaining time and not with a fresh
    /// full duration. A transition reverted after 2s of a 5s duration
    /// therefore finishes 2s later. This mirrors the shipped behavior of
    /// the original doors/switches and is deliberately left untouched.
    pub fn revert(&mut self) -> bool {
        if self.current != S::TRANSITION {
            return false;
        }

        self.target = self.target.opposite();
        let elapsed = self.finish_timer.elapsed();
        self.finish_timer.arm(elapsed, false);
        self.events
            .push(StateEvent::TransitionReverted { target: self.target });
        true
    }

    /// Enter `state` directly, bypassing the transition machinery.
    ///
    /// Never arms or cancels the finish timer: callers must ensure no
    /// transition is in flight, or cancel it explicitly with
    /// [`cancel_transition`](Self::cancel_transition) first.
    pub fn force(&mut self, state: S) {
        let from = self.current;
        self.previous = from;
        self.current = state;
        self.events.push(StateEvent::Forced { from, to: state });
        self.events.push(StateEvent::Changed { from, to: state });
    }

    /// Cancel a pending finish timer without changing state.
    pub fn cancel_transition(&mut self) {
        self.finish_timer.cancel();
    }

    /// Advance the finish timer, settling the transition on expiry.
    pub fn update(&mut self, delta: f32) {
        if self.finish_timer.tick(delta) {
            self.finish();
        }
    }

    /// Drain the queued notifications, oldest first.
    pub fn take_events(&mut self) -> SmallVec<[StateEvent<S>; 4]> {
        std::mem::take(&mut self.events)
    }

    fn start_transition(&mut self) {
        self.previous = self.current;
        self.target = self.current.opposite();
        self.current = S::TRANSITION;
        self.events.push(StateEvent::TransitionStarted {
            from: self.previous,
            target: self.target,
        });

        if self.transition_duration > 0.0 {
            self.finish_timer.arm(self.transition_duration, false);
        } else {
            self.finish();
        }
    }

    fn finish(&mut self) {
        let from = self.current;
        self.previous = from;
        self.current = self.target;
        self.events.push(StateEvent::Settled(self.current));
        self.events.push(StateEvent::Changed {
            from,
            to: self.current,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Latch {
        Off,
        On,
        Jammed,
        Shifting,
    }

    impl StateTag for Latch {
        const TRANSITION: Self = Latch::Shifting;

        fn opposite(self) -> Self {
            match self {
                Latch::Off => Latch::On,
                _ => Latch::Off,
            }
        }
    }

    fn machine() -> StateMachine<Latch> {
        StateMachine::new(Latch::Off)
            .with_blocked(&[Latch::Jammed])
            .with_transition_duration(1.0)
    }

    #[test]
    fn test_initial_states() {
        let m = machine();
        assert_eq!(m.current(), Latch::Off);
        assert_eq!(m.previous(), Latch::Off);
        assert_eq!(m.target(), Latch::On);
    }

    #[test]
    fn test_request_enters_transition_and_settles() {
        let mut m = machine();
        assert!(m.request(Latch::On));
        assert_eq!(m.current(), Latch::Shifting);
        assert_eq!(m.target(), Latch::On);

        m.update(0.5);
        assert!(m.is_transitioning());
        m.update(0.5);
        assert_eq!(m.current(), Latch::On);
        assert_eq!(m.previous(), Latch::Shifting);

        let events = m.take_events();
        assert_eq!(
            events.as_slice(),
            &[
                StateEvent::TransitionStarted {
                    from: Latch::Off,
                    target: Latch::On
                },
                StateEvent::Settled(Latch::On),
                StateEvent::Changed {
                    from: Latch::Shifting,
                    to: Latch::On
                },
            ]
        );
    }

    #[test]
    fn test_second_request_is_rejected_while_transitioning() {
        let mut m = machine();
        assert!(m.request(Latch::On));
        assert!(!m.request(Latch::On));
        m.update(1.0);
        // The transition ran exactly once.
        assert_eq!(m.current(), Latch::On);
        m.update(10.0);
        assert_eq!(m.current(), Latch::On);
    }

    #[test]
    fn test_round_trip_toggles_back() {
        let mut m = machine();
        m.request(Latch::On);
        m.update(1.0);
        assert_eq!(m.current(), Latch::On);
        m.request(Latch::Off);
        m.update(1.0);
        assert_eq!(m.current(), Latch::Off);
    }

    #[test]
    fn test_request_for_current_state_is_rejected() {
        let mut m = machine();
        assert!(!m.request(Latch::Off));
        assert!(m.take_events().is_empty());
    }

    #[test]
    fn test_blocked_state_rejects_requests() {
        let mut m = machine();
        m.force(Latch::Jammed);
        m.take_events();
        assert!(!m.request(Latch::On));
        assert!(m.take_events().is_empty());
    }

    #[test]
    fn test_revert_uses_elapsed_time_as_new_delay() {
        let mut m = machine().with_transition_duration(5.0).with_revertible(true);
        m.request(Latch::On);
        m.update(2.0);

        // Requesting the way back mid-flight reverts instead of starting over.
        assert!(m.request(Latch::Off));
        assert_eq!(m.target(), Latch::Off);

        // The redirected timer runs for the elapsed 2s, not the remaining 3s
        // and not the full 5s.
        m.update(1.9);
        assert!(m.is_transitioning());
        m.update(0.1);
        assert_eq!(m.current(), Latch::Off);
    }

    #[test]
    fn test_revert_rejected_when_not_revertible() {
        let mut m = machine().with_transition_duration(5.0);
        m.request(Latch::On);
        assert!(!m.request(Latch::Off));
        m.update(5.0);
        assert_eq!(m.current(), Latch::On);
    }

    #[test]
    fn test_revert_toward_inflight_target_is_rejected() {
        let mut m = machine().with_transition_duration(5.0).with_revertible(true);
        m.request(Latch::On);
        // Asking again for the state we are already heading to is a no-op.
        assert!(!m.request(Latch::On));
    }

    #[test]
    fn test_zero_duration_settles_in_same_call() {
        let mut m = machine().with_transition_duration(0.0);
        assert!(m.request(Latch::On));
        assert_eq!(m.current(), Latch::On);

        let events = m.take_events();
        assert!(matches!(events[0], StateEvent::TransitionStarted { .. }));
        assert!(matches!(events[1], StateEvent::Settled(Latch::On)));

        // Nothing left armed to double-fire later.
        m.update(10.0);
        assert!(m.take_events().is_empty());
    }

    #[test]
    fn test_force_records_previous_and_skips_timer() {
        let mut m = machine();
        m.force(Latch::Jammed);
        assert_eq!(m.current(), Latch::Jammed);
        assert_eq!(m.previous(), Latch::Off);

        let events = m.take_events();
        assert_eq!(
            events.as_slice(),
            &[
                StateEvent::Forced {
                    from: Latch::Off,
                    to: Latch::Jammed
                },
                StateEvent::Changed {
                    from: Latch::Off,
                    to: Latch::Jammed
                },
            ]
        );
        m.update(10.0);
        assert!(m.take_events().is_empty());
    }

    #[test]
    fn test_set_transition_duration_stores_absolute_value() {
        let mut m = machine();
        m.set_transition_duration(-2.0);
        assert_eq!(m.transition_duration(), 2.0);
    }
}
