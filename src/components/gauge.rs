//! Bounded resource gauge with timed auto-change.
//!
//! [`Gauge`] is the numeric sibling of the state machine: a clamped
//! current/max pair (health, stamina, mana, heat) that can optionally drift
//! on its own — regenerating or draining a fixed amount at a fixed
//! frequency until a threshold is reached. It shares the
//! [`TimerSlot`](crate::components::timer::TimerSlot) scheduling idiom with
//! the rest of the crate: a repeating change timer applies each tick, and
//! an optional start-delay timer defers the first one after an external
//! mutation.
//!
//! External mutations interact with the auto-change machinery: damaging a
//! regenerating gauge restarts the start delay (only the most recent
//! mutation wins the restart), and healing a draining gauge past its
//! threshold stops the drain.
//!
//! Notifications are queued as [`GaugeEvent`]s and drained by the owner.

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

use crate::components::timer::TimerSlot;

/// Notification queued on every gauge mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GaugeEvent {
    Increased { amount: f32, value: f32 },
    Decreased { amount: f32, value: f32 },
    MaxIncreased { amount: f32, max: f32 },
    MaxDecreased { amount: f32, max: f32 },
    /// A decrease brought the current value down to zero.
    Depleted,
}

/// A bounded numeric value with optional timed auto-change.
///
/// Invariants: the current value never drops below zero, and never exceeds
/// the maximum while clamping is requested on the mutating call.
#[derive(Component, Debug, Clone)]
pub struct Gauge {
    max: f32,
    current: f32,
    auto_change: bool,
    is_decreasing: bool,
    change_amount: f32,
    change_frequency: f32,
    change_delay: f32,
    start_delay: f32,
    min_threshold: f32,
    max_threshold: f32,
    change_timer: TimerSlot,
    delay_timer: TimerSlot,
    events: SmallVec<[GaugeEvent; 4]>,
}

impl Gauge {
    /// Create a full gauge with the given maximum and no auto-change.
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            max,
            current: max,
            auto_change: false,
            is_decreasing: false,
            change_amount: 1.0,
            change_frequency: 1.0,
            change_delay: 1.0,
            start_delay: 1.0,
            min_threshold: 0.0,
            max_threshold: 1.0,
            change_timer: TimerSlot::idle(),
            delay_timer: TimerSlot::idle(),
            events: SmallVec::new(),
        }
    }

    /// Start with a custom initial value instead of a full gauge.
    pub fn with_initial_value(mut self, value: f32) -> Self {
        self.current = value.clamp(0.0, self.max);
        self
    }

    /// Enable auto-change: `amount` applied `frequency` times per second,
    /// draining when `decreasing`, otherwise regenerating. The repeating
    /// timer starts immediately unless the value already rests at its
    /// threshold.
    pub fn with_auto_change(mut self, amount: f32, frequency: f32, decreasing: bool) -> Self {
        self.auto_change = true;
        self.is_decreasing = decreasing;
        self.change_amount = amount.max(0.0);
        self.set_change_frequency(frequency);
        if !self.is_out_of_bounds() {
            self.change_timer.arm(self.change_delay, true);
        }
        self
    }

    /// Seconds an external mutation defers the next auto-change tick.
    pub fn with_start_delay(mut self, delay: f32) -> Self {
        self.start_delay = delay.max(0.0);
        self
    }

    /// Fractions of the maximum at which auto-change stops: `min` for the
    /// draining direction, `max` for the regenerating one.
    pub fn with_thresholds(mut self, min: f32, max: f32) -> Self {
        self.min_threshold = min.clamp(0.0, 1.0);
        self.max_threshold = max.clamp(0.0, 1.0);
        self
    }

    pub fn value(&self) -> f32 {
        self.current
    }

    pub fn max_value(&self) -> f32 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    pub fn set_max_value(&mut self, max: f32) {
        self.max = max.max(0.0);
    }

    /// Current value as a fraction of the maximum, `0.0` for an empty
    /// maximum. Always in `[0, 1]` when the value is clamped.
    pub fn normalized(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }

    /// The absolute value at which auto-change stops in its configured
    /// direction.
    pub fn threshold_value(&self) -> f32 {
        if self.is_decreasing {
            self.max * self.min_threshold
        } else {
            self.max * self.max_threshold
        }
    }

    /// Whether the current value has crossed the auto-change threshold.
    pub fn is_out_of_bounds(&self) -> bool {
        if self.is_decreasing {
            self.current <= self.threshold_value()
        } else {
            self.current >= self.threshold_value()
        }
    }

    /// Add `amount`, optionally clamping to the maximum.
    ///
    /// No-op when clamping is requested and the gauge is already full.
    /// Re-evaluates auto-change scheduling when the gauge drains on its
    /// own, since an external heal may push it past the drain threshold.
    pub fn increase_value(&mut self, amount: f32, clamp_to_max: bool) {
        if clamp_to_max && self.current >= self.max {
            return;
        }

        self.current += amount;
        if clamp_to_max {
            self.current = self.current.min(self.max);
        }
        self.current = self.current.max(0.0);
        self.events.push(GaugeEvent::Increased {
            amount,
            value: self.current,
        });

        if self.auto_change && self.is_decreasing {
            self.process_auto_change();
        }
    }

    /// Subtract `amount`, never dropping below zero. No-op on an already
    /// empty gauge. Queues [`GaugeEvent::Depleted`] when this decrease
    /// empties it. A regenerating gauge re-evaluates its scheduling so the
    /// start delay restarts from the most recent hit.
    pub fn decrease_value(&mut self, amount: f32) {
        if self.current <= 0.0 {
            return;
        }

        self.current = (self.current - amount).max(0.0);
        self.events.push(GaugeEvent::Decreased {
            amount,
            value: self.current,
        });
        if self.current <= 0.0 {
            self.events.push(GaugeEvent::Depleted);
        }

        if self.auto_change && !self.is_decreasing && self.current > 0.0 {
            self.process_auto_change();
        }
    }

    /// Raise the maximum; with `clamp_current` the current value snaps up
    /// to the new maximum.
    pub fn increase_max_value(&mut self, amount: f32, clamp_current: bool) {
        self.max += amount;
        self.events.push(GaugeEvent::MaxIncreased {
            amount,
            max: self.max,
        });
        if clamp_current {
            self.current = self.max;
        }
    }

    /// Lower the maximum, never below zero; with `clamp_current` a current
    /// value above the new maximum is pulled down to it.
    pub fn decrease_max_value(&mut self, amount: f32, clamp_current: bool) {
        self.max = (self.max - amount).max(0.0);
        self.events.push(GaugeEvent::MaxDecreased {
            amount,
            max: self.max,
        });
        if clamp_current && self.current > self.max {
            self.current = self.max;
        }
    }

    /// Set the auto-change frequency in ticks per second and return the
    /// recomputed per-tick delay. Non-positive frequencies are replaced by
    /// `1.0` and reported.
    pub fn set_change_frequency(&mut self, frequency: f32) -> f32 {
        let frequency = if frequency <= 0.0 {
            log::error!("invalid gauge auto-change frequency {frequency}, substituting 1.0");
            1.0
        } else {
            frequency
        };
        self.change_frequency = frequency;
        self.change_delay = 1.0 / frequency;
        self.change_delay
    }

    /// Advance the start-delay and change timers with the frame delta.
    pub fn update(&mut self, delta: f32) {
        if self.delay_timer.tick(delta) && !self.change_timer.is_armed() && self.change_delay > 0.0
        {
            self.change_timer.arm(self.change_delay, true);
        }

        if self.change_timer.tick(delta) {
            self.apply_auto_change();
        }
    }

    /// Drain the queued notifications, oldest first.
    pub fn take_events(&mut self) -> SmallVec<[GaugeEvent; 4]> {
        std::mem::take(&mut self.events)
    }

    #[cfg(test)]
    fn is_auto_timer_armed(&self) -> bool {
        self.change_timer.is_armed()
    }

    fn apply_auto_change(&mut self) {
        if self.is_decreasing {
            self.decrease_value(self.change_amount);
        } else {
            self.increase_value(self.change_amount, true);
        }

        if self.is_out_of_bounds() {
            self.change_timer.cancel();
        }
    }

    /// Re-evaluate auto-change scheduling after an external mutation.
    ///
    /// With a start delay configured, the delay timer is (re)armed: only
    /// the most recent mutation wins the restart, and a change timer that
    /// was already running keeps running only if no delay was pending.
    fn process_auto_change(&mut self) {
        if self.delay_timer.is_armed() {
            self.change_timer.cancel();
        }

        if self.start_delay > 0.0 {
            self.delay_timer.arm(self.start_delay, false);
            return;
        }

        if !self.change_timer.is_armed() {
            self.change_timer.arm(self.change_delay, true);
        }
    }
}
