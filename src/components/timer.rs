//! Delayed-action timer slots.
//!
//! [`TimerSlot`] is the crate's scheduling primitive: a slot holding at most
//! one pending delayed action, advanced explicitly with the frame delta.
//! Every interactive object owns one slot per logical timer (the door's
//! finish-transition and close-delay timers, the gauge's auto-change and
//! start-delay timers, the path walker's wait timer, ...). Slots are fully
//! independent: cancelling or re-arming one never affects another.
//!
//! # How It Works
//!
//! 1. `arm(duration, repeating)` schedules the slot, replacing whatever was
//!    pending in it
//! 2. The owner calls `tick(delta)` once per frame from its update
//! 3. `tick` returns `true` on the frame the slot expires; one-shot slots
//!    disarm themselves, repeating slots roll over and keep running
//!
//! # Related
//!
//! - [`crate::resources::worldtime::WorldTime`] – the source of the delta
//!   passed to `tick`

/// A single delayed-action slot, one-shot or repeating.
///
/// A disarmed slot never fires and reports zero elapsed/remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimerSlot {
    duration: f32,
    elapsed: f32,
    repeating: bool,
    armed: bool,
}

impl TimerSlot {
    /// Create a disarmed slot.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Arm the slot for `duration` seconds, cancelling and replacing any
    /// pending timer in it. Negative durations are treated as zero.
    pub fn arm(&mut self, duration: f32, repeating: bool) {
        self.duration = duration.max(0.0);
        self.elapsed = 0.0;
        self.repeating = repeating;
        self.armed = true;
    }

    /// Disarm the slot. No-op if already disarmed.
    pub fn cancel(&mut self) {
        self.armed = false;
        self.elapsed = 0.0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Seconds the pending timer has been running, `0.0` when disarmed.
    pub fn elapsed(&self) -> f32 {
        if self.armed { self.elapsed } else { 0.0 }
    }

    /// Seconds until expiry, `0.0` when disarmed.
    pub fn remaining(&self) -> f32 {
        if self.armed {
            (self.duration - self.elapsed).max(0.0)
        } else {
            0.0
        }
    }

    /// Advance the slot by `delta` seconds.
    ///
    /// Returns `true` on the frame the timer expires. A one-shot slot
    /// disarms itself; a repeating slot carries the overshoot over into the
    /// next period, so a slow frame fires at most once per tick and catches
    /// up on later ticks. A disarmed slot never fires.
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.armed {
            return false;
        }

        self.elapsed += delta.max(0.0);

        if self.elapsed < self.duration {
            return false;
        }

        if self.repeating {
            if self.duration > 0.0 {
                self.elapsed -= self.duration;
            } else {
                self.elapsed = 0.0;
            }
        } else {
            self.cancel();
        }
        true
    }
}
