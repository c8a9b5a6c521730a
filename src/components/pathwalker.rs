//! Stopover traversal over named splines.
//!
//! [`PathWalker`] owns the path-following bookkeeping shared by the platform
//! components: which spline to walk, the ordered stopover list, the
//! previous/target stopover pair, the traversal mode and direction, and the
//! wait-at-point timer. It never integrates progress itself — the owning
//! component advances a 0..1 progress value each frame and asks the walker
//! to resolve it into a spline distance and sample position/orientation.
//!
//! Splines are resolved by key through
//! [`SplineStore`](crate::resources::splinestore::SplineStore); a walker
//! whose spline is missing stays inert and reports the problem once.
//!
//! # Example
//!
//! ```ignore
//! let mut walker = PathWalker::new("patrol", WalkMode::Loop).with_wait_duration(1.0);
//! walker.fill_path_points(&spline);
//! // on arrival at the target stopover:
//! walker.continue_movement();
//! ```

use bevy_ecs::prelude::Component;
use glam::Vec3;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::components::timer::TimerSlot;
use crate::resources::splinestore::Spline;

/// Boundary behavior when the walker runs past either end of its stopover
/// list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkMode {
    /// Stop at the boundary.
    #[default]
    OneWay,
    /// Jump back to the opposite end and keep going the same direction.
    Loop,
    /// Flip direction and walk back.
    ReverseLoop,
    /// Never advances on its own; the owner picks targets explicitly.
    Manual,
}

/// Notification queued by walker traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEvent {
    /// Continuous movement (no wait duration) resumed at a boundary.
    StartMovement,
    /// Arrived at the given spline point index.
    ArrivedAtPoint(usize),
    WaitStarted,
    WaitFinished,
}

/// Stopover-list traversal state for one entity walking one spline.
#[derive(Component, Debug, Clone)]
pub struct PathWalker {
    spline_key: String,
    mode: WalkMode,
    points: Vec<usize>,
    previous_ix: usize,
    target_ix: usize,
    reversed: bool,
    wait_duration: f32,
    wait_timer: TimerSlot,
    start_point: i32,
    custom_points: Vec<i32>,
    inherit_pitch: bool,
    inherit_yaw: bool,
    inherit_roll: bool,
    filled: bool,
    missing_reported: bool,
    events: SmallVec<[WalkEvent; 4]>,
}

impl PathWalker {
    pub fn new(spline_key: impl Into<String>, mode: WalkMode) -> Self {
        Self {
            spline_key: spline_key.into(),
            mode,
            points: Vec::new(),
            previous_ix: 0,
            target_ix: 0,
            reversed: false,
            wait_duration: 0.0,
            wait_timer: TimerSlot::idle(),
            start_point: 0,
            custom_points: Vec::new(),
            inherit_pitch: true,
            inherit_yaw: true,
            inherit_roll: true,
            filled: false,
            missing_reported: false,
            events: SmallVec::new(),
        }
    }

    /// Restrict the path to custom stopovers. The first and last spline
    /// points are always included; out-of-range entries are dropped when
    /// the path is filled.
    pub fn with_custom_points(mut self, points: Vec<i32>) -> Self {
        self.custom_points = points;
        self
    }

    /// Seconds to pause at each stopover; zero means continuous movement
    /// over the whole spline.
    pub fn with_wait_duration(mut self, duration: f32) -> Self {
        self.wait_duration = duration;
        self
    }

    /// Stopover index (into the filled list) to start from.
    pub fn with_start_point(mut self, index: i32) -> Self {
        self.start_point = index;
        self
    }

    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Which orientation channels follow the spline; the rest keep the
    /// entity's current orientation.
    pub fn with_inherit(mut self, pitch: bool, yaw: bool, roll: bool) -> Self {
        self.inherit_pitch = pitch;
        self.inherit_yaw = yaw;
        self.inherit_roll = roll;
        self
    }

    pub fn spline_key(&self) -> &str {
        &self.spline_key
    }

    pub fn mode(&self) -> WalkMode {
        self.mode
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn wait_duration(&self) -> f32 {
        self.wait_duration
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn path_points(&self) -> &[usize] {
        &self.points
    }

    /// Spline point index of the previous stopover.
    pub fn previous_point(&self) -> usize {
        self.points.get(self.previous_ix).copied().unwrap_or(0)
    }

    /// Spline point index of the current target stopover.
    pub fn target_point(&self) -> usize {
        self.points.get(self.target_ix).copied().unwrap_or(0)
    }

    pub fn target_index(&self) -> usize {
        self.target_ix
    }

    /// Build the stopover list from the spline and place the walker at its
    /// start point. Custom stopovers are unioned with the first and last
    /// spline points, deduped and sorted; invalid entries are dropped.
    pub fn fill_path_points(&mut self, spline: &Spline) {
        let last = spline.last_point_index();
        self.points.clear();

        if self.custom_points.is_empty() {
            self.points.extend(0..=last);
        } else {
            let mut set: FxHashSet<usize> = FxHashSet::default();
            set.insert(0);
            set.insert(last);
            for &point in &self.custom_points {
                if point < 0 || point as usize > last {
                    log::warn!(
                        "dropping invalid stopover {point} for spline '{}' (last point {last})",
                        self.spline_key
                    );
                    continue;
                }
                set.insert(point as usize);
            }
            self.points.extend(set);
            self.points.sort_unstable();
        }

        let start = if self.start_point < 0 || self.start_point as usize >= self.points.len() {
            log::error!(
                "illegal start point {} for spline '{}', using 0",
                self.start_point,
                self.spline_key
            );
            0
        } else {
            self.start_point as usize
        };
        self.previous_ix = start;
        self.target_ix = start;
        self.filled = true;
        self.missing_reported = false;
    }

    /// Advance previous/target by one stopover in the current direction,
    /// resolving boundary overruns per [`WalkMode`]. Returns `false` when
    /// the walker stops instead (one-way or manual boundary).
    pub fn step(&mut self) -> bool {
        if self.points.len() < 2 {
            return false;
        }
        let last = self.points.len() - 1;
        self.previous_ix = self.target_ix;

        let candidate = if self.reversed {
            self.target_ix.checked_sub(1)
        } else if self.target_ix < last {
            Some(self.target_ix + 1)
        } else {
            None
        };

        if let Some(ix) = candidate {
            self.target_ix = ix;
            return true;
        }

        match self.mode {
            WalkMode::OneWay | WalkMode::Manual => false,
            WalkMode::Loop => {
                self.previous_ix = if self.reversed { last } else { 0 };
                self.target_ix = if self.reversed {
                    self.previous_ix - 1
                } else {
                    1
                };
                true
            }
            WalkMode::ReverseLoop => {
                self.reversed = !self.reversed;
                self.target_ix = if self.reversed {
                    self.previous_ix - 1
                } else {
                    self.previous_ix + 1
                };
                true
            }
        }
    }

    /// Pick an explicit target stopover (manual traversal). Returns `false`
    /// when the index is out of bounds.
    pub fn set_target_index(&mut self, index: usize) -> bool {
        if index >= self.points.len() {
            return false;
        }
        self.previous_ix = self.target_ix;
        self.target_ix = index;
        true
    }

    /// Arrival handling: report the stopover, advance, and schedule the
    /// next leg. Returns `false` when the walker stopped at a boundary.
    pub fn continue_movement(&mut self) -> bool {
        if !self.filled {
            return false;
        }

        if self.wait_duration > 0.0 {
            self.events
                .push(WalkEvent::ArrivedAtPoint(self.target_point()));
            if !self.step() {
                return false;
            }
        } else {
            self.events.push(WalkEvent::StartMovement);
        }

        self.start_wait();
        true
    }

    /// Arm the wait timer if a wait is configured and none is pending.
    pub fn start_wait(&mut self) {
        if self.wait_duration > 0.0 && !self.wait_timer.is_armed() {
            self.events.push(WalkEvent::WaitStarted);
            self.wait_timer.arm(self.wait_duration, false);
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.wait_timer.is_armed()
    }

    /// Advance the wait timer, queueing [`WalkEvent::WaitFinished`] on
    /// expiry. Returns `true` on the frame the wait ends.
    pub fn update(&mut self, delta: f32) -> bool {
        if self.wait_timer.tick(delta) {
            self.events.push(WalkEvent::WaitFinished);
            return true;
        }
        false
    }

    /// Drain the queued notifications, oldest first.
    pub fn take_events(&mut self) -> SmallVec<[WalkEvent; 4]> {
        std::mem::take(&mut self.events)
    }

    /// Arc length of the current leg. The whole spline counts as one leg
    /// when no wait duration is configured.
    pub fn segment_length(&self, spline: &Spline) -> f32 {
        let (start, finish) = self.segment_span(spline);
        (finish - start).abs()
    }

    /// Resolve a 0..1 leg progress into a distance along the spline.
    pub fn distance_at_progress(&self, spline: &Spline, progress: f32) -> f32 {
        let (start, finish) = self.segment_span(spline);
        start + (finish - start) * progress
    }

    /// Sample the position and orientation for a leg progress. Orientation
    /// channels not inherited from the path keep `current` values.
    pub fn sample(&self, spline: &Spline, progress: f32, current: Vec3) -> (Vec3, Vec3) {
        let distance = self.distance_at_progress(spline, progress);
        let position = spline.location_at_distance(distance);
        let path = spline.orientation_at_distance(distance);
        let orientation = Vec3::new(
            if self.inherit_pitch { path.x } else { current.x },
            if self.inherit_yaw { path.y } else { current.y },
            if self.inherit_roll { path.z } else { current.z },
        );
        (position, orientation)
    }

    /// Report a missing spline once; later calls are silent.
    pub fn report_missing_path(&mut self) {
        if !self.missing_reported {
            log::warn!("spline '{}' not found, walker is inert", self.spline_key);
            self.missing_reported = true;
        }
    }

    fn segment_span(&self, spline: &Spline) -> (f32, f32) {
        if self.wait_duration <= 0.0 {
            (0.0, spline.total_length())
        } else {
            (
                spline.distance_at_point(self.previous_point()),
                spline.distance_at_point(self.target_point()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_spline() -> Spline {
        Spline::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(20.0, 0.0, 0.0),
                Vec3::new(30.0, 0.0, 0.0),
            ],
            false,
        )
    }

    #[test]
    fn test_fill_uses_every_point_by_default() {
        let mut walker = PathWalker::new("line", WalkMode::OneWay);
        walker.fill_path_points(&straight_spline());
        assert_eq!(walker.path_points(), &[0, 1, 2, 3]);
        assert_eq!(walker.previous_point(), 0);
        assert_eq!(walker.target_point(), 0);
    }

    #[test]
    fn test_fill_custom_points_union_sort_and_drop_invalid() {
        let mut walker =
            PathWalker::new("line", WalkMode::OneWay).with_custom_points(vec![2, -1, 7, 2]);
        walker.fill_path_points(&straight_spline());
        // -1 and 7 dropped; endpoints forced in; duplicates collapsed.
        assert_eq!(walker.path_points(), &[0, 2, 3]);
    }

    #[test]
    fn test_fill_closed_loop_adds_wrap_point() {
        let spline = Spline::new(
            vec![
                Vec3::ZERO,
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(10.0, 10.0, 0.0),
            ],
            true,
        );
        let mut walker = PathWalker::new("ring", WalkMode::Loop);
        walker.fill_path_points(&spline);
        assert_eq!(walker.path_points(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_illegal_start_point_substitutes_zero() {
        let mut walker = PathWalker::new("line", WalkMode::OneWay).with_start_point(9);
        walker.fill_path_points(&straight_spline());
        assert_eq!(walker.previous_point(), 0);
        assert_eq!(walker.target_point(), 0);
    }

    #[test]
    fn test_one_way_stops_at_boundary() {
        let mut walker = PathWalker::new("line", WalkMode::OneWay);
        walker.fill_path_points(&straight_spline());
        assert!(walker.step());
        assert!(walker.step());
        assert!(walker.step());
        assert_eq!(walker.target_point(), 3);
        assert!(!walker.step());
    }

    #[test]
    fn test_loop_wraps_to_start() {
        let mut walker = PathWalker::new("line", WalkMode::Loop);
        walker.fill_path_points(&straight_spline());
        for _ in 0..3 {
            assert!(walker.step());
        }
        assert_eq!(walker.target_point(), 3);
        // Overrunning the end restarts the first leg.
        assert!(walker.step());
        assert_eq!(walker.previous_point(), 0);
        assert_eq!(walker.target_point(), 1);
    }

    #[test]
    fn test_reverse_loop_ping_pongs() {
        let mut walker = PathWalker::new("line", WalkMode::ReverseLoop);
        walker.fill_path_points(&straight_spline());
        for _ in 0..3 {
            walker.step();
        }
        assert!(walker.step());
        assert!(walker.is_reversed());
        assert_eq!(walker.previous_point(), 3);
        assert_eq!(walker.target_point(), 2);

        walker.step();
        walker.step();
        assert_eq!(walker.target_point(), 0);
        assert!(walker.step());
        assert!(!walker.is_reversed());
        assert_eq!(walker.previous_point(), 0);
        assert_eq!(walker.target_point(), 1);
    }

    #[test]
    fn test_continue_movement_waits_between_points() {
        let mut walker = PathWalker::new("line", WalkMode::OneWay).with_wait_duration(2.0);
        walker.fill_path_points(&straight_spline());
        walker.step();
        assert!(walker.continue_movement());
        assert_eq!(
            walker.take_events().as_slice(),
            &[WalkEvent::ArrivedAtPoint(1), WalkEvent::WaitStarted]
        );
        assert!(walker.is_waiting());

        assert!(!walker.update(1.0));
        assert!(walker.update(1.0));
        assert_eq!(walker.take_events().as_slice(), &[WalkEvent::WaitFinished]);
    }

    #[test]
    fn test_continuous_movement_emits_start() {
        let mut walker = PathWalker::new("line", WalkMode::Loop);
        walker.fill_path_points(&straight_spline());
        assert!(walker.continue_movement());
        assert_eq!(
            walker.take_events().as_slice(),
            &[WalkEvent::StartMovement]
        );
        assert!(!walker.is_waiting());
    }

    #[test]
    fn test_one_way_continue_stops_at_end() {
        let mut walker = PathWalker::new("line", WalkMode::OneWay).with_wait_duration(1.0);
        walker.fill_path_points(&straight_spline());
        walker.step();
        walker.step();
        walker.step();
        assert!(!walker.continue_movement());
        assert_eq!(
            walker.take_events().as_slice(),
            &[WalkEvent::ArrivedAtPoint(3)]
        );
    }

    #[test]
    fn test_segment_sampling_with_wait() {
        let spline = straight_spline();
        let mut walker = PathWalker::new("line", WalkMode::OneWay).with_wait_duration(1.0);
        walker.fill_path_points(&spline);
        walker.step();
        walker.step();
        // Leg from point 1 (distance 10) to point 2 (distance 20).
        assert_eq!(walker.segment_length(&spline), 10.0);
        let (pos, _) = walker.sample(&spline, 0.5, Vec3::ZERO);
        assert_eq!(pos, Vec3::new(15.0, 0.0, 0.0));
    }

    #[test]
    fn test_continuous_sampling_spans_whole_spline() {
        let spline = straight_spline();
        let mut walker = PathWalker::new("line", WalkMode::Loop);
        walker.fill_path_points(&spline);
        assert_eq!(walker.segment_length(&spline), 30.0);
        let (pos, _) = walker.sample(&spline, 1.0, Vec3::ZERO);
        assert_eq!(pos, Vec3::new(30.0, 0.0, 0.0));
    }

    #[test]
    fn test_manual_target_selection() {
        let mut walker = PathWalker::new("line", WalkMode::Manual);
        walker.fill_path_points(&straight_spline());
        assert!(walker.set_target_index(2));
        assert_eq!(walker.target_point(), 2);
        assert!(!walker.set_target_index(9));
    }
}
