//! Spline-riding platform components.
//!
//! Two flavors share the [`PathWalker`] core:
//!
//! - [`FloatingPlatform`] integrates its own progress: speed over the
//!   current leg gives a travel time, and arrival advances the walker,
//!   optionally waiting at each stopover. It runs an Idle/Move/Wait cycle
//!   and can be started, stopped, or sent to an explicit point.
//! - [`MovingPlatform`] is driven by an externally supplied 0..1 progress
//!   (a host-side timeline or animation curve). It only watches the
//!   progress go by, reporting each control point crossed and handling the
//!   wait at the end of a leg.
//!
//! Both leave `Position`/`Orientation` writing to
//! [`crate::systems::platform`].

use bevy_ecs::prelude::Component;
use glam::Vec3;
use smallvec::SmallVec;

use crate::components::pathwalker::{PathWalker, WalkEvent, WalkMode};
use crate::resources::splinestore::Spline;

/// Movement cycle of a self-driving platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformState {
    #[default]
    Idle,
    Move,
    Wait,
}

/// Notification queued by platform movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    Started,
    Stopped,
    /// Arrived at the given spline point. Always the point physically
    /// reached at the end of the leg, even when a loop re-bases the walker
    /// back to the start afterwards.
    ArrivedAtPoint(usize),
    WaitStarted,
    WaitFinished,
    /// Externally-driven progress crossed the given spline point.
    PointPassed(usize),
}

/// A platform that drives itself along its walker's path at a fixed speed.
#[derive(Component, Debug, Clone)]
pub struct FloatingPlatform {
    walker: PathWalker,
    state: PlatformState,
    speed: f32,
    travel_time: f32,
    progress: f32,
    auto_start: bool,
    events: SmallVec<[PlatformEvent; 4]>,
}

impl FloatingPlatform {
    pub fn new(walker: PathWalker, speed: f32) -> Self {
        Self {
            walker,
            state: PlatformState::Idle,
            speed: speed.abs(),
            travel_time: 0.0,
            progress: 0.0,
            auto_start: false,
            events: SmallVec::new(),
        }
    }

    /// Start moving as soon as the path is filled.
    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    pub fn walker(&self) -> &PathWalker {
        &self.walker
    }

    /// Report the walker's spline as missing (once).
    pub fn report_missing_path(&mut self) {
        self.walker.report_missing_path();
    }

    pub fn state(&self) -> PlatformState {
        self.state
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.abs();
    }

    /// Fill the walker's path and take the start pose; begins moving when
    /// auto-start is set.
    pub fn initialize(&mut self, spline: &Spline) {
        self.walker.fill_path_points(spline);
        self.walker.step();
        self.recalculate_travel_time(spline);
        if self.auto_start {
            self.start();
        }
    }

    /// Begin (or resume) moving. Honored from Idle and Wait.
    pub fn start(&mut self) -> bool {
        if self.state == PlatformState::Move {
            return false;
        }
        self.state = PlatformState::Move;
        self.events.push(PlatformEvent::Started);
        true
    }

    /// Stop where it stands. Honored from Move and Wait.
    pub fn stop(&mut self) -> bool {
        if self.state == PlatformState::Idle {
            return false;
        }
        self.state = PlatformState::Idle;
        self.events.push(PlatformEvent::Stopped);
        true
    }

    /// Head for an explicit stopover (manual traversal). Rejected when the
    /// index is out of bounds.
    pub fn move_to_point(&mut self, index: usize, spline: &Spline) -> bool {
        if !self.walker.set_target_index(index) {
            return false;
        }
        self.progress = 0.0;
        self.recalculate_travel_time(spline);
        self.state = PlatformState::Move;
        self.events.push(PlatformEvent::Started);
        true
    }

    /// Advance one frame and drain the queued notifications.
    pub fn update(&mut self, delta: f32, spline: &Spline) -> SmallVec<[PlatformEvent; 4]> {
        if !self.walker.is_filled() {
            self.initialize(spline);
        }

        if self.state == PlatformState::Wait {
            if self.walker.update(delta) {
                // Movement resumes next frame.
                self.state = PlatformState::Move;
            }
            self.drain_walker_events();
            return std::mem::take(&mut self.events);
        }
        self.drain_walker_events();

        if self.state == PlatformState::Move {
            if self.travel_time > 0.0 {
                self.progress = (self.progress + delta / self.travel_time).min(1.0);
            } else {
                self.progress = 1.0;
            }
            if self.progress >= 1.0 {
                self.arrive(spline);
            }
        }

        std::mem::take(&mut self.events)
    }

    /// Current pose along the spline.
    pub fn sample_pose(&self, spline: &Spline, current_orientation: Vec3) -> (Vec3, Vec3) {
        self.walker.sample(spline, self.progress, current_orientation)
    }

    fn arrive(&mut self, spline: &Spline) {
        let arrived = self.walker.target_point();
        let advanced = self.walker.step();
        self.events.push(PlatformEvent::ArrivedAtPoint(arrived));

        if self.walker.mode() == WalkMode::Manual || !advanced {
            self.state = PlatformState::Idle;
            self.events.push(PlatformEvent::Stopped);
            return;
        }

        self.progress = 0.0;
        self.recalculate_travel_time(spline);

        if self.walker.wait_duration() > 0.0 {
            self.state = PlatformState::Wait;
            self.walker.start_wait();
            self.drain_walker_events();
        }
    }

    fn recalculate_travel_time(&mut self, spline: &Spline) {
        let distance = (spline.distance_at_point(self.walker.target_point())
            - spline.distance_at_point(self.walker.previous_point()))
        .abs();
        if self.speed > 0.0 {
            self.travel_time = distance / self.speed;
        } else {
            log::error!("floating platform speed is zero, platform will not move");
            self.travel_time = 0.0;
            self.state = PlatformState::Idle;
        }
    }

    fn drain_walker_events(&mut self) {
        for event in self.walker.take_events() {
            self.events.push(match event {
                WalkEvent::StartMovement => PlatformEvent::Started,
                WalkEvent::ArrivedAtPoint(p) => PlatformEvent::ArrivedAtPoint(p),
                WalkEvent::WaitStarted => PlatformEvent::WaitStarted,
                WalkEvent::WaitFinished => PlatformEvent::WaitFinished,
            });
        }
    }
}

/// A platform whose progress along the current leg is supplied by the host.
#[derive(Component, Debug, Clone)]
pub struct MovingPlatform {
    walker: PathWalker,
    passed_points: Vec<usize>,
    last_distance: f32,
    events: SmallVec<[PlatformEvent; 4]>,
}

impl MovingPlatform {
    pub fn new(walker: PathWalker) -> Self {
        Self {
            walker,
            passed_points: Vec::new(),
            last_distance: 0.0,
            events: SmallVec::new(),
        }
    }

    pub fn walker(&self) -> &PathWalker {
        &self.walker
    }

    /// Report the walker's spline as missing (once).
    pub fn report_missing_path(&mut self) {
        self.walker.report_missing_path();
    }

    pub fn passed_points(&self) -> &[usize] {
        &self.passed_points
    }

    pub fn clear_passed_points(&mut self) {
        self.passed_points.clear();
    }

    /// Apply an externally-driven 0..1 progress along the current leg,
    /// reporting every control point crossed since the last call. Returns
    /// the sampled pose.
    pub fn process_movement(
        &mut self,
        progress: f32,
        spline: &Spline,
        current_orientation: Vec3,
    ) -> (Vec3, Vec3) {
        if !self.walker.is_filled() {
            self.walker.fill_path_points(spline);
            self.walker.step();
            self.last_distance = spline.distance_at_point(self.walker.previous_point());
        }

        let distance = self.walker.distance_at_progress(spline, progress);
        self.check_points_on_path(distance, spline);
        self.last_distance = distance;
        self.walker.sample(spline, progress, current_orientation)
    }

    /// The host's timeline reached the end of the leg: advance the walker
    /// and schedule the wait.
    pub fn change_target_point(&mut self) {
        if self.walker.wait_duration() <= 0.0 {
            return;
        }
        self.walker.continue_movement();
    }

    /// Advance the wait timer; the host restarts its timeline on
    /// [`PlatformEvent::WaitFinished`].
    pub fn update(&mut self, delta: f32) -> SmallVec<[PlatformEvent; 4]> {
        self.walker.update(delta);
        for event in self.walker.take_events() {
            self.events.push(match event {
                WalkEvent::StartMovement => PlatformEvent::Started,
                WalkEvent::ArrivedAtPoint(p) => PlatformEvent::ArrivedAtPoint(p),
                WalkEvent::WaitStarted => PlatformEvent::WaitStarted,
                WalkEvent::WaitFinished => PlatformEvent::WaitFinished,
            });
        }
        std::mem::take(&mut self.events)
    }

    fn check_points_on_path(&mut self, distance: f32, spline: &Spline) {
        let (lo, hi) = if self.last_distance <= distance {
            (self.last_distance, distance)
        } else {
            (distance, self.last_distance)
        };
        for point in 0..=spline.last_point_index() {
            let d = spline.distance_at_point(point);
            if d >= lo && d <= hi && !self.passed_points.contains(&point) {
                self.passed_points.push(point);
                self.events.push(PlatformEvent::PointPassed(point));
            }
        }
    }
}
