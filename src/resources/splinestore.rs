//! Spline storage and sampling.
//!
//! Provides [`Spline`], a named polyline path sampled by arc length, and
//! [`SplineStore`], the registry path walkers resolve their spline keys
//! through. Splines carry a position and an orientation (pitch/yaw/roll
//! degrees) per control point and an optional closed-loop flag; a closed
//! loop gains a synthetic wrap point back to the start.
//!
//! Sampling is piecewise linear between control points. Definitions can be
//! built in code or loaded from JSON.

use bevy_ecs::prelude::Resource;
use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Serializable spline definition, as loaded from JSON.
#[derive(Debug, Deserialize, Serialize)]
pub struct SplineDef {
    pub points: Vec<[f32; 3]>,
    #[serde(default)]
    pub orientations: Vec<[f32; 3]>,
    #[serde(default)]
    pub closed: bool,
}

/// A polyline path with per-point orientation, sampled by distance.
#[derive(Debug, Clone)]
pub struct Spline {
    points: Vec<Vec3>,
    orientations: Vec<Vec3>,
    closed: bool,
    /// Cumulative arc length at each point, including the wrap point on a
    /// closed loop. `distances.len() == last_point_index() + 1`.
    distances: Vec<f32>,
}

impl Spline {
    /// Build a spline with zeroed orientations.
    pub fn new(points: Vec<Vec3>, closed: bool) -> Self {
        let orientations = vec![Vec3::ZERO; points.len()];
        Self::with_orientations(points, orientations, closed)
    }

    /// Build a spline with explicit per-point orientations. A short
    /// orientation list is padded with zeroes.
    pub fn with_orientations(points: Vec<Vec3>, mut orientations: Vec<Vec3>, closed: bool) -> Self {
        orientations.resize(points.len(), Vec3::ZERO);

        let mut distances = Vec::with_capacity(points.len() + 1);
        let mut total = 0.0;
        distances.push(0.0);
        for pair in points.windows(2) {
            total += pair[0].distance(pair[1]);
            distances.push(total);
        }
        if closed && points.len() > 1 {
            total += points[points.len() - 1].distance(points[0]);
            distances.push(total);
        }

        Self {
            points,
            orientations,
            closed,
            distances,
        }
    }

    pub fn from_def(def: &SplineDef) -> Self {
        Self::with_orientations(
            def.points.iter().map(|p| Vec3::from_array(*p)).collect(),
            def.orientations
                .iter()
                .map(|o| Vec3::from_array(*o))
                .collect(),
            def.closed,
        )
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_closed_loop(&self) -> bool {
        self.closed
    }

    /// Index of the last addressable point: the synthetic wrap point
    /// (`point_count`) on a closed loop, otherwise `point_count - 1`.
    pub fn last_point_index(&self) -> usize {
        if self.closed {
            self.point_count()
        } else {
            self.point_count().saturating_sub(1)
        }
    }

    /// Arc length from the start to the given point. Out-of-range indices
    /// clamp to the last point.
    pub fn distance_at_point(&self, index: usize) -> f32 {
        let ix = index.min(self.distances.len().saturating_sub(1));
        self.distances.get(ix).copied().unwrap_or(0.0)
    }

    pub fn total_length(&self) -> f32 {
        self.distances.last().copied().unwrap_or(0.0)
    }

    /// Position at a distance along the spline, clamped to the ends.
    pub fn location_at_distance(&self, distance: f32) -> Vec3 {
        self.sample(distance, |ix| self.point_at(ix))
    }

    /// Orientation (pitch/yaw/roll degrees) at a distance, clamped to the
    /// ends.
    pub fn orientation_at_distance(&self, distance: f32) -> Vec3 {
        self.sample(distance, |ix| self.orientation_at(ix))
    }

    fn point_at(&self, index: usize) -> Vec3 {
        // The wrap point of a closed loop aliases point 0.
        self.points[index % self.points.len()]
    }

    fn orientation_at(&self, index: usize) -> Vec3 {
        self.orientations[index % self.orientations.len()]
    }

    fn sample(&self, distance: f32, value_at: impl Fn(usize) -> Vec3) -> Vec3 {
        if self.points.is_empty() {
            return Vec3::ZERO;
        }
        if self.points.len() == 1 || distance <= 0.0 {
            return value_at(0);
        }

        let distance = distance.min(self.total_length());
        for ix in 1..self.distances.len() {
            if distance <= self.distances[ix] {
                let start = self.distances[ix - 1];
                let span = self.distances[ix] - start;
                let t = if span > 0.0 {
                    (distance - start) / span
                } else {
                    0.0
                };
                return value_at(ix - 1).lerp(value_at(ix), t);
            }
        }
        value_at(self.distances.len() - 1)
    }
}

/// Registry of loaded splines by key.
#[derive(Resource, Debug, Default)]
pub struct SplineStore {
    pub map: FxHashMap<String, Spline>,
}

impl SplineStore {
    /// Create an empty store.
    pub fn new() -> Self {
        SplineStore {
            map: FxHashMap::default(),
        }
    }

    /// Get a spline by its key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&Spline> {
        self.map.get(key.as_ref())
    }

    /// Insert a spline with a specific key.
    pub fn insert(&mut self, key: impl Into<String>, spline: Spline) {
        self.map.insert(key.into(), spline);
    }

    /// Load a `{ key: definition }` JSON document into the store.
    pub fn load_json(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let defs: FxHashMap<String, SplineDef> = serde_json::from_str(json)?;
        for (key, def) in &defs {
            self.map.insert(key.clone(), Spline::from_def(def));
        }
        Ok(())
    }

    /// Clear all loaded splines.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}
