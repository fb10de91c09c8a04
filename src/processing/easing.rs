//! Exponential smoothing toward a moving target
//!
//! Each step moves a value a fixed fraction of the remaining distance toward
//! its target, so the error decays by `1 - factor` per step.

use serde::{Deserialize, Serialize};

/// A 2D viewport coordinate in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Move `current` toward `target` by `factor` of the remaining distance
pub fn ease(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// A 2D position that follows its target with exponential smoothing
#[derive(Debug, Clone)]
pub struct EasedPoint {
    pub position: Point2D,
}

impl EasedPoint {
    /// Create an eased point resting at the given position
    pub fn new(initial: Point2D) -> Self {
        Self { position: initial }
    }

    /// Advance one step toward the target
    ///
    /// `factor` of 1.0 snaps to the target; smaller values lag behind it.
    pub fn step(&mut self, target: Point2D, factor: f64) {
        self.position.x = ease(self.position.x, target.x, factor);
        self.position.y = ease(self.position.y, target.y, factor);
    }
}
