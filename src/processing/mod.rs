//! Processing module for per-frame trail updates
//!
//! This module contains the easing math and the trail animator that drives
//! the cursor-following markers once per display frame.

pub mod easing;
pub mod trail;

pub use easing::{EasedPoint, Point2D};
pub use trail::{TrailAnimator, TrailPoint, Viewport};
