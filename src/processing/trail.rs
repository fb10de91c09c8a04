//! Cursor-following particle trail
//!
//! A fixed chain of points trails the pointer. Point 0 eases toward the
//! pointer, every later point eases toward its predecessor, so lag grows
//! along the chain while scale and opacity shrink and the hue rotates.

use crate::config::{ChainMode, TrailConfig, TrailResult};
use crate::processing::easing::{EasedPoint, Point2D};
use crate::render::marker::{Marker, MarkerStyle};
use serde::{Deserialize, Serialize};

/// Visible page area in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Wrap a hue into [0, 360)
pub fn wrap_hue(hue: f64) -> f64 {
    let wrapped = hue.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Scale of the point at `index` in a chain of `length` points
pub fn chain_scale(index: usize, length: usize) -> f64 {
    (length - index) as f64 / length as f64
}

/// Opacity for a given scale, never below 0.1
pub fn chain_opacity(scale: f64) -> f64 {
    // scale * 0.8 + 0.1, arranged so a full-size head lands on exactly 0.9
    (scale * 8.0 + 1.0) / 10.0
}

/// Style of one point given its position and place in the chain
pub fn point_style(
    index: usize,
    length: usize,
    position: Point2D,
    hue_start: f64,
    hue_step: f64,
) -> MarkerStyle {
    let scale = chain_scale(index, length);
    MarkerStyle {
        x: position.x,
        y: position.y,
        scale,
        opacity: chain_opacity(scale),
        hue: wrap_hue(hue_start + index as f64 * hue_step),
    }
}

/// One marker plus its tracked position in the chain
#[derive(Debug)]
pub struct TrailPoint<M> {
    marker: M,
    position: EasedPoint,
    style: MarkerStyle,
}

impl<M> TrailPoint<M> {
    pub fn marker(&self) -> &M {
        &self.marker
    }

    pub fn position(&self) -> Point2D {
        self.position.position
    }

    /// Style applied on the most recent frame
    pub fn style(&self) -> MarkerStyle {
        self.style
    }
}

/// Owns the pointer position and the chain of trail points
#[derive(Debug)]
pub struct TrailAnimator<M> {
    config: TrailConfig,
    pointer: Point2D,
    hue_start: f64,
    points: Vec<TrailPoint<M>>,
    frames: u64,
}

impl<M: Marker> TrailAnimator<M> {
    /// Create the chain with every point resting at the viewport center
    ///
    /// `create_marker` is called once per point, head first.
    pub fn new(
        config: TrailConfig,
        viewport: Viewport,
        create_marker: impl FnMut(usize) -> M,
    ) -> TrailResult<Self> {
        Self::with_pointer(config, viewport.center(), create_marker)
    }

    /// Create the chain resting at a known pointer position
    pub fn with_pointer(
        config: TrailConfig,
        pointer: Point2D,
        mut create_marker: impl FnMut(usize) -> M,
    ) -> TrailResult<Self> {
        config.validate()?;

        let length = config.length;
        let hue_start = wrap_hue(config.hue_start);
        let points = (0..length)
            .map(|index| TrailPoint {
                marker: create_marker(index),
                position: EasedPoint::new(pointer),
                style: point_style(index, length, pointer, hue_start, config.hue_step),
            })
            .collect();

        tracing::debug!(
            "Created trail with {} points (ease={}, hue_start={}, mode={:?})",
            length,
            config.ease_factor,
            hue_start,
            config.chain_mode
        );

        Ok(Self {
            config,
            pointer,
            hue_start,
            points,
            frames: 0,
        })
    }

    /// Advance the whole chain by one frame and restyle every marker
    pub fn tick(&mut self) {
        let length = self.points.len();
        let ease_factor = self.config.ease_factor;
        let hue_step = self.config.hue_step;
        let mode = self.config.chain_mode;

        let mut target = self.pointer;
        for (index, point) in self.points.iter_mut().enumerate() {
            let before = point.position.position;
            point.position.step(target, ease_factor);

            let position = point.position.position;
            let style = point_style(index, length, position, self.hue_start, hue_step);
            point.marker.apply(&style);
            point.style = style;

            target = match mode {
                ChainMode::CurrentFrame => point.position.position,
                ChainMode::PreviousFrame => before,
            };
        }

        self.hue_start = wrap_hue(self.hue_start + self.config.hue_drift);
        self.frames += 1;
    }
}

impl<M> TrailAnimator<M> {
    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    /// Record a raw pointer move; smoothing happens on the next frame
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer = Point2D::new(x, y);
    }

    pub fn pointer(&self) -> Point2D {
        self.pointer
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn points(&self) -> &[TrailPoint<M>] {
        &self.points
    }

    pub fn positions(&self) -> Vec<Point2D> {
        self.points.iter().map(TrailPoint::position).collect()
    }

    pub fn styles(&self) -> Vec<MarkerStyle> {
        self.points.iter().map(TrailPoint::style).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::marker::StyleMarker;

    fn animator(config: TrailConfig) -> TrailAnimator<StyleMarker> {
        TrailAnimator::with_pointer(config, Point2D::new(0.0, 0.0), StyleMarker::new).unwrap()
    }

    fn scenario_config() -> TrailConfig {
        TrailConfig {
            length: 14,
            ease_factor: 0.45,
            hue_start: 900.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_at_viewport_center() {
        let trail = TrailAnimator::new(
            TrailConfig::default(),
            Viewport::new(1280.0, 720.0),
            StyleMarker::new,
        )
        .unwrap();

        assert_eq!(trail.pointer(), Point2D::new(640.0, 360.0));
        assert_eq!(trail.len(), 14);
        assert!(trail.positions().iter().all(|p| *p == Point2D::new(640.0, 360.0)));
    }

    #[test]
    fn test_markers_created_head_first() {
        let trail = animator(TrailConfig::default());
        let indices: Vec<usize> = trail.points().iter().map(|p| p.marker().index).collect();
        assert_eq!(indices, (0..14).collect::<Vec<_>>());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = TrailAnimator::with_pointer(
            TrailConfig {
                ease_factor: 0.0,
                ..Default::default()
            },
            Point2D::default(),
            StyleMarker::new,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_scale_and_opacity_bounds() {
        let mut trail = animator(TrailConfig::default());
        trail.pointer_moved(300.0, -40.0);

        for _ in 0..5 {
            trail.tick();
            for style in trail.styles() {
                assert!(style.scale > 0.0 && style.scale <= 1.0, "scale {}", style.scale);
                assert!(
                    style.opacity > 0.1 && style.opacity <= 0.9,
                    "opacity {}",
                    style.opacity
                );
            }
        }
    }

    #[test]
    fn test_scale_decreases_along_chain() {
        let mut trail = animator(TrailConfig::default());
        trail.tick();

        let styles = trail.styles();
        assert_eq!(styles[0].scale, 1.0);
        assert!((styles[0].opacity - 0.9).abs() < 1e-12);
        for pair in styles.windows(2) {
            assert!(pair[0].scale >= pair[1].scale);
            assert!(pair[0].opacity >= pair[1].opacity);
        }
        assert!((styles[13].scale - 1.0 / 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_hue_wraps_modulo_360() {
        let mut trail = animator(scenario_config());
        trail.tick();

        let styles = trail.styles();
        assert_eq!(styles[0].hue, 180.0);
        assert_eq!(styles[1].hue, 185.0);
        assert_eq!(styles[13].hue, 245.0);
        assert!(styles.iter().all(|s| (0.0..360.0).contains(&s.hue)));
    }

    #[test]
    fn test_negative_hue_wraps_into_range() {
        assert_eq!(wrap_hue(-30.0), 330.0);
        assert_eq!(wrap_hue(720.0), 0.0);
        assert!((0.0..360.0).contains(&wrap_hue(-1e-20)));
    }

    #[test]
    fn test_hue_drift_rotates_each_frame() {
        let mut trail = animator(TrailConfig {
            hue_start: 350.0,
            hue_drift: 20.0,
            ..Default::default()
        });

        trail.tick();
        assert_eq!(trail.styles()[0].hue, 350.0);
        trail.tick();
        assert_eq!(trail.styles()[0].hue, 10.0);
    }

    #[test]
    fn test_pointer_jump_scenario() {
        let mut trail = animator(scenario_config());
        trail.pointer_moved(100.0, 100.0);

        trail.tick();
        let head = trail.positions()[0];
        assert!((head.x - 45.0).abs() < 1e-9, "head x {}", head.x);
        assert!((head.y - 45.0).abs() < 1e-9, "head y {}", head.y);

        for _ in 0..9 {
            trail.tick();
        }
        let head = trail.positions()[0];
        assert!(head.distance(Point2D::new(100.0, 100.0)) < 1.0, "head {:?}", head);
        assert_eq!(trail.frames(), 10);
    }

    #[test]
    fn test_chain_lags_behind_head() {
        let mut trail = animator(scenario_config());
        trail.pointer_moved(100.0, 0.0);
        trail.tick();

        let xs: Vec<f64> = trail.positions().iter().map(|p| p.x).collect();
        for pair in xs.windows(2) {
            assert!(pair[0] > pair[1], "chain should lag: {:?}", xs);
        }
        // Second point eases toward the head's updated position
        assert!((xs[1] - 45.0 * 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_stationary_pointer_converges() {
        let mut trail = animator(scenario_config());
        trail.pointer_moved(-250.0, 75.0);

        for _ in 0..500 {
            trail.tick();
        }

        let target = Point2D::new(-250.0, 75.0);
        for position in trail.positions() {
            assert!(position.distance(target) < 1e-6, "{:?} did not converge", position);
        }
    }

    #[test]
    fn test_unit_ease_snaps_current_frame_chain() {
        let mut trail = animator(TrailConfig {
            ease_factor: 1.0,
            ..Default::default()
        });
        trail.pointer_moved(42.0, 24.0);
        trail.tick();

        assert!(trail.positions().iter().all(|p| *p == Point2D::new(42.0, 24.0)));
    }

    #[test]
    fn test_unit_ease_previous_frame_chain() {
        let mut trail = animator(TrailConfig {
            ease_factor: 1.0,
            chain_mode: ChainMode::PreviousFrame,
            ..Default::default()
        });

        for step in 1..=20 {
            let prior = trail.positions();
            trail.pointer_moved(step as f64 * 10.0, step as f64 * -5.0);
            trail.tick();

            let current = trail.positions();
            assert_eq!(current[0], trail.pointer());
            for i in 1..current.len() {
                assert_eq!(current[i], prior[i - 1]);
            }
        }
    }

    #[test]
    fn test_markers_receive_every_frame() {
        let mut trail = animator(TrailConfig::default());
        trail.pointer_moved(10.0, 10.0);
        for _ in 0..3 {
            trail.tick();
        }

        for point in trail.points() {
            assert_eq!(point.marker().updates, 3);
            assert_eq!(point.marker().last, Some(point.style()));
        }
    }
}
