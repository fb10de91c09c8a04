//! Visual markers drawn for each trail point
//!
//! The animator only ever talks to a `Marker`. A webview host implements it by
//! writing the CSS strings below onto a DOM node; the headless markers here
//! keep the last style for tests and the demo binary.

use serde::{Deserialize, Serialize};

/// Lightness and saturation used for every marker color
const MARKER_SATURATION: &str = "100%";
const MARKER_LIGHTNESS: &str = "70%";

/// Style applied to one marker for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    /// Marker center X in viewport pixels
    pub x: f64,
    /// Marker center Y in viewport pixels
    pub y: f64,
    /// Uniform scale in (0, 1]
    pub scale: f64,
    /// Opacity in (0.1, 0.9]
    pub opacity: f64,
    /// Hue in degrees, [0, 360)
    pub hue: f64,
}

impl MarkerStyle {
    /// CSS `transform` value
    pub fn css_transform(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) scale({:.3})",
            self.x, self.y, self.scale
        )
    }

    /// CSS `opacity` value
    pub fn css_opacity(&self) -> String {
        format!("{:.3}", self.opacity)
    }

    /// CSS color value
    pub fn css_color(&self) -> String {
        format!(
            "hsl({:.1}, {}, {})",
            self.hue, MARKER_SATURATION, MARKER_LIGHTNESS
        )
    }
}

/// A visual marker owned by one trail point
pub trait Marker {
    /// Apply this frame's position, scale, opacity and hue
    fn apply(&mut self, style: &MarkerStyle);
}

impl<F> Marker for F
where
    F: FnMut(&MarkerStyle),
{
    fn apply(&mut self, style: &MarkerStyle) {
        self(style)
    }
}

/// Headless marker that remembers the last applied style
#[derive(Debug, Clone, Default)]
pub struct StyleMarker {
    pub index: usize,
    pub last: Option<MarkerStyle>,
    pub updates: u64,
}

impl StyleMarker {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }
}

impl Marker for StyleMarker {
    fn apply(&mut self, style: &MarkerStyle) {
        self.last = Some(*style);
        self.updates += 1;
    }
}
