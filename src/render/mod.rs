//! Marker rendering seam between the animator and the page

pub mod marker;

pub use marker::{Marker, MarkerStyle, StyleMarker};
