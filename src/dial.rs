//! Clock-face geometry: second hand, decorative rings and the sweep arc.
//!
//! All angles are in degrees, clockwise from 12 o'clock, in the 400x400 SVG
//! viewBox the face is drawn in.

use std::f64::consts::PI;

use crate::Millis;

pub mod defaults {
    /// Center of the face in SVG user units.
    pub const CENTER_X: f64 = 200.0;
    pub const CENTER_Y: f64 = 200.0;
    pub const ARC_RADIUS: f64 = 195.0;
    /// One full turn of the hand per minute.
    pub const HAND_DEG_PER_SEC: f64 = 6.0;
    pub const OUTER_RING_DEG_PER_SEC: f64 = 10.0;
    pub const INNER_RING_DEG_PER_SEC: f64 = -5.0;
}

use defaults::*;

/// Everything the clock face needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialPose {
    pub total_seconds: f64,
    /// Second hand angle, in `[0, 360)`.
    pub hand_degrees: f64,
    pub outer_ring_degrees: f64,
    pub inner_ring_degrees: f64,
}

impl DialPose {
    pub fn from_elapsed(ms: Millis) -> Self {
        let total_seconds = ms / 1000.0;
        Self {
            total_seconds,
            hand_degrees: (total_seconds % 60.0) * HAND_DEG_PER_SEC,
            outer_ring_degrees: total_seconds * OUTER_RING_DEG_PER_SEC,
            inner_ring_degrees: total_seconds * INNER_RING_DEG_PER_SEC,
        }
    }

    pub fn hand_transform(&self) -> String {
        rotate(self.hand_degrees)
    }

    pub fn outer_ring_transform(&self) -> String {
        rotate(self.outer_ring_degrees)
    }

    pub fn inner_ring_transform(&self) -> String {
        rotate(self.inner_ring_degrees)
    }

    pub fn arc_path(&self) -> String {
        arc_path(self.hand_degrees)
    }
}

/// SVG `rotate` about the face center.
pub fn rotate(degrees: f64) -> String {
    format!("rotate({}, {}, {})", degrees, CENTER_X, CENTER_Y)
}

/// Path data for the arc swept from 12 o'clock to `degrees`.
///
/// Empty at zero and below. That includes every exact minute boundary, where
/// the hand wraps and the arc blanks for that frame.
pub fn arc_path(degrees: f64) -> String {
    if degrees <= 0.0 {
        return String::new();
    }

    let start_x = CENTER_X;
    let start_y = CENTER_Y - ARC_RADIUS;

    // SVG angle zero is 3 o'clock
    let rad = (degrees - 90.0) * (PI / 180.0);
    let end_x = CENTER_X + ARC_RADIUS * rad.cos();
    let end_y = CENTER_Y + ARC_RADIUS * rad.sin();
    let large_arc = if degrees > 180.0 { 1 } else { 0 };

    format!(
        "M {} {} A {} {} 0 {} 1 {} {}",
        start_x, start_y, ARC_RADIUS, ARC_RADIUS, large_arc, end_x, end_y
    )
}
