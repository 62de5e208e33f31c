//! Pointer-driven tilt of the interface and counter-motion of the backdrop.

pub mod defaults {
    pub const MAX_TILT_DEG: f64 = 10.0;
    pub const LAYER_DEPTH_PX: f64 = 30.0;
}

use defaults::*;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParallaxPose {
    /// Rotation about the horizontal axis, driven by vertical pointer motion.
    pub tilt_x: f64,
    pub tilt_y: f64,
    /// Background layer offset in px, opposite to the pointer.
    pub shift_x: f64,
    pub shift_y: f64,
}

impl ParallaxPose {
    /// Pose for a pointer at (`x`, `y`) inside a `width` x `height` viewport.
    ///
    /// A degenerate viewport gives the neutral pose.
    pub fn from_pointer(x: f64, y: f64, width: f64, height: f64) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::default();
        }

        // -1 at the left/top edge, 1 at the right/bottom
        let x_pct = (x / width - 0.5) * 2.0;
        let y_pct = (y / height - 0.5) * 2.0;

        Self {
            tilt_x: -y_pct * MAX_TILT_DEG,
            tilt_y: x_pct * MAX_TILT_DEG,
            shift_x: -x_pct * LAYER_DEPTH_PX,
            shift_y: -y_pct * LAYER_DEPTH_PX,
        }
    }

    pub fn interface_transform(&self) -> String {
        format!("rotateX({}deg) rotateY({}deg)", self.tilt_x, self.tilt_y)
    }

    pub fn layer_transform(&self) -> String {
        format!("translate({}px, {}px)", self.shift_x, self.shift_y)
    }
}
