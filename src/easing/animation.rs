/// Growth animation driven by a bounce curve.
///
/// The mesh sits at scale 0 for the first second, grows over the next
/// second along the selected curve, then holds at full size.

use super::EasingVariant;
use crate::engine::types::Vec3D;
use crate::math::{math3d, utils};

/// Seconds before the growth starts.
pub const START_OFFSET: f64 = 1.0;

/// Elapsed time plus the selected curve.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BounceAnimation {
    /// Seconds since the clock was last reset
    pub elapsed: f64,
    pub variant: EasingVariant,
}

impl BounceAnimation {
    pub fn new(variant: EasingVariant, elapsed: f64) -> Self {
        Self { elapsed, variant }
    }

    /// Normalized progress, clamped to [0, 1].
    #[inline]
    pub fn progress(&self) -> f64 {
        utils::saturate(self.elapsed - START_OFFSET)
    }

    /// Uniform scale applied to local-space vertex positions.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.variant.apply(self.progress())
    }

    /// Vertex-stage transform: scale a local-space position.
    #[inline]
    pub fn apply(&self, local_position: &Vec3D) -> Vec3D {
        math3d::vec3d_scale(local_position, self.scale())
    }
}
