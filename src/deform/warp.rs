/// Vertical-sine warp: ridges running around the sphere that travel
/// with time, pushing vertices out along their normals.

use crate::engine::types::Vec3D;
use crate::math::{math3d, utils};

/// Ridge frequency along local y.
pub const SPATIAL_FREQUENCY: f64 = 20.0;
/// Ridge travel speed.
pub const TEMPORAL_FREQUENCY: f64 = 10.0;
/// Largest outward push along the normal.
pub const MAX_OFFSET: f64 = 0.2;

/// Trough colour.
pub const DARK_BLUE: Vec3D = Vec3D::new(0.0, 0.0, 0.5);
/// Crest colour.
pub const LIGHT_BLUE: Vec3D = Vec3D::new(0.1, 0.5, 0.8);

/// Output of the warp vertex stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarpedVertex {
    /// Displaced local-space position
    pub position: Vec3D,
    /// Base colour for the lighting combine
    pub color: Vec3D,
    /// Distance moved along the normal, in [0, MAX_OFFSET]
    pub offset: f64,
}

/// Offset along the normal for a vertex at height `local_y`.
#[inline]
pub fn warp_offset(local_y: f64, time: f64) -> f64 {
    let t = (local_y * SPATIAL_FREQUENCY + time * TEMPORAL_FREQUENCY).sin();
    utils::remap(t, -1.0, 1.0, 0.0, MAX_OFFSET)
}

/// Colour ramp from trough to crest.
#[inline]
pub fn warp_color(offset: f64) -> Vec3D {
    math3d::vec3d_mix(&DARK_BLUE, &LIGHT_BLUE, utils::smoothstep(0.0, MAX_OFFSET, offset))
}

/// Displace one vertex along its normal.
pub fn displace(local_position: &Vec3D, normal: &Vec3D, time: f64) -> WarpedVertex {
    let offset = warp_offset(local_position.y, time);
    WarpedVertex {
        position: math3d::vec3d_add(local_position, &math3d::vec3d_scale(normal, offset)),
        color: warp_color(offset),
        offset,
    }
}
