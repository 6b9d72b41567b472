/// Core value types shared by the vertex and fragment stages.
///
/// Everything here is a plain value recomputed per frame, per vertex, or
/// per fragment. Nothing persists between invocations.

use crate::lighting::environment::Environment;
use crate::math::math3d;

/// 3D vector with f64 precision. Doubles as an RGB colour.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct Vec3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3D {
    pub const ZERO: Vec3D = Vec3D { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Vec3D = Vec3D { x: 1.0, y: 1.0, z: 1.0 };

    #[inline(always)]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3D { x, y, z }
    }

    #[inline(always)]
    pub const fn splat(v: f64) -> Self {
        Vec3D { x: v, y: v, z: v }
    }

    #[inline(always)]
    pub fn from_slice(s: &[f64]) -> Self {
        Vec3D { x: s[0], y: s[1], z: s[2] }
    }
}

/// Direction of the single directional light used by every demo.
pub fn default_light_dir() -> Vec3D {
    math3d::vec3d_normalized(&Vec3D::ONE)
}

/// Per-pixel G-buffer entry written by the preview scanline pass.
#[derive(Clone, Copy, Default, Debug)]
pub struct Fragment {
    /// Did the camera ray hit the surface?
    pub hit: bool,
    /// Surface position (world space, after any vertex displacement)
    pub position: Vec3D,
    /// Interpolated vertex normal
    pub normal: Vec3D,
    /// Per-vertex base colour fed into the lighting combine
    pub base_color: Vec3D,
    /// Camera ray direction, kept for background lookups
    pub ray_dir: Vec3D,
}

/// Geometric inputs to one fragment evaluation.
#[derive(Clone, Copy)]
pub struct ShadingInputs<'a> {
    /// Surface normal (normalized before use)
    pub normal: Vec3D,
    /// Direction from the surface toward the camera (normalized before use)
    pub view_dir: Vec3D,
    /// Surface position
    pub position: Vec3D,
    /// Direction toward the light
    pub light_dir: Vec3D,
    /// Reflected-radiance lookup standing in for the cube map
    pub environment: &'a dyn Environment,
}

impl<'a> ShadingInputs<'a> {
    /// Inputs for a surface point seen from `camera`, lit by the default light.
    pub fn from_camera(
        position: Vec3D,
        normal: Vec3D,
        camera: &Vec3D,
        environment: &'a dyn Environment,
    ) -> Self {
        Self {
            normal,
            view_dir: math3d::vec3d_normalized(&math3d::vec3d_sub(camera, &position)),
            position,
            light_dir: default_light_dir(),
            environment,
        }
    }
}
