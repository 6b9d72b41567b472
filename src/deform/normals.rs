/// Face normals rebuilt from position derivatives.
///
/// After displacement the mesh normals no longer describe the surface, so
/// the fragment stage takes the cross product of the screen-space partial
/// derivatives of the displaced position instead (flat shading per
/// primitive, the `cross(dFdx(p), dFdy(p))` trick).

use crate::engine::types::Vec3D;
use crate::math::math3d;

/// Normal of the surface spanned by `dpdx` (rightward) and `dpdy` (upward).
#[inline]
pub fn face_normal(dpdx: &Vec3D, dpdy: &Vec3D) -> Vec3D {
    math3d::vec3d_normalized(&math3d::vec3d_cross(dpdx, dpdy))
}

/// Forward/backward difference along one screen axis.
///
/// `next` is the neighbour one pixel further along the axis, `prev` the one
/// before. Prefers the forward difference like GPU derivative hardware and
/// falls back to the backward one at the silhouette.
pub fn screen_derivative(center: &Vec3D, next: Option<&Vec3D>, prev: Option<&Vec3D>) -> Vec3D {
    match (next, prev) {
        (Some(n), _) => math3d::vec3d_sub(n, center),
        (None, Some(p)) => math3d::vec3d_sub(center, p),
        (None, None) => Vec3D::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_normal_of_screen_aligned_quad_faces_camera() {
        let n = face_normal(&Vec3D::new(0.1, 0.0, 0.0), &Vec3D::new(0.0, 0.1, 0.0));
        assert!((n.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_face_normal_of_tilted_plane() {
        // Plane z = y: moving up the screen also moves toward the camera.
        let n = face_normal(&Vec3D::new(1.0, 0.0, 0.0), &Vec3D::new(0.0, 1.0, 1.0));
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert!(n.x.abs() < 1e-12);
        assert!((n.y + s).abs() < 1e-12);
        assert!((n.z - s).abs() < 1e-12);
    }

    #[test]
    fn test_screen_derivative_fallbacks() {
        let c = Vec3D::new(1.0, 1.0, 1.0);
        let n = Vec3D::new(1.5, 1.0, 1.0);
        let p = Vec3D::new(0.75, 1.0, 1.0);
        assert_eq!(screen_derivative(&c, Some(&n), Some(&p)).x, 0.5);
        assert_eq!(screen_derivative(&c, None, Some(&p)).x, 0.25);
        assert_eq!(screen_derivative(&c, None, None), Vec3D::ZERO);
    }
}
