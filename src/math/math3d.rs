/// 3D vector math for the shading formulas.
///
/// Free functions over `Vec3D`, mirroring the GLSL built-ins the demo
/// shaders rely on (`dot`, `cross`, `normalize`, `reflect`, `mix`, `pow`).
/// Colours travel through the same type, one channel per component.

use crate::engine::types::Vec3D;

// ─── Vector operations ───────────────────────────────────────

#[inline(always)]
pub fn vec3d_add(a: &Vec3D, b: &Vec3D) -> Vec3D {
    Vec3D {
        x: a.x + b.x,
        y: a.y + b.y,
        z: a.z + b.z,
    }
}

#[inline(always)]
pub fn vec3d_sub(a: &Vec3D, b: &Vec3D) -> Vec3D {
    Vec3D {
        x: a.x - b.x,
        y: a.y - b.y,
        z: a.z - b.z,
    }
}

#[inline(always)]
pub fn vec3d_scale(v: &Vec3D, s: f64) -> Vec3D {
    Vec3D {
        x: v.x * s,
        y: v.y * s,
        z: v.z * s,
    }
}

/// Component-wise product (colour modulation).
#[inline(always)]
pub fn vec3d_mul(a: &Vec3D, b: &Vec3D) -> Vec3D {
    Vec3D {
        x: a.x * b.x,
        y: a.y * b.y,
        z: a.z * b.z,
    }
}

#[inline(always)]
pub fn vec3d_dot(a: &Vec3D, b: &Vec3D) -> f64 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

#[inline(always)]
pub fn vec3d_cross(a: &Vec3D, b: &Vec3D) -> Vec3D {
    Vec3D {
        x: a.y * b.z - a.z * b.y,
        y: a.z * b.x - a.x * b.z,
        z: a.x * b.y - a.y * b.x,
    }
}

#[inline(always)]
pub fn vec3d_length(v: &Vec3D) -> f64 {
    (v.x * v.x + v.y * v.y + v.z * v.z).sqrt()
}

#[inline(always)]
pub fn vec3d_normalize(v: &mut Vec3D) {
    let len = vec3d_length(v);
    if len > 1e-30 {
        let inv = 1.0 / len;
        v.x *= inv;
        v.y *= inv;
        v.z *= inv;
    }
}

#[inline(always)]
pub fn vec3d_normalized(v: &Vec3D) -> Vec3D {
    let mut result = *v;
    vec3d_normalize(&mut result);
    result
}

#[inline(always)]
pub fn vec3d_negate(v: &Vec3D) -> Vec3D {
    Vec3D { x: -v.x, y: -v.y, z: -v.z }
}

/// Reflect incident vector `i` about normal `n` (GLSL `reflect`).
///
/// `n` must be unit length.
#[inline]
pub fn vec3d_reflect(i: &Vec3D, n: &Vec3D) -> Vec3D {
    let d = 2.0 * vec3d_dot(n, i);
    vec3d_sub(i, &vec3d_scale(n, d))
}

/// Per-component linear interpolation (GLSL `mix` on vec3).
#[inline]
pub fn vec3d_mix(a: &Vec3D, b: &Vec3D, t: f64) -> Vec3D {
    Vec3D {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
        z: a.z + (b.z - a.z) * t,
    }
}

/// Per-component power (GLSL `pow(vec3, vec3(e))`).
#[inline]
pub fn vec3d_powf(v: &Vec3D, e: f64) -> Vec3D {
    Vec3D {
        x: v.x.powf(e),
        y: v.y.powf(e),
        z: v.z.powf(e),
    }
}

/// Apply `f` to each component.
#[inline]
pub fn vec3d_map(v: &Vec3D, f: impl Fn(f64) -> f64) -> Vec3D {
    Vec3D { x: f(v.x), y: f(v.y), z: f(v.z) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3d_normalize() {
        let mut v = Vec3D { x: 3.0, y: 0.0, z: 4.0 };
        vec3d_normalize(&mut v);
        assert!((v.x - 0.6).abs() < 1e-10);
        assert!((v.y - 0.0).abs() < 1e-10);
        assert!((v.z - 0.8).abs() < 1e-10);
    }

    #[test]
    fn test_vec3d_normalize_zero_is_untouched() {
        let v = vec3d_normalized(&Vec3D::ZERO);
        assert_eq!(v.x, 0.0);
        assert_eq!(v.y, 0.0);
        assert_eq!(v.z, 0.0);
    }

    #[test]
    fn test_vec3d_cross() {
        let a = Vec3D { x: 1.0, y: 0.0, z: 0.0 };
        let b = Vec3D { x: 0.0, y: 1.0, z: 0.0 };
        let c = vec3d_cross(&a, &b);
        assert!((c.x - 0.0).abs() < 1e-10);
        assert!((c.y - 0.0).abs() < 1e-10);
        assert!((c.z - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_vec3d_reflect() {
        // A ray heading down onto a floor bounces straight back up.
        let i = Vec3D::new(1.0, -1.0, 0.0);
        let n = Vec3D::new(0.0, 1.0, 0.0);
        let r = vec3d_reflect(&i, &n);
        assert!((r.x - 1.0).abs() < 1e-12);
        assert!((r.y - 1.0).abs() < 1e-12);
        assert!(r.z.abs() < 1e-12);
    }

    #[test]
    fn test_vec3d_mix() {
        let a = Vec3D::new(0.0, 0.3, 0.6);
        let b = Vec3D::new(0.6, 0.3, 0.1);
        let m = vec3d_mix(&a, &b, 0.5);
        assert!((m.x - 0.3).abs() < 1e-12);
        assert!((m.y - 0.3).abs() < 1e-12);
        assert!((m.z - 0.35).abs() < 1e-12);
    }
}
