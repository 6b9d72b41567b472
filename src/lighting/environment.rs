/// Environment lookups for image-based specular and the scene background.
///
/// The demos sample a cube map along the reflected view ray. Here that
/// lookup is a trait so the core can run against a procedural sky, a flat
/// colour, a closure, or a callback supplied by the host page.

use std::cell::Cell;

use wasm_bindgen::JsValue;

use crate::engine::types::Vec3D;
use crate::error::{Error, Result};
use crate::math::utils;

/// Maps a unit direction to reflected radiance (linear RGB).
pub trait Environment {
    fn sample(&self, direction: &Vec3D) -> Vec3D;
}

impl<F> Environment for F
where
    F: Fn(&Vec3D) -> Vec3D,
{
    #[inline]
    fn sample(&self, direction: &Vec3D) -> Vec3D {
        self(direction)
    }
}

/// Same colour in every direction.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformEnvironment(pub Vec3D);

impl Environment for UniformEnvironment {
    #[inline]
    fn sample(&self, _direction: &Vec3D) -> Vec3D {
        self.0
    }
}

/// A single colour stop in the sky gradient.
#[derive(Clone, Copy, Debug)]
pub struct ColorStop {
    /// Position in [0, 1]: 0 straight down, 1 straight up
    pub position: f64,
    pub color: Vec3D,
}

/// Vertical sky gradient indexed by the direction's elevation.
#[derive(Clone, Debug)]
pub struct SkyGradient {
    pub stops: Vec<ColorStop>,
}

impl Default for SkyGradient {
    fn default() -> Self {
        // Cold sunset: dusky ground, warm horizon band, deep blue zenith
        Self {
            stops: vec![
                ColorStop { position: 0.0, color: Vec3D::new(0.05, 0.05, 0.08) },
                ColorStop { position: 0.45, color: Vec3D::new(0.25, 0.22, 0.30) },
                ColorStop { position: 0.5, color: Vec3D::new(0.85, 0.55, 0.40) },
                ColorStop { position: 0.6, color: Vec3D::new(0.45, 0.50, 0.70) },
                ColorStop { position: 1.0, color: Vec3D::new(0.10, 0.20, 0.45) },
            ],
        }
    }
}

impl SkyGradient {
    /// Create from a flat f64 array: [pos, r, g, b, pos, r, g, b, ...]
    pub fn from_flat(data: &[f64]) -> Self {
        let stops: Vec<ColorStop> = data
            .chunks_exact(4)
            .map(|c| ColorStop { position: c[0], color: Vec3D::new(c[1], c[2], c[3]) })
            .collect();
        if stops.is_empty() {
            return Self::default();
        }
        Self { stops }
    }

    /// Sample at gradient position t (clamped to [0,1]).
    pub fn sample_at(&self, t: f64) -> Vec3D {
        let t = utils::saturate(t);

        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Vec3D::ZERO,
        };
        if t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (s0, s1) = (&pair[0], &pair[1]);
            if t >= s0.position && t <= s1.position {
                let range = s1.position - s0.position;
                let frac = if range > 1e-10 { (t - s0.position) / range } else { 0.0 };
                return Vec3D::new(
                    utils::lerp(s0.color.x, s1.color.x, frac),
                    utils::lerp(s0.color.y, s1.color.y, frac),
                    utils::lerp(s0.color.z, s1.color.z, frac),
                );
            }
        }

        last.color
    }
}

impl Environment for SkyGradient {
    fn sample(&self, direction: &Vec3D) -> Vec3D {
        self.sample_at(utils::remap(direction.y, -1.0, 1.0, 0.0, 1.0))
    }
}

/// Environment backed by a JS callback `(x, y, z) => [r, g, b]`.
///
/// Failed calls sample black. Only the first failure is logged.
pub struct JsEnvironment {
    callback: js_sys::Function,
    failures: Cell<u32>,
}

impl JsEnvironment {
    pub fn new(callback: js_sys::Function) -> Self {
        Self { callback, failures: Cell::new(0) }
    }

    /// Number of samples that fell back to black.
    pub fn failures(&self) -> u32 {
        self.failures.get()
    }

    fn try_sample(&self, d: &Vec3D) -> Result<Vec3D> {
        let out = self
            .callback
            .call3(&JsValue::NULL, &d.x.into(), &d.y.into(), &d.z.into())
            .map_err(|e| Error::EnvironmentSample(format!("{e:?}")))?;
        let rgb: [f64; 3] = serde_wasm_bindgen::from_value(out)
            .map_err(|e| Error::EnvironmentSample(e.to_string()))?;
        Ok(Vec3D::new(rgb[0], rgb[1], rgb[2]))
    }
}

impl Environment for JsEnvironment {
    fn sample(&self, direction: &Vec3D) -> Vec3D {
        self.try_sample(direction).unwrap_or_else(|e| {
            let failures = self.failures.get();
            if failures == 0 {
                tracing::warn!(error = %e, "environment callback failed, sampling black");
            }
            self.failures.set(failures.saturating_add(1));
            Vec3D::ZERO
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        let sky = SkyGradient::default();
        let down = sky.sample(&Vec3D::new(0.0, -1.0, 0.0));
        assert!((down.z - 0.08).abs() < 1e-12);
        let up = sky.sample(&Vec3D::new(0.0, 1.0, 0.0));
        assert!((up.z - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_gradient_interpolates_between_stops() {
        let sky = SkyGradient::from_flat(&[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.5, 0.0]);
        let mid = sky.sample_at(0.5);
        assert!((mid.x - 0.5).abs() < 1e-12);
        assert!((mid.y - 0.25).abs() < 1e-12);
        assert_eq!(mid.z, 0.0);
    }

    #[test]
    fn test_from_flat_falls_back_to_default() {
        let sky = SkyGradient::from_flat(&[0.5, 1.0]);
        assert_eq!(sky.stops.len(), SkyGradient::default().stops.len());
    }

    #[test]
    fn test_closures_are_environments() {
        let env = |d: &Vec3D| Vec3D::new(d.x.abs(), 0.0, 0.0);
        let c = env.sample(&Vec3D::new(-0.5, 0.0, 0.0));
        assert_eq!(c.x, 0.5);
        let flat = UniformEnvironment(Vec3D::splat(0.2));
        assert_eq!(flat.sample(&Vec3D::new(0.0, 1.0, 0.0)).y, 0.2);
    }
}
