/// Layered lighting model shared by all three demos.
///
/// ambient + hemisphere + Lambert diffuse, modulated by the base colour,
/// plus a Phong and image-based specular pair weighted together by a
/// Fresnel term. The result is gamma encoded for display.

use serde::{Deserialize, Serialize};

use crate::engine::types::{ShadingInputs, Vec3D};
use crate::math::{math3d, utils};

/// Final display encoding of the linear colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorEncoding {
    /// `pow(c, 1/2.2)` per channel
    #[default]
    Gamma22,
    /// Exact piecewise sRGB transfer
    Srgb,
    /// No encoding
    Linear,
}

impl ColorEncoding {
    #[inline]
    pub fn encode(&self, color: &Vec3D) -> Vec3D {
        match self {
            ColorEncoding::Gamma22 => math3d::vec3d_powf(color, 1.0 / 2.2),
            ColorEncoding::Srgb => math3d::vec3d_map(color, linear_to_srgb),
            ColorEncoding::Linear => *color,
        }
    }
}

/// Piecewise linear-to-sRGB transfer for one channel.
#[inline]
pub fn linear_to_srgb(value: f64) -> f64 {
    if value < 0.0031308 {
        return value * 12.92;
    }
    value.powf(0.41666) * 1.055 - 0.055
}

/// Every tunable of the lighting model. Colours are normalized to [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LightingParameters {
    pub ambient_color: Vec3Repr,
    pub ambient_factor: f64,
    pub hemi_sky_color: Vec3Repr,
    pub hemi_ground_color: Vec3Repr,
    pub hemi_factor: f64,
    pub diffuse_color: Vec3Repr,
    pub diffuse_factor: f64,
    pub phong_shininess: f64,
    pub phong_factor: f64,
    pub ibl_factor: f64,
    pub fresnel_factor: f64,
    pub fresnel_intensity: f64,
}

/// Colour as it crosses the JS boundary: a plain `[r, g, b]` array.
pub type Vec3Repr = [f64; 3];

impl Default for LightingParameters {
    /// Panel defaults of the lighting and easing scenes.
    fn default() -> Self {
        Self {
            ambient_color: [128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0],
            ambient_factor: 0.0,
            hemi_sky_color: [0.0, 77.0 / 255.0, 153.0 / 255.0],
            hemi_ground_color: [153.0 / 255.0, 77.0 / 255.0, 26.0 / 255.0],
            hemi_factor: 0.5,
            diffuse_color: [1.0, 1.0, 230.0 / 255.0],
            diffuse_factor: 0.5,
            phong_shininess: 32.0,
            phong_factor: 1.0,
            ibl_factor: 1.0,
            fresnel_factor: 1.0,
            fresnel_intensity: 2.0,
        }
    }
}

impl LightingParameters {
    /// Everything switched off; combine with the `with_*` setters.
    pub fn dark() -> Self {
        Self {
            ambient_color: [0.0; 3],
            ambient_factor: 0.0,
            hemi_sky_color: [0.0; 3],
            hemi_ground_color: [0.0; 3],
            hemi_factor: 0.0,
            diffuse_color: [0.0; 3],
            diffuse_factor: 0.0,
            phong_shininess: 0.0,
            phong_factor: 0.0,
            ibl_factor: 0.0,
            fresnel_factor: 0.0,
            fresnel_intensity: 0.0,
        }
    }

    /// Fixed look of the warped sphere: no ambient, faint hemisphere fill,
    /// full diffuse, subtle Phong and a half-strength reflection.
    pub fn warped_sphere() -> Self {
        Self::dark()
            .with_hemi([0.0, 0.3, 0.6], [0.6, 0.3, 0.1], 0.1)
            .with_diffuse([1.0, 1.0, 0.9], 1.0)
            .with_phong(32.0, 0.15)
            .with_ibl(0.5)
            .with_fresnel(1.0, 2.0)
    }

    pub fn with_ambient(mut self, color: Vec3Repr, factor: f64) -> Self {
        self.ambient_color = color;
        self.ambient_factor = factor;
        self
    }

    pub fn with_hemi(mut self, sky: Vec3Repr, ground: Vec3Repr, factor: f64) -> Self {
        self.hemi_sky_color = sky;
        self.hemi_ground_color = ground;
        self.hemi_factor = factor;
        self
    }

    pub fn with_diffuse(mut self, color: Vec3Repr, factor: f64) -> Self {
        self.diffuse_color = color;
        self.diffuse_factor = factor;
        self
    }

    pub fn with_phong(mut self, shininess: f64, factor: f64) -> Self {
        self.phong_shininess = shininess;
        self.phong_factor = factor;
        self
    }

    pub fn with_ibl(mut self, factor: f64) -> Self {
        self.ibl_factor = factor;
        self
    }

    pub fn with_fresnel(mut self, factor: f64, intensity: f64) -> Self {
        self.fresnel_factor = factor;
        self.fresnel_intensity = intensity;
        self
    }
}

/// Diffuse-side and specular-side contributions before combining.
#[derive(Clone, Copy, Debug, Default)]
pub struct LightingTerms {
    pub ambient: Vec3D,
    pub hemi: Vec3D,
    pub diffuse: Vec3D,
    /// Phong + IBL, already Fresnel weighted
    pub specular: Vec3D,
    pub fresnel: f64,
}

/// Evaluate every lighting term for one fragment.
pub fn lighting_terms(inputs: &ShadingInputs, params: &LightingParameters) -> LightingTerms {
    let normal = math3d::vec3d_normalized(&inputs.normal);
    let view_dir = math3d::vec3d_normalized(&inputs.view_dir);
    let light_dir = math3d::vec3d_normalized(&inputs.light_dir);

    // Ambient
    let ambient = Vec3D::from_slice(&params.ambient_color);

    // Hemisphere
    let hemi_mix = utils::remap(normal.y, -1.0, 1.0, 0.0, 1.0);
    let hemi = math3d::vec3d_mix(
        &Vec3D::from_slice(&params.hemi_sky_color),
        &Vec3D::from_slice(&params.hemi_ground_color),
        hemi_mix,
    );

    // Lambert
    let dp = math3d::vec3d_dot(&light_dir, &normal).max(0.0);
    let diffuse = math3d::vec3d_scale(&Vec3D::from_slice(&params.diffuse_color), dp);

    // Phong
    let r = math3d::vec3d_normalized(&math3d::vec3d_reflect(
        &math3d::vec3d_negate(&light_dir),
        &normal,
    ));
    let phong_value = math3d::vec3d_dot(&view_dir, &r).max(0.0).powf(params.phong_shininess);
    let mut specular = Vec3D::splat(phong_value * params.phong_factor);

    // Image-based specular
    let ibl_coord = math3d::vec3d_normalized(&math3d::vec3d_reflect(
        &math3d::vec3d_negate(&view_dir),
        &normal,
    ));
    let ibl_sample = inputs.environment.sample(&ibl_coord);
    specular = math3d::vec3d_add(&specular, &math3d::vec3d_scale(&ibl_sample, params.ibl_factor));

    // Fresnel scales both specular lobes together
    let fresnel = (1.0 - math3d::vec3d_dot(&view_dir, &normal).max(0.0))
        .max(0.0)
        .powf(params.fresnel_intensity);
    specular = math3d::vec3d_scale(&specular, fresnel * params.fresnel_factor);

    LightingTerms { ambient, hemi, diffuse, specular, fresnel }
}

/// Linear colour: `base * (weighted ambient + hemi + diffuse) + specular`.
pub fn shade_linear(
    inputs: &ShadingInputs,
    params: &LightingParameters,
    base_color: &Vec3D,
) -> Vec3D {
    let terms = lighting_terms(inputs, params);

    let lighting = math3d::vec3d_add(
        &math3d::vec3d_add(
            &math3d::vec3d_scale(&terms.ambient, params.ambient_factor),
            &math3d::vec3d_scale(&terms.hemi, params.hemi_factor),
        ),
        &math3d::vec3d_scale(&terms.diffuse, params.diffuse_factor),
    );

    math3d::vec3d_add(&math3d::vec3d_mul(base_color, &lighting), &terms.specular)
}

/// Display colour: [`shade_linear`] followed by `encoding`.
pub fn shade(
    inputs: &ShadingInputs,
    params: &LightingParameters,
    base_color: &Vec3D,
    encoding: ColorEncoding,
) -> Vec3D {
    encoding.encode(&shade_linear(inputs, params, base_color))
}
