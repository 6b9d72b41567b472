/// Paint pass: turns the preview G-buffer into display pixels.
///
/// Hit pixels go through the layered lighting model; misses show the
/// environment along the camera ray, the way the demos use the cube map
/// as scene background. Also hosts the flat-buffer decoders for lighting
/// parameters and the batch fragment shader used by the host page.

use crate::deform::normals;
use crate::engine::types::{Fragment, ShadingInputs, Vec3D};
use crate::error::{Error, Result};
use crate::lighting::environment::Environment;
use crate::lighting::model::{self, ColorEncoding, LightingParameters};
use crate::math::{math3d, utils};

/// Number of values in a flat lighting buffer.
pub const LIGHTING_PARAMS_LEN: usize = 20;

/// Values per fragment in a batch shading buffer:
/// [normal xyz, view_dir xyz, base_color rgb].
pub const FRAGMENT_STRIDE: usize = 9;

/// Everything the paint pass needs besides the G-buffer.
#[derive(Clone, Debug)]
pub struct PaintConfig {
    pub lighting: LightingParameters,
    pub encoding: ColorEncoding,
    pub camera_pos: Vec3D,
    /// Rebuild normals from neighbouring positions instead of using the
    /// interpolated vertex normal
    pub face_normals: bool,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            lighting: LightingParameters::default(),
            encoding: ColorEncoding::default(),
            camera_pos: Vec3D::new(0.0, 0.0, 5.0),
            face_normals: false,
        }
    }
}

/// Paint the complete G-buffer into RGBA output.
pub fn paint_gbuffer(
    gbuffer: &[Fragment],
    rgba_out: &mut [u8],
    width: u32,
    height: u32,
    config: &PaintConfig,
    environment: &dyn Environment,
) {
    let total = (width as usize).saturating_mul(height as usize).min(gbuffer.len());

    for i in 0..total {
        let ri = i * 4;
        if ri + 3 >= rgba_out.len() {
            break;
        }

        let fragment = &gbuffer[i];
        let color = if fragment.hit {
            let normal = if config.face_normals {
                derivative_normal(gbuffer, width, height, i).unwrap_or(fragment.normal)
            } else {
                fragment.normal
            };
            let inputs = ShadingInputs::from_camera(
                fragment.position,
                normal,
                &config.camera_pos,
                environment,
            );
            model::shade(&inputs, &config.lighting, &fragment.base_color, config.encoding)
        } else {
            environment.sample(&fragment.ray_dir)
        };

        rgba_out[ri] = utils::float_to_byte(color.x);
        rgba_out[ri + 1] = utils::float_to_byte(color.y);
        rgba_out[ri + 2] = utils::float_to_byte(color.z);
        rgba_out[ri + 3] = 255;
    }
}

/// Normal from screen-space position differences around pixel `i`,
/// turned to face the camera ray the way front-face rasterization keeps it.
///
/// `None` when the pixel has no covered neighbours to difference against.
fn derivative_normal(gbuffer: &[Fragment], width: u32, height: u32, i: usize) -> Option<Vec3D> {
    let w = width as usize;
    let (x, y) = (i % w, i / w);
    let covered = |j: usize| gbuffer.get(j).filter(|f| f.hit).map(|f| &f.position);

    let center = &gbuffer[i].position;
    let right = if x + 1 < w { covered(i + 1) } else { None };
    let left = if x > 0 { covered(i - 1) } else { None };
    // Screen y grows downward; the derivative is taken upward.
    let up = if y > 0 { covered(i - w) } else { None };
    let down = if y + 1 < height as usize { covered(i + w) } else { None };

    let dpdx = normals::screen_derivative(center, right, left);
    let dpdy = normals::screen_derivative(center, up, down);
    let n = normals::face_normal(&dpdx, &dpdy);
    if math3d::vec3d_length(&n) <= 0.5 {
        return None;
    }
    // Folded differences on the displaced surface flip the cross product.
    if math3d::vec3d_dot(&n, &gbuffer[i].ray_dir) > 0.0 {
        return Some(math3d::vec3d_negate(&n));
    }
    Some(n)
}

/// Build LightingParameters from a flat f64 buffer.
///
/// Layout: [ambient rgb, ambient_factor, sky rgb, ground rgb, hemi_factor,
///          diffuse rgb, diffuse_factor, phong_shininess, phong_factor,
///          ibl_factor, fresnel_factor, fresnel_intensity]
/// Colours are already normalized to [0, 1].
pub fn lighting_from_buffer(data: &[f64]) -> Result<LightingParameters> {
    if data.len() < LIGHTING_PARAMS_LEN {
        return Err(Error::BufferTooShort {
            what: "lighting",
            expected: LIGHTING_PARAMS_LEN,
            actual: data.len(),
        });
    }

    let rgb = |at: usize| [data[at], data[at + 1], data[at + 2]];
    Ok(LightingParameters::dark()
        .with_ambient(rgb(0), data[3])
        .with_hemi(rgb(4), rgb(7), data[10])
        .with_diffuse(rgb(11), data[14])
        .with_phong(data[15], data[16])
        .with_ibl(data[17])
        .with_fresnel(data[18], data[19]))
}

/// Shade a batch of fragments into `out_rgb` (3 values per fragment).
///
/// Returns the number of fragments shaded.
pub fn shade_fragments(
    fragments: &[f64],
    params: &LightingParameters,
    environment: &dyn Environment,
    encoding: ColorEncoding,
    out_rgb: &mut [f32],
) -> usize {
    let mut shaded = 0;
    for (frag, out) in fragments
        .chunks_exact(FRAGMENT_STRIDE)
        .zip(out_rgb.chunks_exact_mut(3))
    {
        let inputs = ShadingInputs {
            normal: Vec3D::from_slice(&frag[0..3]),
            view_dir: Vec3D::from_slice(&frag[3..6]),
            position: Vec3D::ZERO,
            light_dir: crate::engine::types::default_light_dir(),
            environment,
        };
        let c = model::shade(&inputs, params, &Vec3D::from_slice(&frag[6..9]), encoding);
        out[0] = c.x as f32;
        out[1] = c.y as f32;
        out[2] = c.z as f32;
        shaded += 1;
    }
    shaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::preview::{render_scanlines, PreviewParams};
    use crate::lighting::environment::UniformEnvironment;
    use crate::scene::{FrameUniforms, SceneKind, UiState};

    #[test]
    fn test_lighting_from_buffer() {
        let mut data = vec![0.0; LIGHTING_PARAMS_LEN];
        data[0..4].copy_from_slice(&[0.5, 0.5, 0.5, 0.25]);
        data[10] = 0.5;
        data[15] = 32.0;
        data[19] = 2.0;
        let p = lighting_from_buffer(&data).unwrap();
        assert_eq!(p.ambient_color, [0.5; 3]);
        assert_eq!(p.ambient_factor, 0.25);
        assert_eq!(p.hemi_factor, 0.5);
        assert_eq!(p.phong_shininess, 32.0);
        assert_eq!(p.fresnel_intensity, 2.0);
    }

    #[test]
    fn test_lighting_from_short_buffer() {
        let err = lighting_from_buffer(&[0.0; 5]).unwrap_err();
        assert_eq!(
            err,
            Error::BufferTooShort { what: "lighting", expected: LIGHTING_PARAMS_LEN, actual: 5 }
        );
    }

    #[test]
    fn test_shade_fragments_ambient_only() {
        let params = LightingParameters::dark().with_ambient([1.0; 3], 1.0);
        let env = UniformEnvironment(Vec3D::ONE);
        let frags = [
            0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.5, 0.5, 0.5,
            0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.25,
        ];
        let mut out = [0.0f32; 6];
        let n = shade_fragments(&frags, &params, &env, ColorEncoding::Linear, &mut out);
        assert_eq!(n, 2);
        assert!((out[0] - 0.5).abs() < 1e-6);
        assert!((out[3] - 1.0).abs() < 1e-6);
        assert!((out[5] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_paint_background_and_hit() {
        let env = UniformEnvironment(Vec3D::new(0.0, 0.0, 1.0));
        let gbuffer = [
            Fragment { ray_dir: Vec3D::new(0.0, 0.0, -1.0), ..Default::default() },
            Fragment {
                hit: true,
                position: Vec3D::new(0.0, 0.0, 1.0),
                normal: Vec3D::new(0.0, 0.0, 1.0),
                base_color: Vec3D::splat(0.5),
                ray_dir: Vec3D::new(0.0, 0.0, -1.0),
            },
        ];
        let config = PaintConfig {
            lighting: LightingParameters::dark().with_ambient([1.0; 3], 1.0),
            ..Default::default()
        };
        let mut rgba = [0u8; 8];
        paint_gbuffer(&gbuffer, &mut rgba, 2, 1, &config, &env);
        assert_eq!(&rgba[0..4], &[0, 0, 255, 255]);
        // 0.5 ^ (1 / 2.2) = 0.7297 -> 186
        assert_eq!(&rgba[4..8], &[186, 186, 186, 255]);
    }

    #[test]
    fn test_derivative_normal_of_tilted_plane() {
        // 3x3 patch of the plane z = y (rows go downward, so y decreases).
        let mut gbuffer = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                let y = 1.0 - row as f64;
                gbuffer.push(Fragment {
                    hit: true,
                    position: Vec3D::new(col as f64, y, y),
                    ..Default::default()
                });
            }
        }
        let n = derivative_normal(&gbuffer, 3, 3, 4).unwrap();
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert!(n.x.abs() < 1e-12);
        assert!((n.y + s).abs() < 1e-12);
        assert!((n.z - s).abs() < 1e-12);

        // Corner pixels fall back to backward differences.
        let corner = derivative_normal(&gbuffer, 3, 3, 8).unwrap();
        assert!((corner.z - s).abs() < 1e-12);
    }

    #[test]
    fn test_derivative_normal_faces_the_ray() {
        // Same plane, but seen along +z so the raw cross product faces away.
        let mut gbuffer = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                let y = 1.0 - row as f64;
                gbuffer.push(Fragment {
                    hit: true,
                    position: Vec3D::new(col as f64, y, y),
                    ray_dir: Vec3D::new(0.0, 0.0, 1.0),
                    ..Default::default()
                });
            }
        }
        let n = derivative_normal(&gbuffer, 3, 3, 4).unwrap();
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert!((n.y - s).abs() < 1e-12);
        assert!((n.z + s).abs() < 1e-12);
    }

    #[test]
    fn test_warped_preview_flat_normals_face_camera() {
        let scene = SceneKind::WarpedSphere;
        let uniforms = FrameUniforms::build(scene, 0.3, &UiState::default());
        let params = PreviewParams { width: 64, height: 64, ..Default::default() };
        let mut gbuffer = vec![Fragment::default(); params.pixel_count()];
        render_scanlines(scene, &uniforms, &params, &mut gbuffer, 0, 1);

        let mut checked = 0;
        for (i, f) in gbuffer.iter().enumerate().filter(|(_, f)| f.hit) {
            if let Some(n) = derivative_normal(&gbuffer, params.width, params.height, i) {
                assert!(math3d::vec3d_dot(&n, &f.ray_dir) <= 0.0, "pixel {i} faces away");
                checked += 1;
            }
        }
        assert!(checked > 100);
    }

    #[test]
    fn test_derivative_normal_needs_neighbours() {
        let gbuffer = [Fragment { hit: true, ..Default::default() }];
        assert!(derivative_normal(&gbuffer, 1, 1, 0).is_none());
    }
}
