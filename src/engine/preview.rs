/// CPU preview of the demo scenes.
///
/// Pass one: cast a perspective ray per pixel against the scene's sphere,
/// run the scene's vertex stage at the hit point, and store position,
/// normal and base colour in a G-buffer. Rows are interleaved across
/// workers so each web worker can fill its own share of one buffer.
/// Pass two lives in `lighting::paint`.

use crate::deform::warp;
use crate::engine::types::{Fragment, Vec3D};
use crate::math::math3d;
use crate::scene::{FrameUniforms, SceneKind};

/// Base colour of the lighting and easing meshes.
pub const BASE_GREY: Vec3D = Vec3D::splat(0.5);

/// Camera and image settings for the preview.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewParams {
    pub width: u32,
    pub height: u32,
    /// Camera sits on +z looking at the origin
    pub camera_distance: f64,
    /// Vertical field of view
    pub fov_degrees: f64,
    /// Sphere radius before any animation
    pub radius: f64,
    /// Override for derivative-based normals; `None` follows the scene
    pub flat_normals: Option<bool>,
}

impl Default for PreviewParams {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            camera_distance: 5.0,
            fov_degrees: 75.0,
            radius: 1.0,
            flat_normals: None,
        }
    }
}

impl PreviewParams {
    pub fn camera_pos(&self) -> Vec3D {
        Vec3D::new(0.0, 0.0, self.camera_distance)
    }

    pub fn pixel_count(&self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Drop rows until the image fits in `max_pixels`.
    pub fn clamped_to(&self, max_pixels: usize) -> Self {
        let max_rows = max_pixels.checked_div(self.width as usize).unwrap_or(0);
        Self {
            height: self.height.min(u32::try_from(max_rows).unwrap_or(u32::MAX)),
            ..self.clone()
        }
    }

    /// Unit view ray through the centre of pixel (px, py); row 0 is the top.
    pub fn ray_dir(&self, px: u32, py: u32) -> Vec3D {
        let w = self.width.max(1) as f64;
        let h = self.height.max(1) as f64;
        let half = (self.fov_degrees.to_radians() * 0.5).tan();
        let aspect = w / h;
        let sx = ((px as f64 + 0.5) / w * 2.0 - 1.0) * aspect * half;
        let sy = (1.0 - (py as f64 + 0.5) / h * 2.0) * half;
        math3d::vec3d_normalized(&Vec3D::new(sx, sy, -1.0))
    }

    pub fn face_normals_for(&self, scene: SceneKind) -> bool {
        self.flat_normals.unwrap_or_else(|| scene.uses_face_normals())
    }
}

/// Build PreviewParams from a flat buffer.
///
/// Layout: [width, height, camera_distance, fov_degrees, radius, flat_normals]
/// where flat_normals is 0 (off), 1 (on) or negative (scene default).
/// Short buffers keep the defaults for the missing tail.
pub fn params_from_buffer(data: &[f64]) -> PreviewParams {
    let mut params = PreviewParams::default();
    let mut fields = data.iter().copied();

    if let Some(v) = fields.next() {
        params.width = v.max(0.0) as u32;
    }
    if let Some(v) = fields.next() {
        params.height = v.max(0.0) as u32;
    }
    if let Some(v) = fields.next() {
        params.camera_distance = v;
    }
    if let Some(v) = fields.next() {
        params.fov_degrees = v;
    }
    if let Some(v) = fields.next() {
        params.radius = v;
    }
    if let Some(v) = fields.next() {
        params.flat_normals = if v < 0.0 { None } else { Some(v != 0.0) };
    }

    params
}

/// Nearest intersection of a ray with a sphere at the origin.
pub fn intersect_sphere(origin: &Vec3D, dir: &Vec3D, radius: f64) -> Option<f64> {
    if radius <= 1e-9 {
        return None;
    }
    let b = math3d::vec3d_dot(origin, dir);
    let c = math3d::vec3d_dot(origin, origin) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t = if -b - sq > 0.0 { -b - sq } else { -b + sq };
    (t > 0.0).then_some(t)
}

/// Vertex stage of `scene` for the sphere point hit by one camera ray.
pub fn shade_vertex(
    scene: SceneKind,
    uniforms: &FrameUniforms,
    params: &PreviewParams,
    ray_dir: &Vec3D,
) -> Fragment {
    let camera = params.camera_pos();
    let radius = match scene {
        SceneKind::EasingFunctions => params.radius * uniforms.bounce().scale(),
        _ => params.radius,
    };

    let t = match intersect_sphere(&camera, ray_dir, radius) {
        Some(t) => t,
        None => return Fragment { ray_dir: *ray_dir, ..Default::default() },
    };

    let hit = math3d::vec3d_add(&camera, &math3d::vec3d_scale(ray_dir, t));
    let normal = math3d::vec3d_normalized(&hit);

    let (position, base_color) = match scene {
        SceneKind::WarpedSphere => {
            let v = warp::displace(&hit, &normal, uniforms.time);
            (v.position, v.color)
        }
        _ => (hit, BASE_GREY),
    };

    Fragment { hit: true, position, normal, base_color, ray_dir: *ray_dir }
}

/// Fill this worker's rows of the G-buffer. Returns rows rendered.
pub fn render_scanlines(
    scene: SceneKind,
    uniforms: &FrameUniforms,
    params: &PreviewParams,
    gbuffer: &mut [Fragment],
    worker_id: u32,
    worker_count: u32,
) -> u32 {
    let worker_count = worker_count.max(1);
    let mut rows_rendered = 0;
    let mut y = worker_id;

    while y < params.height {
        let row_start = y as usize * params.width as usize;
        if row_start + params.width as usize > gbuffer.len() {
            break;
        }
        for x in 0..params.width {
            let dir = params.ray_dir(x, y);
            gbuffer[row_start + x as usize] = shade_vertex(scene, uniforms, params, &dir);
        }
        rows_rendered += 1;
        y += worker_count;
    }

    rows_rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::UiState;

    fn small() -> PreviewParams {
        PreviewParams { width: 32, height: 24, ..Default::default() }
    }

    #[test]
    fn test_center_ray_points_down_axis() {
        let p = PreviewParams { width: 3, height: 3, ..Default::default() };
        let d = p.ray_dir(1, 1);
        assert!(d.x.abs() < 1e-12 && d.y.abs() < 1e-12);
        assert!((d.z + 1.0).abs() < 1e-12);
        // Row 0 is the top of the image.
        assert!(p.ray_dir(1, 0).y > 0.0);
    }

    #[test]
    fn test_intersect_sphere() {
        let o = Vec3D::new(0.0, 0.0, 5.0);
        let d = Vec3D::new(0.0, 0.0, -1.0);
        assert!((intersect_sphere(&o, &d, 1.0).unwrap() - 4.0).abs() < 1e-12);
        assert!(intersect_sphere(&o, &Vec3D::new(0.0, 1.0, 0.0), 1.0).is_none());
        assert!(intersect_sphere(&o, &d, 0.0).is_none());
    }

    #[test]
    fn test_params_from_buffer() {
        assert_eq!(params_from_buffer(&[]), PreviewParams::default());
        let p = params_from_buffer(&[64.0, 48.0, 3.0, 60.0, 0.5, 1.0]);
        assert_eq!((p.width, p.height), (64, 48));
        assert_eq!(p.camera_distance, 3.0);
        assert_eq!(p.radius, 0.5);
        assert_eq!(p.flat_normals, Some(true));
        assert_eq!(params_from_buffer(&[8.0, 8.0, 5.0, 75.0, 1.0, -1.0]).flat_normals, None);
    }

    #[test]
    fn test_clamped_to_output_size() {
        let huge = params_from_buffer(&[4.0e9, 4.0e9]);
        assert!(huge.pixel_count() > 16 * 16);
        let fitted = huge.clamped_to(16 * 16);
        assert_eq!(fitted.height, 0);
        assert_eq!(fitted.pixel_count(), 0);

        let p = PreviewParams { width: 16, height: 64, ..Default::default() }.clamped_to(16 * 16);
        assert_eq!((p.width, p.height), (16, 16));
        let zero = PreviewParams { width: 0, height: 8, ..Default::default() }.clamped_to(64);
        assert_eq!(zero.pixel_count(), 0);
    }

    #[test]
    fn test_easing_scene_is_empty_before_growth() {
        let uniforms = FrameUniforms::build(SceneKind::EasingFunctions, 0.5, &UiState::default());
        let p = small();
        let mut gbuf = vec![Fragment::default(); p.pixel_count()];
        render_scanlines(SceneKind::EasingFunctions, &uniforms, &p, &mut gbuf, 0, 1);
        assert!(gbuf.iter().all(|f| !f.hit));

        let grown = FrameUniforms::build(SceneKind::EasingFunctions, 3.0, &UiState::default());
        render_scanlines(SceneKind::EasingFunctions, &grown, &p, &mut gbuf, 0, 1);
        let center = &gbuf[12 * 32 + 16];
        assert!(center.hit);
        assert_eq!(center.base_color, BASE_GREY);
    }

    #[test]
    fn test_workers_split_rows() {
        let uniforms = FrameUniforms::build(SceneKind::LightingModel, 0.0, &UiState::default());
        let p = small();
        let mut gbuf = vec![Fragment::default(); p.pixel_count()];
        let a = render_scanlines(SceneKind::LightingModel, &uniforms, &p, &mut gbuf, 0, 2);
        let b = render_scanlines(SceneKind::LightingModel, &uniforms, &p, &mut gbuf, 1, 2);
        assert_eq!(a + b, p.height);

        let mut single = vec![Fragment::default(); p.pixel_count()];
        render_scanlines(SceneKind::LightingModel, &uniforms, &p, &mut single, 0, 1);
        for (x, y) in gbuf.iter().zip(&single) {
            assert_eq!(x.hit, y.hit);
            assert_eq!(x.position, y.position);
        }
    }

    #[test]
    fn test_warped_scene_displaces_and_colors() {
        let uniforms = FrameUniforms::build(SceneKind::WarpedSphere, 0.0, &UiState::default());
        let p = PreviewParams { width: 1, height: 1, ..Default::default() };
        let f = shade_vertex(SceneKind::WarpedSphere, &uniforms, &p, &p.ray_dir(0, 0));
        assert!(f.hit);
        // Front pole has y = 0, so it sits at the mid offset.
        assert!((f.position.z - 1.1).abs() < 1e-9);
        assert_eq!(f.base_color, warp::warp_color(0.1));
        assert!(p.face_normals_for(SceneKind::WarpedSphere));
        assert!(!p.face_normals_for(SceneKind::LightingModel));
    }
}
