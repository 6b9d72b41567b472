use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod deform;
pub mod easing;
pub mod engine;
pub mod error;
pub mod lighting;
pub mod math;
pub mod scene;

use engine::types::{Fragment, Vec3D};
use lighting::environment::{Environment, JsEnvironment, SkyGradient};
use lighting::model::ColorEncoding;

/// Initialize the WASM module (call once from JS).
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}

/// Serialize into a plain JS object (flattened structs stay objects, not Maps).
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| error::Error::from(e).into())
}

/// Evaluate a bounce curve at progress `x` (clamped to [0, 1]).
///
/// `easing_id` — 0 in, 1 out, 2 in-out; any other id yields 1.0 (no easing)
#[wasm_bindgen]
pub fn ease(easing_id: u32, x: f64) -> f64 {
    match easing::EasingVariant::from_id(easing_id) {
        Some(v) => v.apply(math::utils::saturate(x)),
        None => 1.0,
    }
}

/// Mesh scale of the easing scene `elapsed` seconds after its clock reset.
#[wasm_bindgen]
pub fn bounce_scale(easing_id: u32, elapsed: f64) -> f64 {
    match easing::EasingVariant::from_id(easing_id) {
        Some(v) => easing::animation::BounceAnimation::new(v, elapsed).scale(),
        None => 1.0,
    }
}

/// Run the warp vertex stage over a mesh.
///
/// `positions` / `normals` — Float32Array, xyz per vertex
/// `out_positions` / `out_colors` — Float32Array, same length as `positions`
/// Returns the number of vertices processed.
#[wasm_bindgen]
pub fn displace_vertices(
    positions: &[f32],
    normals: &[f32],
    time: f64,
    out_positions: &mut [f32],
    out_colors: &mut [f32],
) -> u32 {
    let mut count = 0;
    for (((p, n), op), oc) in positions
        .chunks_exact(3)
        .zip(normals.chunks_exact(3))
        .zip(out_positions.chunks_exact_mut(3))
        .zip(out_colors.chunks_exact_mut(3))
    {
        let position = Vec3D::new(p[0] as f64, p[1] as f64, p[2] as f64);
        let normal = Vec3D::new(n[0] as f64, n[1] as f64, n[2] as f64);
        let v = deform::warp::displace(&position, &normal, time);
        op.copy_from_slice(&[v.position.x as f32, v.position.y as f32, v.position.z as f32]);
        oc.copy_from_slice(&[v.color.x as f32, v.color.y as f32, v.color.z as f32]);
        count += 1;
    }
    count
}

/// Shade a batch of fragments with the layered lighting model.
///
/// `fragments` — Float64Array, 9 values per fragment (normal, view dir, base colour)
/// `lighting` — Float64Array of 20 lighting parameters (see `lighting_from_buffer`)
/// `out_rgb` — Float32Array, 3 values per fragment
/// `environment` — optional `(x, y, z) => [r, g, b]`; defaults to a procedural sky
#[wasm_bindgen]
pub fn shade_fragments(
    fragments: &[f64],
    lighting: &[f64],
    out_rgb: &mut [f32],
    srgb: bool,
    environment: Option<js_sys::Function>,
) -> Result<u32, JsValue> {
    let params = lighting::paint::lighting_from_buffer(lighting)?;
    let encoding = if srgb { ColorEncoding::Srgb } else { ColorEncoding::Gamma22 };
    let sky = SkyGradient::default();
    let js_env = environment.map(JsEnvironment::new);
    let env: &dyn Environment = match &js_env {
        Some(e) => e,
        None => &sky,
    };
    let shaded = lighting::paint::shade_fragments(fragments, &params, env, encoding, out_rgb);
    Ok(shaded as u32)
}

#[derive(Serialize)]
struct SceneEntry {
    slug: &'static str,
    title: &'static str,
}

/// Scene selection, clock, and panel state for one page.
#[wasm_bindgen(js_name = Playground)]
pub struct WasmPlayground {
    inner: scene::Playground,
    sky: SkyGradient,
    environment: Option<JsEnvironment>,
    encoding: ColorEncoding,
}

impl Default for WasmPlayground {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(js_class = Playground)]
impl WasmPlayground {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        web_sys::console::log_1(&"Shader playground initialized".into());
        Self {
            inner: scene::Playground::new(),
            sky: SkyGradient::default(),
            environment: None,
            encoding: ColorEncoding::default(),
        }
    }

    /// Menu entries: `[{ slug, title }, ...]`.
    #[wasm_bindgen(js_name = scenes)]
    pub fn scenes(&self) -> Result<JsValue, JsValue> {
        let entries: Vec<SceneEntry> = scene::SceneKind::ALL
            .iter()
            .map(|s| SceneEntry { slug: s.slug(), title: s.title() })
            .collect();
        to_js(&entries)
    }

    #[wasm_bindgen(getter, js_name = currentScene)]
    pub fn current_scene(&self) -> String {
        self.inner.scene().slug().to_string()
    }

    /// Switch scenes. Returns false when `slug` is already active.
    #[wasm_bindgen(js_name = selectScene)]
    pub fn select_scene(&mut self, slug: &str) -> Result<bool, JsValue> {
        Ok(self.inner.select_scene(slug)?)
    }

    /// Replace the debug-panel snapshot (the panel's state object).
    #[wasm_bindgen(js_name = setUiState)]
    pub fn set_ui_state(&mut self, state: JsValue) -> Result<(), JsValue> {
        let ui: scene::UiState = serde_wasm_bindgen::from_value(state).map_err(error::Error::from)?;
        tracing::debug!(?ui, "panel state updated");
        self.inner.set_ui_state(ui);
        Ok(())
    }

    /// Use a JS callback for environment lookups, or `undefined` for the
    /// built-in sky.
    #[wasm_bindgen(js_name = setEnvironment)]
    pub fn set_environment(&mut self, callback: Option<js_sys::Function>) {
        self.environment = callback.map(JsEnvironment::new);
    }

    /// Replace the built-in sky with colour stops `[pos, r, g, b, ...]`.
    /// An empty or short buffer restores the default palette.
    #[wasm_bindgen(js_name = setSkyGradient)]
    pub fn set_sky_gradient(&mut self, stops: &[f64]) {
        self.sky = SkyGradient::from_flat(stops);
        tracing::debug!(stops = self.sky.stops.len(), "sky gradient updated");
    }

    /// Switch between gamma 2.2 (default) and exact sRGB output.
    #[wasm_bindgen(js_name = setExactSrgb)]
    pub fn set_exact_srgb(&mut self, exact: bool) {
        self.encoding = if exact { ColorEncoding::Srgb } else { ColorEncoding::Gamma22 };
    }

    /// Uniform values for the frame drawn at `now` (seconds).
    pub fn frame(&mut self, now: f64) -> Result<JsValue, JsValue> {
        to_js(&self.inner.frame(now))
    }

    /// Render the active scene on the CPU into `rgba_out`.
    ///
    /// `preview_params` — Float64Array (see `preview::params_from_buffer`)
    /// Rows that do not fit in `rgba_out` are skipped.
    /// Returns the number of scanlines rendered.
    #[wasm_bindgen(js_name = renderPreview)]
    pub fn render_preview(
        &mut self,
        now: f64,
        preview_params: &[f64],
        rgba_out: &mut [u8],
    ) -> u32 {
        let params =
            engine::preview::params_from_buffer(preview_params).clamped_to(rgba_out.len() / 4);
        let scene = self.inner.scene();
        let uniforms = self.inner.frame(now);

        let mut gbuffer = vec![Fragment::default(); params.pixel_count()];
        let rows = engine::preview::render_scanlines(scene, &uniforms, &params, &mut gbuffer, 0, 1);

        let config = lighting::paint::PaintConfig {
            lighting: uniforms.lighting,
            encoding: self.encoding,
            camera_pos: params.camera_pos(),
            face_normals: params.face_normals_for(scene),
        };
        let env: &dyn Environment = match &self.environment {
            Some(e) => e,
            None => &self.sky,
        };
        lighting::paint::paint_gbuffer(
            &gbuffer,
            rgba_out,
            params.width,
            params.height,
            &config,
            env,
        );

        tracing::debug!(scene = scene.slug(), rows, time = uniforms.time, "preview rendered");
        rows
    }
}
