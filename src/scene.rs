/// Scene catalogue, debug-panel state, and per-frame uniforms.
///
/// The host page owns the render loop. Once per display refresh it hands
/// the current time to [`Playground::frame`] and gets back a fresh
/// [`FrameUniforms`] value for the active scene's shader material. Panel
/// edits replace the [`UiState`] snapshot wholesale; nothing is mutated
/// field by field, so a dropped frame is harmless.

use serde::{Deserialize, Serialize};

use crate::easing::animation::BounceAnimation;
use crate::easing::EasingVariant;
use crate::error::{Error, Result};
use crate::lighting::model::LightingParameters;
use crate::math::utils;

/// The three demos, in menu order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneKind {
    LightingModel,
    EasingFunctions,
    WarpedSphere,
}

impl SceneKind {
    pub const ALL: [SceneKind; 3] = [
        SceneKind::LightingModel,
        SceneKind::EasingFunctions,
        SceneKind::WarpedSphere,
    ];

    /// Scene shown when the page loads.
    pub const INITIAL: SceneKind = SceneKind::EasingFunctions;

    pub fn from_slug(slug: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.slug() == slug)
            .ok_or_else(|| Error::UnknownScene(slug.to_string()))
    }

    pub fn slug(&self) -> &'static str {
        match self {
            SceneKind::LightingModel => "lighting-model",
            SceneKind::EasingFunctions => "easing-functions",
            SceneKind::WarpedSphere => "warped-sphere",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SceneKind::LightingModel => "Lighting Model",
            SceneKind::EasingFunctions => "Easing Functions",
            SceneKind::WarpedSphere => "Warped Sphere",
        }
    }

    /// Does the fragment stage rebuild normals from position derivatives?
    pub fn uses_face_normals(&self) -> bool {
        matches!(self, SceneKind::WarpedSphere)
    }

    /// Does the panel drive the lighting uniforms?
    pub fn uses_panel_lighting(&self) -> bool {
        !matches!(self, SceneKind::WarpedSphere)
    }
}

/// 0..255 colour from a panel colour picker.
///
/// Accepts `[r, g, b]` (possibly fractional) or a `"#rrggbb"` string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UiColorRepr")]
pub struct UiColor(pub [u8; 3]);

/// Wire forms a colour picker may send.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum UiColorRepr {
    Rgb([f64; 3]),
    Hex(String),
}

impl TryFrom<UiColorRepr> for UiColor {
    type Error = Error;

    fn try_from(repr: UiColorRepr) -> Result<Self> {
        match repr {
            UiColorRepr::Rgb(c) => {
                Ok(UiColor(c.map(|v| utils::clamp(v.round(), 0.0, 255.0) as u8)))
            }
            UiColorRepr::Hex(s) => utils::parse_hex_color(&s)
                .map(UiColor)
                .ok_or_else(|| Error::InvalidParams(format!("bad colour {s:?}"))),
        }
    }
}

impl UiColor {
    /// Normalized [0, 1] channels.
    pub fn to_unit(self) -> [f64; 3] {
        self.0.map(utils::byte_to_float)
    }
}

/// Debug-panel snapshot. Field names match the panel controls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiState {
    pub easing_function: EasingVariant,
    pub ambient_factor: f64,
    pub ambient_color: UiColor,
    pub hemi_factor: f64,
    pub hemi_sky_color: UiColor,
    pub hemi_ground_color: UiColor,
    pub diffuse_factor: f64,
    pub diffuse_color: UiColor,
    pub phong_factor: f64,
    pub phong_shininess: f64,
    pub ibl_factor: f64,
    pub fresnel_factor: f64,
    pub fresnel_intensity: f64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            easing_function: EasingVariant::EaseIn,
            ambient_factor: 0.0,
            ambient_color: UiColor([128, 128, 128]),
            hemi_factor: 0.5,
            hemi_sky_color: UiColor([0, 77, 153]),
            hemi_ground_color: UiColor([153, 77, 26]),
            diffuse_factor: 0.5,
            diffuse_color: UiColor([255, 255, 230]),
            phong_factor: 1.0,
            phong_shininess: 32.0,
            ibl_factor: 1.0,
            fresnel_factor: 1.0,
            fresnel_intensity: 2.0,
        }
    }
}

impl From<&UiState> for LightingParameters {
    fn from(ui: &UiState) -> Self {
        LightingParameters::dark()
            .with_ambient(ui.ambient_color.to_unit(), ui.ambient_factor)
            .with_hemi(ui.hemi_sky_color.to_unit(), ui.hemi_ground_color.to_unit(), ui.hemi_factor)
            .with_diffuse(ui.diffuse_color.to_unit(), ui.diffuse_factor)
            .with_phong(ui.phong_shininess, ui.phong_factor)
            .with_ibl(ui.ibl_factor)
            .with_fresnel(ui.fresnel_factor, ui.fresnel_intensity)
    }
}

/// Uniform values for one frame, named as the shader materials expect.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameUniforms {
    /// Seconds since the scene (or easing mode) was last reset
    pub time: f64,
    pub easing_id: u32,
    #[serde(flatten)]
    pub lighting: LightingParameters,
}

impl FrameUniforms {
    pub fn build(scene: SceneKind, elapsed: f64, ui: &UiState) -> Self {
        let lighting = if scene.uses_panel_lighting() {
            LightingParameters::from(ui)
        } else {
            LightingParameters::warped_sphere()
        };
        Self {
            time: elapsed,
            easing_id: ui.easing_function.id(),
            lighting,
        }
    }

    pub fn easing(&self) -> EasingVariant {
        EasingVariant::from_id(self.easing_id).unwrap_or_default()
    }

    pub fn bounce(&self) -> BounceAnimation {
        BounceAnimation::new(self.easing(), self.time)
    }
}

/// Menu selection, scene clock, and panel snapshot.
#[derive(Clone, Debug)]
pub struct Playground {
    scene: SceneKind,
    /// Host timestamp the clock counts from; set on the first frame
    clock_origin: Option<f64>,
    ui: UiState,
}

impl Default for Playground {
    fn default() -> Self {
        Self::new()
    }
}

impl Playground {
    pub fn new() -> Self {
        Self {
            scene: SceneKind::INITIAL,
            clock_origin: None,
            ui: UiState::default(),
        }
    }

    pub fn scene(&self) -> SceneKind {
        self.scene
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui
    }

    /// Switch scenes by menu slug. Returns whether anything changed.
    pub fn select_scene(&mut self, slug: &str) -> Result<bool> {
        let next = SceneKind::from_slug(slug)?;
        if next == self.scene {
            return Ok(false);
        }
        tracing::info!(from = self.scene.slug(), to = next.slug(), "switching scene");
        self.scene = next;
        self.ui = UiState::default();
        self.reset_clock();
        Ok(true)
    }

    /// Replace the panel snapshot. Picking another easing curve restarts
    /// the growth animation.
    pub fn set_ui_state(&mut self, ui: UiState) {
        if ui.easing_function != self.ui.easing_function {
            tracing::debug!(easing = ui.easing_function.name(), "easing changed, restarting clock");
            self.reset_clock();
        }
        self.ui = ui;
    }

    pub fn reset_clock(&mut self) {
        self.clock_origin = None;
    }

    /// Seconds elapsed at host time `now` (seconds). Never negative.
    pub fn elapsed(&mut self, now: f64) -> f64 {
        let origin = *self.clock_origin.get_or_insert(now);
        (now - origin).max(0.0)
    }

    /// Uniforms for the frame rendered at host time `now`.
    pub fn frame(&mut self, now: f64) -> FrameUniforms {
        let elapsed = self.elapsed(now);
        FrameUniforms::build(self.scene, elapsed, &self.ui)
    }
}
