/// Lighting: the layered shading model, its environment lookups, and the
/// paint pass that applies them to the preview G-buffer.
///
/// - Ambient, hemisphere and Lambert diffuse, modulated by base colour
/// - Phong plus image-based specular under a shared Fresnel weight
/// - Gamma 2.2 display encoding with exact sRGB as an alternative

pub mod environment;
pub mod model;
pub mod paint;
