/// Scalar helpers shared by the vertex and fragment formulas.
///
/// Mirrors the small GLSL toolbox every demo shader carries around:
/// clamping, interpolation, range remapping, Hermite smoothing, and the
/// byte/float colour conversions used at the debug-panel boundary.

/// Clamp a value to [min, max] range.
#[inline(always)]
pub fn clamp(v: f64, min: f64, max: f64) -> f64 {
    if v < min { min } else if v > max { max } else { v }
}

/// Clamp to [0, 1].
#[inline(always)]
pub fn saturate(v: f64) -> f64 {
    clamp(v, 0.0, 1.0)
}

/// Linear interpolation between a and b (GLSL `mix`).
#[inline(always)]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Position of `v` inside [min_value, max_value] as a fraction.
///
/// Not clamped: values outside the input range extrapolate.
#[inline(always)]
pub fn inverse_lerp(v: f64, min_value: f64, max_value: f64) -> f64 {
    (v - min_value) / (max_value - min_value)
}

/// Linearly remap `v` from [in_min, in_max] to [out_min, out_max].
#[inline(always)]
pub fn remap(v: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let t = inverse_lerp(v, in_min, in_max);
    lerp(out_min, out_max, t)
}

/// Smooth step (cubic Hermite interpolation, clamped).
#[inline(always)]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = saturate((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

/// Pack a float to a byte [0, 255].
#[inline(always)]
pub fn float_to_byte(v: f64) -> u8 {
    let vi = (v * 255.0 + 0.5) as i32;
    if vi < 0 { 0 } else if vi > 255 { 255 } else { vi as u8 }
}

/// Unpack a byte [0, 255] to a float [0, 1].
#[inline(always)]
pub fn byte_to_float(v: u8) -> f64 {
    v as f64 / 255.0
}

/// Parse a CSS hex color string "#RRGGBB" to (r, g, b) bytes.
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}
