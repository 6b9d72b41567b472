/// Bounce easing curves.
///
/// All three take a progress value in [0, 1]. Callers clamp first; the
/// curves do not, and their shape outside the domain is unspecified.

const N1: f64 = 7.5625;
const D1: f64 = 2.75;

/// Decelerating bounce: four parabolic arcs settling onto 1.
#[inline]
pub fn ease_out_bounce(x: f64) -> f64 {
    if x < 1.0 / D1 {
        N1 * x * x
    } else if x < 2.0 / D1 {
        let x = x - 1.5 / D1;
        N1 * x * x + 0.75
    } else if x < 2.5 / D1 {
        let x = x - 2.25 / D1;
        N1 * x * x + 0.9375
    } else {
        let x = x - 2.625 / D1;
        N1 * x * x + 0.984375
    }
}

/// Mirror of [`ease_out_bounce`]: the bounces happen at the start.
#[inline]
pub fn ease_in_bounce(x: f64) -> f64 {
    1.0 - ease_out_bounce(1.0 - x)
}

/// Bounces at both ends, meeting at 0.5 in the middle.
#[inline]
pub fn ease_in_out_bounce(x: f64) -> f64 {
    if x < 0.5 {
        (1.0 - ease_out_bounce(1.0 - 2.0 * x)) / 2.0
    } else {
        (1.0 + ease_out_bounce(2.0 * x - 1.0)) / 2.0
    }
}
