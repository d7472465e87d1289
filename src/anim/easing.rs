//! Easing curves

/// Exponential ease-out: fast start, long soft landing.
///
/// `t == 1.0` is special-cased so the last frame lands exactly on 1.0
/// instead of `1 - 2^-10`.
#[inline]
pub fn ease_out_expo(t: f64) -> f64 {
    if t == 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * t)
    }
}
