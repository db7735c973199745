pub(crate) const EPSILON: f64 = 1e-9;

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
pub(crate) fn clamp01(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// `(value - start) / (end - start)` clamped to `[0, 1]`; 0 for empty or inverted spans.
pub(crate) fn span_fraction(value: f64, start: f64, end: f64) -> f64 {
    let len = end - start;
    if !(len > EPSILON) {
        return 0.0;
    }
    clamp01((value - start) / len)
}

/// Frame-rate independent exponential approach of `current` toward `target`.
///
/// After `lag` seconds roughly 63% of the remaining distance is covered.
pub(crate) fn approach(current: f64, target: f64, lag: f64, dt: f64) -> f64 {
    if !(dt > 0.0) {
        return current;
    }
    if !(lag > 0.0) {
        return target;
    }
    let k = 1.0 - (-dt / lag).exp();
    lerp(current, target, k)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
