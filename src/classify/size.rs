//! Font size quantization.

/// Default bucket width for font sizes, in points.
pub const DEFAULT_PRECISION: f32 = 0.5;

/// Round a font size to the nearest multiple of `precision`.
///
/// Halfway quotients round to even, so `12.25` with precision `0.5` lands in
/// the `12.0` bucket. A non-positive precision or a non-finite size is
/// returned unchanged.
pub fn normalize_font_size(size: f32, precision: f32) -> f32 {
    if precision <= 0.0 || !size.is_finite() {
        return size;
    }
    // `+ 0.0` folds -0.0 into 0.0
    (size / precision).round_ties_even() * precision + 0.0
}

/// Hashable key for a normalized size.
pub fn size_key(size: f32) -> u32 {
    (size + 0.0).to_bits()
}
