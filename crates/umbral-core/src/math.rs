//! Math utilities for real-time DSP.
//!
//! Allocation-free, `no_std`-friendly helpers used throughout the crusher
//! pipeline: level conversions, linear interpolation, and the two clipping
//! shapes blended by the clipper stage.
//!
//! | Function | Character | Use |
//! |----------|-----------|-----|
//! | [`soft_clip`] | Smooth tanh saturation | Clipper at style 0 |
//! | [`hard_clip`] | Flat-top limiting | Clipper at style 1 |

use libm::{expf, logf, tanhf};

/// Convert decibels to linear gain.
///
/// 0 dB → 1.0, -6 dB → ~0.5, +6 dB → ~2.0.
///
/// # Example
/// ```rust
/// use umbral_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Input is floored at 1e-10 so silence maps to a large negative dB value
/// instead of -infinity.
///
/// # Example
/// ```rust
/// use umbral_core::linear_to_db;
///
/// assert!(linear_to_db(1.0).abs() < 1e-4);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(x) = 20 * ln(x) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Soft clip using hyperbolic tangent.
///
/// Approaches ±1 asymptotically; primarily odd harmonics.
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    tanhf(x)
}

/// Hard clip to [-1, 1].
///
/// Abrupt limiting that creates flat tops on waveforms.
#[inline]
pub fn hard_clip(x: f32) -> f32 {
    x.clamp(-1.0, 1.0)
}

/// Linear interpolation from `a` (at t=0) to `b` (at t=1).
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Crossfade between dry and wet signals.
///
/// Equivalent to `dry * (1 - mix) + wet * mix` with one fewer multiply.
/// `mix = 0` returns `dry` exactly.
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry + (wet - dry) * mix
}

/// Flush subnormal floats to zero.
///
/// Subnormals (~1e-38 and below) cause severe CPU slowdowns on most
/// architectures. Values below 1e-20 are replaced with zero, leaving
/// margin before the IEEE 754 subnormal range begins. Use in decaying
/// state like envelope followers.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_linear_roundtrip() {
        let original = 0.5;
        let db = linear_to_db(original);
        let back = db_to_linear(db);
        assert!(
            (original - back).abs() < 1e-5,
            "roundtrip failed: {} -> {} -> {}",
            original,
            db,
            back
        );
    }

    #[test]
    fn test_db_known_values() {
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_linear(-6.0206) - 0.5).abs() < 0.001);
        assert!((db_to_linear(6.0206) - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_to_db_floors_at_silence() {
        // Zero gain must give a finite (large negative) value, not -inf.
        let db = linear_to_db(0.0);
        assert!(db.is_finite());
        assert!(db < -190.0);
    }

    #[test]
    fn test_soft_clip_bounds() {
        assert!(soft_clip(3.0) < 1.0);
        assert!(soft_clip(3.0) > 0.99);
        assert!(soft_clip(-3.0) > -1.0);
        assert!(soft_clip(-3.0) < -0.99);
    }

    #[test]
    fn test_hard_clip() {
        assert_eq!(hard_clip(0.5), 0.5);
        assert_eq!(hard_clip(1.5), 1.0);
        assert_eq!(hard_clip(-1.5), -1.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        // Downward interpolation, as used by the bit-depth mapping
        assert_eq!(lerp(24.0, 4.0, 1.0), 4.0);
    }

    #[test]
    fn test_wet_dry_mix() {
        // All dry
        assert_eq!(wet_dry_mix(1.0, 0.5, 0.0), 1.0);
        // All wet
        assert_eq!(wet_dry_mix(1.0, 0.5, 1.0), 0.5);
        // Equivalent to dry*(1-mix)+wet*mix
        let (dry, wet, mix) = (0.3, 0.8, 0.7);
        let expected = dry * (1.0 - mix) + wet * mix;
        assert!((wet_dry_mix(dry, wet, mix) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1.0), 1.0);
        assert_eq!(flush_denormal(1e-10), 1e-10);
        assert_eq!(flush_denormal(1e-21), 0.0);
        assert_eq!(flush_denormal(-1e-21), 0.0);
        assert_eq!(flush_denormal(0.0), 0.0);
    }
}
