//! Lock-free meter publication for UI threads.
//!
//! The audio path publishes two normalized readings per processed block;
//! a UI or logging thread polls them at its own rate. Values travel as
//! `f32` bit patterns in [`AtomicU32`]s with relaxed ordering — meters
//! are advisory, a torn read is impossible and a stale one is harmless.

use core::sync::atomic::{AtomicU32, Ordering};

use umbral_core::linear_to_db;

/// Shared meter slots for one crusher instance.
///
/// # Example
///
/// ```rust
/// use umbral_dsp::CrusherMeters;
///
/// let meters = CrusherMeters::new();
/// meters.publish(0.8, 0.3);
/// assert!((meters.input_level() - 0.8).abs() < 1e-6);
/// assert!((meters.crush_level() - 0.3).abs() < 1e-6);
/// ```
#[derive(Debug, Default)]
pub struct CrusherMeters {
    /// Block input peak mapped to [0, 1] over a 60 dB window.
    input: AtomicU32,
    /// Crush severity in [0, 1]: overshoot over crush range.
    crush: AtomicU32,
}

impl CrusherMeters {
    /// Create meters reading zero.
    pub const fn new() -> Self {
        Self {
            input: AtomicU32::new(0),
            crush: AtomicU32::new(0),
        }
    }

    /// Store both readings. Called from the audio path once per block.
    #[inline]
    pub fn publish(&self, input01: f32, crush01: f32) {
        self.input.store(input01.to_bits(), Ordering::Relaxed);
        self.crush.store(crush01.to_bits(), Ordering::Relaxed);
    }

    /// Latest input meter reading in [0, 1].
    #[inline]
    pub fn input_level(&self) -> f32 {
        f32::from_bits(self.input.load(Ordering::Relaxed))
    }

    /// Latest crush meter reading in [0, 1].
    #[inline]
    pub fn crush_level(&self) -> f32 {
        f32::from_bits(self.crush.load(Ordering::Relaxed))
    }
}

/// Map a rectified linear peak into a [0, 1] display value.
///
/// 0.0 at or below -60 dBFS, 1.0 at 0 dBFS, linear in dB between.
#[inline]
pub fn input_meter01(peak: f32) -> f32 {
    ((linear_to_db(peak + 1.0e-9) + 60.0) / 60.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_start_at_zero() {
        let meters = CrusherMeters::new();
        assert_eq!(meters.input_level(), 0.0);
        assert_eq!(meters.crush_level(), 0.0);
    }

    #[test]
    fn test_publish_and_read_back() {
        let meters = CrusherMeters::new();
        meters.publish(0.75, 0.25);
        assert_eq!(meters.input_level(), 0.75);
        assert_eq!(meters.crush_level(), 0.25);

        // Overwrites, never accumulates.
        meters.publish(0.1, 0.9);
        assert_eq!(meters.input_level(), 0.1);
        assert_eq!(meters.crush_level(), 0.9);
    }

    #[test]
    fn test_input_meter_window() {
        // Silence pins to 0, full scale to 1.
        assert_eq!(input_meter01(0.0), 0.0);
        assert!((input_meter01(1.0) - 1.0).abs() < 1e-3);
        // -30 dBFS lands mid-window.
        let mid = input_meter01(0.0316228);
        assert!((mid - 0.5).abs() < 0.01, "got {}", mid);
        // Overs clamp.
        assert_eq!(input_meter01(4.0), 1.0);
    }
}
