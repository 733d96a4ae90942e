//! Envelope follower for tracking signal amplitude.
//!
//! The detector at the front of the crusher pipeline: a one-pole smoothed
//! peak follower with independent attack and release time constants,
//! structurally identical to a classic compressor detector.

use libm::expf;

use crate::math::flush_denormal;

/// One-pole peak follower with separate attack and release legs.
///
/// Every sample the follower picks the attack coefficient when the
/// detector input is rising above the current envelope and the release
/// coefficient otherwise, then applies exponential smoothing:
///
/// ```text
/// env = coeff * env + (1 - coeff) * peak
/// ```
///
/// # Example
///
/// ```rust
/// use umbral_core::EnvelopeFollower;
///
/// let mut env = EnvelopeFollower::new(48000.0);
/// env.set_attack_ms(10.0);
/// env.set_release_ms(120.0);
///
/// let level = env.process(0.5);
/// assert!(level > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    /// Current envelope level (linear, always >= 0).
    envelope: f32,
    attack_coeff: f32,
    release_coeff: f32,
    sample_rate: f32,
    /// Attack time in ms (kept for recalculation).
    attack_ms: f32,
    /// Release time in ms (kept for recalculation).
    release_ms: f32,
}

impl EnvelopeFollower {
    /// Create a follower at the given sample rate.
    ///
    /// Defaults: 10 ms attack, 120 ms release.
    pub fn new(sample_rate: f32) -> Self {
        let mut follower = Self {
            envelope: 0.0,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            sample_rate,
            attack_ms: 10.0,
            release_ms: 120.0,
        };
        follower.recalculate_coefficients();
        follower
    }

    /// Set the attack time in milliseconds.
    ///
    /// Attack is how quickly the envelope rises toward the input level.
    /// Coefficients are recomputed immediately, never lazily.
    pub fn set_attack_ms(&mut self, attack_ms: f32) {
        self.attack_ms = attack_ms;
        self.recalculate_coefficients();
    }

    /// Current attack time in milliseconds.
    pub fn attack_ms(&self) -> f32 {
        self.attack_ms
    }

    /// Set the release time in milliseconds.
    ///
    /// Release is how quickly the envelope falls after the input drops.
    pub fn set_release_ms(&mut self, release_ms: f32) {
        self.release_ms = release_ms;
        self.recalculate_coefficients();
    }

    /// Current release time in milliseconds.
    pub fn release_ms(&self) -> f32 {
        self.release_ms
    }

    /// Update sample rate and recalculate coefficients.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coefficients();
    }

    /// Advance the follower with a pre-rectified detector value.
    ///
    /// `peak` must be non-negative. This is the entry point for linked
    /// stereo detection, where the caller computes `max(|l|, |r|)` before
    /// feeding the follower. Returns the updated envelope level.
    #[inline]
    pub fn process_peak(&mut self, peak: f32) -> f32 {
        let coeff = if peak > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        // Flush subnormals: the release leg decays toward zero indefinitely.
        self.envelope = flush_denormal(coeff * self.envelope + (1.0 - coeff) * peak);
        self.envelope
    }

    /// Advance the follower with a raw sample (rectified internally).
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.process_peak(input.abs())
    }

    /// Current envelope level without advancing.
    pub fn level(&self) -> f32 {
        self.envelope
    }

    /// Reset the envelope to zero.
    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }

    fn recalculate_coefficients(&mut self) {
        self.attack_coeff = ms_to_coeff(self.attack_ms, self.sample_rate);
        self.release_coeff = ms_to_coeff(self.release_ms, self.sample_rate);
    }
}

impl Default for EnvelopeFollower {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

/// One-pole smoothing coefficient for a time constant in milliseconds.
///
/// `coeff = exp(-1 / (tau_seconds * sample_rate))` with the time constant
/// floored at 1 microsecond so degenerate inputs stay stable.
#[inline]
fn ms_to_coeff(ms: f32, sample_rate: f32) -> f32 {
    let tau = ms.max(0.001) * 0.001;
    expf(-1.0 / (tau * sample_rate))
}
