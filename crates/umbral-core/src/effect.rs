//! Core `Effect` trait.
//!
//! The [`Effect`] trait is the boundary contract between the DSP engine and
//! whatever host drives it (offline CLI, plugin shell, test harness).
//!
//! ## Design Decisions
//!
//! - **Stereo-first with a mono degenerate**: the crusher is stereo-linked,
//!   so [`process_stereo`](Effect::process_stereo) is the fundamental
//!   operation. Mono callers feed the same sample to both channels via
//!   [`process`](Effect::process) and keep only one result; a shared
//!   detector then sees a single value and degenerates correctly.
//!
//! - **Object-safe**: `dyn Effect` works for runtime dispatch, though
//!   static dispatch is preferred in the audio path.
//!
//! - **No allocations**: every method is callable from a real-time audio
//!   thread with zero heap allocation, locking, or blocking.

/// Trait for all audio effects.
///
/// # Example
///
/// ```rust
/// use umbral_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
/// ```
pub trait Effect {
    /// Process a single mono sample, advancing internal state by one frame.
    fn process(&mut self, input: f32) -> f32;

    /// Process one stereo frame.
    ///
    /// Default implementation treats the channels as independent mono
    /// paths. Linked-stereo effects must override this so both channels
    /// share one detector update per frame.
    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        (self.process(left), self.process(right))
    }

    /// Process a block of mono samples.
    ///
    /// Default implementation calls [`process`](Self::process) per sample.
    ///
    /// # Panics
    /// Default implementation debug-asserts `input.len() == output.len()`.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of stereo samples.
    ///
    /// Must produce output bit-identical to calling
    /// [`process_stereo`](Self::process_stereo) per frame in order.
    fn process_block_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) {
        debug_assert_eq!(left_in.len(), right_in.len());
        debug_assert_eq!(left_in.len(), left_out.len());
        debug_assert_eq!(left_out.len(), right_out.len());
        for i in 0..left_in.len() {
            let (l, r) = self.process_stereo(left_in[i], right_in[i]);
            left_out[i] = l;
            right_out[i] = r;
        }
    }

    /// Update the sample rate.
    ///
    /// Effects recalculate any sample-rate-dependent coefficients here,
    /// eagerly, so derived state never lags a setter.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal running state without changing parameters.
    ///
    /// Called on stream (re)start or when the effect is bypassed, to
    /// prevent stale state from smearing into fresh audio.
    fn reset(&mut self);

    /// Processing latency in samples. Zero for all current effects.
    fn latency_samples(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gain(f32);

    impl Effect for Gain {
        fn process(&mut self, input: f32) -> f32 {
            input * self.0
        }
        fn set_sample_rate(&mut self, _: f32) {}
        fn reset(&mut self) {}
    }

    #[test]
    fn test_default_stereo_is_dual_mono() {
        let mut g = Gain(2.0);
        assert_eq!(g.process_stereo(1.0, -0.5), (2.0, -1.0));
    }

    #[test]
    fn test_default_block_matches_per_sample() {
        let mut g = Gain(0.5);
        let input = [1.0, 2.0, 3.0];
        let mut output = [0.0; 3];
        g.process_block(&input, &mut output);
        assert_eq!(output, [0.5, 1.0, 1.5]);
    }

    #[test]
    fn test_default_stereo_block() {
        let mut g = Gain(2.0);
        let left = [1.0, 2.0];
        let right = [3.0, 4.0];
        let mut out_l = [0.0; 2];
        let mut out_r = [0.0; 2];
        g.process_block_stereo(&left, &right, &mut out_l, &mut out_r);
        assert_eq!(out_l, [2.0, 4.0]);
        assert_eq!(out_r, [6.0, 8.0]);
    }

    #[test]
    fn test_default_latency_is_zero() {
        assert_eq!(Gain(1.0).latency_samples(), 0);
    }
}
