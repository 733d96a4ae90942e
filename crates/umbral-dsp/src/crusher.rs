//! Threshold-driven crusher: dynamics-controlled lo-fi degradation.
//!
//! # Theory
//!
//! A conventional bitcrusher degrades everything it touches. This effect
//! instead gates degradation behind a level detector, like a compressor
//! gates gain reduction:
//!
//! ```text
//! Input ──► Envelope Follower ──► Overshoot / Severity
//!   │                                   │
//!   │             ┌─────────────────────┘
//!   │             ▼
//!   ├──► Downsample-Hold ──► Quantizer ──► Clipper (optional) ──┐
//!   │                                                           ▼
//!   └────────────────────────── dry ────────────────────► Mix ──► Out
//! ```
//!
//! At or below the threshold the signal passes through **bit-identically**
//! — not "nearly clean", but untouched. Above it, the overshoot in dB is
//! normalized by the crush range into a severity scalar in [0, 1] that
//! continuously drives three degradation stages:
//!
//! - **Downsample-hold**: a captured sample is repeated for up to
//!   `downsample_max` frames (zero-order hold), producing the staircase
//!   artifact of a lowered effective sample rate without resampling.
//! - **Bit-depth reduction**: amplitude is quantized to
//!   `2^(bits-1)` steps per polarity, sweeping from `max_bit_depth` at
//!   zero overshoot down to `min_bit_depth` at full overshoot.
//! - **Clipper** (optional, wet path only): drive scaled by severity into
//!   a continuous blend of tanh saturation and hard clipping.
//!
//! The detector is **stereo-linked**: `max(|L|, |R|)` drives identical
//! processing on both channels, so hot material on one side crushes both
//! and the stereo image never smears sideways.
//!
//! ## Parameter Indices (`ParameterInfo`)
//!
//! | Index | string id | Name | Range | Default |
//! |-------|-----------|------|-------|---------|
//! | 0 | `threshold_db` | Threshold | -60–0 dB | -18 |
//! | 1 | `attack_ms` | Attack | 0.5–200 ms | 10 |
//! | 2 | `release_ms` | Release | 5–1000 ms | 120 |
//! | 3 | `crush_range_db` | Crush Range | 6–48 dB | 24 |
//! | 4 | `min_bit_depth` | Min Bit Depth | 2–16 bits | 4 |
//! | 5 | `downsample_max` | Downsample Max | 1–64 | 1 |
//! | 6 | `clip_enabled` | Clip | off/on | off |
//! | 7 | `clip_drive_db` | Clip Drive | 0–24 dB | 12 |
//! | 8 | `clip_style` | Clip Style | 0–100% | 50% |
//! | 9 | `mix` | Mix | 0–100% | 100% |
//!
//! # Example
//!
//! ```rust
//! use umbral_dsp::ThresholdCrusher;
//! use umbral_core::Effect;
//!
//! let mut crusher = ThresholdCrusher::new(48000.0);
//! crusher.set_threshold_db(-24.0);
//! crusher.set_downsample_max(8);
//!
//! let (l, r) = crusher.process_stereo(0.5, -0.5);
//! assert!(l.is_finite() && r.is_finite());
//! ```

use libm::roundf;
use umbral_core::{
    Effect, EnvelopeFollower, ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit,
    ParameterInfo, db_to_linear, hard_clip, lerp, linear_to_db, soft_clip, wet_dry_mix,
};

use crate::meters::{CrusherMeters, input_meter01};

/// Detector floor added before dB conversion so silence never hits -inf.
const EPSILON: f32 = 1.0e-9;

/// Dynamics-driven crusher engine.
///
/// Owns all DSP state for one stereo (or mono) channel pair. All setters
/// saturate their input into a valid range — configuration never fails,
/// never allocates, never blocks. Running state is touched only by the
/// processing methods, once per sample frame, in order.
#[derive(Debug, Clone)]
pub struct ThresholdCrusher {
    sample_rate: f32,
    /// Detector threshold in dBFS. Overshoot above this drives degradation.
    threshold_db: f32,
    /// Stereo-linked peak follower with asymmetric attack/release.
    follower: EnvelopeFollower,
    /// dB span over which overshoot maps to full severity. Always >= 1.
    crush_range_db: f32,
    /// Bit depth at full overshoot (2–24).
    min_bit_depth: u32,
    /// Bit depth at zero overshoot (2–24, >= min).
    max_bit_depth: u32,
    /// Hold length in frames at full overshoot (1–64).
    downsample_max: u32,
    /// Dry/wet blend in [0, 1].
    mix: f32,
    clip_enabled: bool,
    /// Clipper drive at full overshoot, dB (0–24). Scales with severity.
    clip_drive_db: f32,
    /// Clipper character: 0 = tanh, 1 = hard clip.
    clip_style: f32,
    /// Frames remaining before a new hold block is captured.
    hold_counter: u32,
    held_l: f32,
    held_r: f32,
}

impl ThresholdCrusher {
    /// Create a crusher at the given sample rate.
    ///
    /// Non-positive rates substitute 44100 Hz rather than failing.
    pub fn new(sample_rate: f32) -> Self {
        let sample_rate = if sample_rate > 0.0 { sample_rate } else { 44100.0 };
        let mut follower = EnvelopeFollower::new(sample_rate);
        follower.set_attack_ms(10.0);
        follower.set_release_ms(120.0);
        Self {
            sample_rate,
            threshold_db: -18.0,
            follower,
            crush_range_db: 24.0,
            min_bit_depth: 4,
            max_bit_depth: 24,
            downsample_max: 1,
            mix: 1.0,
            clip_enabled: false,
            clip_drive_db: 12.0,
            clip_style: 0.5,
            hold_counter: 0,
            held_l: 0.0,
            held_r: 0.0,
        }
    }

    /// Set the detector threshold in dBFS.
    pub fn set_threshold_db(&mut self, threshold_db: f32) {
        self.threshold_db = threshold_db;
    }

    /// Current detector threshold in dBFS.
    pub fn threshold_db(&self) -> f32 {
        self.threshold_db
    }

    /// Set detector attack time in milliseconds.
    pub fn set_attack_ms(&mut self, attack_ms: f32) {
        self.follower.set_attack_ms(attack_ms);
    }

    /// Current attack time in milliseconds.
    pub fn attack_ms(&self) -> f32 {
        self.follower.attack_ms()
    }

    /// Set detector release time in milliseconds.
    pub fn set_release_ms(&mut self, release_ms: f32) {
        self.follower.set_release_ms(release_ms);
    }

    /// Current release time in milliseconds.
    pub fn release_ms(&self) -> f32 {
        self.follower.release_ms()
    }

    /// Set the dB span mapping overshoot to full severity. Floored at 1 dB.
    pub fn set_crush_range_db(&mut self, range_db: f32) {
        self.crush_range_db = range_db.max(1.0);
    }

    /// Current crush range in dB.
    pub fn crush_range_db(&self) -> f32 {
        self.crush_range_db
    }

    /// Set the bit-depth sweep endpoints.
    ///
    /// Both are clamped to [2, 24] and swapped if inverted, so any input
    /// yields a valid range.
    pub fn set_bit_depth_range(&mut self, min_depth: u32, max_depth: u32) {
        let min = min_depth.clamp(2, 24);
        let max = max_depth.clamp(2, 24);
        if min > max {
            self.min_bit_depth = max;
            self.max_bit_depth = min;
        } else {
            self.min_bit_depth = min;
            self.max_bit_depth = max;
        }
    }

    /// Bit depth reached at full overshoot.
    pub fn min_bit_depth(&self) -> u32 {
        self.min_bit_depth
    }

    /// Bit depth at zero overshoot.
    pub fn max_bit_depth(&self) -> u32 {
        self.max_bit_depth
    }

    /// Set the maximum hold length in frames (clamped to [1, 64]).
    pub fn set_downsample_max(&mut self, max_factor: u32) {
        self.downsample_max = max_factor.clamp(1, 64);
    }

    /// Current maximum hold length in frames.
    pub fn downsample_max(&self) -> u32 {
        self.downsample_max
    }

    /// Set dry/wet mix (clamped to [0, 1]). 0 reproduces the dry input
    /// exactly even above threshold.
    pub fn set_mix(&mut self, mix: f32) {
        self.mix = mix.clamp(0.0, 1.0);
    }

    /// Current dry/wet mix in [0, 1].
    pub fn mix(&self) -> f32 {
        self.mix
    }

    /// Enable or disable the wet-path clipper.
    pub fn set_clip_enabled(&mut self, enabled: bool) {
        self.clip_enabled = enabled;
    }

    /// Whether the wet-path clipper is enabled.
    pub fn clip_enabled(&self) -> bool {
        self.clip_enabled
    }

    /// Set clipper drive at full overshoot, dB (clamped to [0, 24]).
    pub fn set_clip_drive_db(&mut self, drive_db: f32) {
        self.clip_drive_db = drive_db.clamp(0.0, 24.0);
    }

    /// Current clipper drive in dB.
    pub fn clip_drive_db(&self) -> f32 {
        self.clip_drive_db
    }

    /// Set clipper character (clamped to [0, 1]): 0 = tanh, 1 = hard clip.
    pub fn set_clip_style(&mut self, style: f32) {
        self.clip_style = style.clamp(0.0, 1.0);
    }

    /// Current clipper character in [0, 1].
    pub fn clip_style(&self) -> f32 {
        self.clip_style
    }

    /// Instantaneous detector reading in dB, for metering.
    pub fn envelope_db(&self) -> f32 {
        linear_to_db(self.follower.level() + EPSILON)
    }

    /// Normalized crush meter in [0, 1]: overshoot over crush range.
    pub fn crush_meter01(&self) -> f32 {
        let overshoot_db = (self.envelope_db() - self.threshold_db).max(0.0);
        (overshoot_db / self.crush_range_db.max(1.0)).clamp(0.0, 1.0)
    }

    /// Process a stereo block and publish meter values at the block
    /// boundary.
    ///
    /// Output is bit-identical to calling
    /// [`process_stereo`](Effect::process_stereo) per frame. The input
    /// meter tracks the block's rectified input peak; the crush meter
    /// reads the detector state after the last frame. Meters are written
    /// with relaxed atomic stores — see [`CrusherMeters`].
    pub fn process_block_stereo_metered(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
        meters: &CrusherMeters,
    ) {
        debug_assert_eq!(left_in.len(), right_in.len());
        debug_assert_eq!(left_in.len(), left_out.len());
        debug_assert_eq!(left_out.len(), right_out.len());

        let mut max_in: f32 = 0.0;
        for i in 0..left_in.len() {
            let (l, r) = (left_in[i], right_in[i]);
            max_in = max_in.max(l.abs()).max(r.abs());
            let (ol, or) = self.process_stereo(l, r);
            left_out[i] = ol;
            right_out[i] = or;
        }

        meters.publish(input_meter01(max_in), self.crush_meter01());
    }

    /// Quantize a sample to the given bit depth.
    ///
    /// `2^(N-1)` steps per polarity over [-1, 1):
    /// ```text
    /// steps = 2^(bits - 1)
    /// q = clamp(round(x * steps) / steps, -1, 1)
    /// ```
    #[inline]
    fn quantize_to_bit_depth(x: f32, bit_depth: u32) -> f32 {
        let bit_depth = bit_depth.clamp(2, 24);
        let steps = (1_u32 << (bit_depth - 1)) as f32;
        (roundf(x * steps) / steps).clamp(-1.0, 1.0)
    }

    /// Blend tanh saturation and hard clipping of an already-driven sample.
    #[inline]
    fn clip_sample(x_driven: f32, style: f32) -> f32 {
        let soft = soft_clip(x_driven);
        let hard = hard_clip(x_driven);
        lerp(soft, hard, style)
    }
}

impl Effect for ThresholdCrusher {
    /// Mono path: feeds the same sample to both channels of the linked
    /// detector and keeps the left result.
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.process_stereo(input, input).0
    }

    /// Process one stereo frame through the full pipeline.
    ///
    /// Stereo-linked: the detector sees `max(|L|, |R|)` and the resulting
    /// severity drives both channels identically.
    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        let peak = left.abs().max(right.abs());
        let envelope = self.follower.process_peak(peak);

        let envelope_db = linear_to_db(envelope + EPSILON);
        let overshoot_db = (envelope_db - self.threshold_db).max(0.0);

        if overshoot_db <= 0.0 {
            // Exact bypass. Clearing the counter here keeps stale held
            // samples from smearing into the next crushing stretch.
            self.hold_counter = 0;
            return (left, right);
        }

        let crush = (overshoot_db / self.crush_range_db).clamp(0.0, 1.0);

        // Downsample-hold: at full overshoot, hold up to downsample_max frames.
        let hold_samples = (roundf(lerp(1.0, self.downsample_max as f32, crush)) as u32)
            .clamp(1, self.downsample_max);

        if hold_samples <= 1 {
            self.hold_counter = 0;
            self.held_l = left;
            self.held_r = right;
        } else if self.hold_counter == 0 {
            self.held_l = left;
            self.held_r = right;
            self.hold_counter = hold_samples - 1;
        } else {
            self.hold_counter -= 1;
        }

        let bit_depth =
            roundf(lerp(self.max_bit_depth as f32, self.min_bit_depth as f32, crush)) as u32;

        let mut wet_l = Self::quantize_to_bit_depth(self.held_l, bit_depth);
        let mut wet_r = Self::quantize_to_bit_depth(self.held_r, bit_depth);

        // Optional clipper on the wet chain only; drive scales with
        // severity so it only bites as overshoot grows.
        if self.clip_enabled {
            let drive = db_to_linear(self.clip_drive_db * crush);
            wet_l = Self::clip_sample(wet_l * drive, self.clip_style);
            wet_r = Self::clip_sample(wet_r * drive, self.clip_style);
        }

        (
            wet_dry_mix(left, wet_l, self.mix),
            wet_dry_mix(right, wet_r, self.mix),
        )
    }

    /// Update sample rate, recompute detector coefficients, and reset
    /// running state. Non-positive rates substitute 44100 Hz.
    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = if sample_rate > 0.0 { sample_rate } else { 44100.0 };
        self.reset();
        self.follower.set_sample_rate(self.sample_rate);
    }

    /// Clear the envelope, hold counter, and held samples. Parameters are
    /// untouched.
    fn reset(&mut self) {
        self.follower.reset();
        self.hold_counter = 0;
        self.held_l = 0.0;
        self.held_r = 0.0;
    }
}

impl ParameterInfo for ThresholdCrusher {
    fn param_count(&self) -> usize {
        10
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(
                ParamDescriptor::gain_db("Threshold", "Thresh", -60.0, 0.0, -18.0)
                    .with_id(ParamId(900), "threshold_db"),
            ),
            1 => Some(
                ParamDescriptor::time_ms("Attack", "Attack", 0.5, 200.0, 10.0)
                    .with_scale(ParamScale::Power(0.35))
                    .with_id(ParamId(901), "attack_ms"),
            ),
            2 => Some(
                ParamDescriptor::time_ms("Release", "Release", 5.0, 1000.0, 120.0)
                    .with_scale(ParamScale::Power(0.35))
                    .with_id(ParamId(902), "release_ms"),
            ),
            3 => Some(
                ParamDescriptor::gain_db("Crush Range", "Range", 6.0, 48.0, 24.0)
                    .with_scale(ParamScale::Power(0.5))
                    .with_id(ParamId(903), "crush_range_db"),
            ),
            4 => Some(
                ParamDescriptor::custom("Min Bit Depth", "MinBits", 2.0, 16.0, 4.0)
                    .with_unit(ParamUnit::Bits)
                    .with_step(1.0)
                    .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED))
                    .with_id(ParamId(904), "min_bit_depth"),
            ),
            5 => Some(
                ParamDescriptor::custom("Downsample Max", "DownMax", 1.0, 64.0, 1.0)
                    .with_step(1.0)
                    .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED))
                    .with_id(ParamId(905), "downsample_max"),
            ),
            6 => Some(
                ParamDescriptor::toggle("Clip", "Clip", false).with_id(ParamId(906), "clip_enabled"),
            ),
            7 => Some(
                ParamDescriptor::gain_db("Clip Drive", "Drive", 0.0, 24.0, 12.0)
                    .with_id(ParamId(907), "clip_drive_db"),
            ),
            8 => Some(
                ParamDescriptor::percent("Clip Style", "Style", 50.0)
                    .with_id(ParamId(908), "clip_style"),
            ),
            9 => Some(ParamDescriptor::percent("Mix", "Mix", 100.0).with_id(ParamId(909), "mix")),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.threshold_db,
            1 => self.attack_ms(),
            2 => self.release_ms(),
            3 => self.crush_range_db,
            4 => self.min_bit_depth as f32,
            5 => self.downsample_max as f32,
            6 => {
                if self.clip_enabled {
                    1.0
                } else {
                    0.0
                }
            }
            7 => self.clip_drive_db,
            8 => self.clip_style * 100.0,
            9 => self.mix * 100.0,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_threshold_db(value.clamp(-60.0, 0.0)),
            1 => self.set_attack_ms(value.clamp(0.5, 200.0)),
            2 => self.set_release_ms(value.clamp(5.0, 1000.0)),
            3 => self.set_crush_range_db(value.clamp(6.0, 48.0)),
            // The sweep always tops out at full resolution; only the floor
            // is user-facing.
            4 => self.set_bit_depth_range(roundf(value.max(0.0)) as u32, 24),
            5 => self.set_downsample_max(roundf(value.max(0.0)) as u32),
            6 => self.set_clip_enabled(value > 0.5),
            7 => self.set_clip_drive_db(value),
            8 => self.set_clip_style(value / 100.0),
            9 => self.set_mix(value / 100.0),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crusher_at(threshold_db: f32) -> ThresholdCrusher {
        let mut c = ThresholdCrusher::new(48000.0);
        c.set_threshold_db(threshold_db);
        c.set_attack_ms(0.5);
        c.set_crush_range_db(24.0);
        c.set_bit_depth_range(4, 24);
        c
    }

    /// Drive the detector with a steady stereo level for `n` frames.
    fn charge(c: &mut ThresholdCrusher, level: f32, n: usize) {
        for _ in 0..n {
            c.process_stereo(level, level);
        }
    }

    #[test]
    fn test_default_params() {
        let c = ThresholdCrusher::new(48000.0);
        assert_eq!(c.param_count(), 10);

        let thresh = c.param_info(0).unwrap();
        assert_eq!(thresh.name, "Threshold");
        assert!((thresh.default - (-18.0)).abs() < 1e-6);
        assert_eq!(thresh.string_id, "threshold_db");

        let attack = c.param_info(1).unwrap();
        assert_eq!(attack.unit, ParamUnit::Milliseconds);
        assert_eq!(attack.scale, ParamScale::Power(0.35));

        let bits = c.param_info(4).unwrap();
        assert!(bits.flags.contains(ParamFlags::STEPPED));
        assert_eq!(bits.unit, ParamUnit::Bits);

        let mix = c.param_info(9).unwrap();
        assert!((mix.default - 100.0).abs() < 1e-6);
        assert!(c.param_info(10).is_none());
    }

    #[test]
    fn test_clean_under_threshold_is_bit_identical() {
        let mut c = crusher_at(-12.0);

        // A -20 dBFS sample stays below the -12 dB threshold.
        let x = db_to_linear(-20.0) * 0.7071;
        let (l, r) = c.process_stereo(x, -x);
        assert_eq!(l, x);
        assert_eq!(r, -x);
    }

    #[test]
    fn test_more_overshoot_coarser_quantization() {
        let mut c = crusher_at(-30.0);
        let input = 0.1234567;

        // Mild overshoot: steady level around -20 dBFS.
        charge(&mut c, db_to_linear(-20.0), 2000);
        let (a, _) = c.process_stereo(input, -input);
        let err_mild = (a - input).abs();

        // Hot overshoot: steady level around -6 dBFS.
        c.reset();
        charge(&mut c, db_to_linear(-6.0), 2000);
        let (b, _) = c.process_stereo(input, -input);
        let err_hot = (b - input).abs();

        assert!(
            err_hot >= err_mild,
            "hot error {} should be >= mild error {}",
            err_hot,
            err_mild
        );
        assert!(err_hot > 0.0);
    }

    #[test]
    fn test_stereo_link_crushes_quiet_channel() {
        let mut c = crusher_at(-24.0);

        // Charge the detector with a loud left channel only.
        let loud = db_to_linear(-3.0);
        for _ in 0..2000 {
            c.process_stereo(loud, 0.01);
        }

        // A quiet right sample must get quantized because the shared
        // detector is still hot.
        let quiet = 0.0012345;
        let (_, r) = c.process_stereo(quiet, quiet);
        assert!(
            (r - quiet).abs() > 0.0,
            "linked detector should crush the quiet channel"
        );
    }

    #[test]
    fn test_fast_attack_crushes_sooner_than_slow() {
        let mut fast = crusher_at(-24.0);
        let mut slow = crusher_at(-24.0);
        fast.set_attack_ms(0.5);
        slow.set_attack_ms(100.0);
        fast.set_bit_depth_range(2, 24);
        slow.set_bit_depth_range(2, 24);

        // A short loud burst: the fast detector reaches the threshold
        // within it, the slow one does not.
        charge(&mut fast, 1.0, 50);
        charge(&mut slow, 1.0, 50);

        let probe = 0.1234567;
        let (f, _) = fast.process_stereo(probe, probe);
        let (s, _) = slow.process_stereo(probe, probe);
        let fast_err = (f - probe).abs();
        let slow_err = (s - probe).abs();

        assert!(
            fast_err > slow_err,
            "fast attack error {} should exceed slow attack error {}",
            fast_err,
            slow_err
        );
        assert_eq!(slow_err, 0.0, "slow detector should still be below threshold");
    }

    #[test]
    fn test_release_affects_recovery() {
        let mut fast = crusher_at(-24.0);
        let mut slow = crusher_at(-24.0);
        fast.set_release_ms(20.0);
        slow.set_release_ms(500.0);

        charge(&mut fast, db_to_linear(-6.0), 2000);
        charge(&mut slow, db_to_linear(-6.0), 2000);

        // Feed a quiet signal and find the first bit-identical (bypassed)
        // output frame for each release setting.
        let quiet = 0.0012345;
        let mut fast_clean_at = None;
        let mut slow_clean_at = None;
        for i in 0..6000 {
            let (fl, fr) = fast.process_stereo(quiet, quiet);
            let (sl, sr) = slow.process_stereo(quiet, quiet);
            if fast_clean_at.is_none() && fl == quiet && fr == quiet {
                fast_clean_at = Some(i);
            }
            if slow_clean_at.is_none() && sl == quiet && sr == quiet {
                slow_clean_at = Some(i);
            }
        }

        let fast_at = fast_clean_at.expect("fast release should recover within 6000 frames");
        match slow_clean_at {
            None => {}
            Some(slow_at) => assert!(
                slow_at > fast_at,
                "slow release recovered at {} before fast at {}",
                slow_at,
                fast_at
            ),
        }
    }

    #[test]
    fn test_min_bit_depth_changes_severity() {
        let mut low_bits = crusher_at(-60.0);
        let mut high_bits = crusher_at(-60.0);
        low_bits.set_crush_range_db(6.0);
        high_bits.set_crush_range_db(6.0);
        low_bits.set_bit_depth_range(2, 24);
        high_bits.set_bit_depth_range(12, 24);
        low_bits.set_mix(1.0);
        high_bits.set_mix(1.0);

        charge(&mut low_bits, 0.99, 4000);
        charge(&mut high_bits, 0.99, 4000);

        let input = 0.1234567;
        let (a, _) = low_bits.process_stereo(input, input);
        let (b, _) = high_bits.process_stereo(input, input);
        let err_low = (a - input).abs();
        let err_high = (b - input).abs();

        assert!(err_low >= err_high);
        assert!(err_low > 0.0);
    }

    #[test]
    fn test_mix_blends_dry_and_crushed() {
        let mut c = crusher_at(-60.0);
        c.set_crush_range_db(6.0);
        c.set_bit_depth_range(2, 24);

        charge(&mut c, 0.99, 2000);
        let input = 0.1234567;

        c.set_mix(1.0);
        let (wet, _) = c.process_stereo(input, input);
        assert!((wet - input).abs() > 0.0);

        c.set_mix(0.0);
        let (dry_l, dry_r) = c.process_stereo(input, input);
        assert_eq!(dry_l, input);
        assert_eq!(dry_r, input);
    }

    #[test]
    fn test_downsample_holds_in_blocks() {
        let mut c = crusher_at(-60.0);
        c.set_release_ms(120.0);
        c.set_crush_range_db(6.0);
        // Near-transparent quantization isolates the hold behaviour.
        c.set_bit_depth_range(24, 24);
        c.set_mix(1.0);
        c.set_clip_enabled(false);
        c.set_downsample_max(4);

        // At max overshoot, hold_samples == downsample_max.
        charge(&mut c, 0.99, 2000);

        let mut out = [0.0f32; 8];
        for (i, slot) in out.iter_mut().enumerate() {
            let x = 0.10 + 0.01 * i as f32;
            *slot = c.process_stereo(x, x).0;
        }

        // Two 4-frame blocks of repeated values, different across blocks.
        for w in out[0..4].windows(2) {
            assert!((w[0] - w[1]).abs() < 1e-6, "first block should hold: {:?}", out);
        }
        for w in out[4..8].windows(2) {
            assert!((w[0] - w[1]).abs() < 1e-6, "second block should hold: {:?}", out);
        }
        assert!((out[0] - out[4]).abs() > 1e-6, "blocks should differ: {:?}", out);
    }

    #[test]
    fn test_hold_state_clears_in_clean_gaps() {
        let mut c = crusher_at(-24.0);
        c.set_release_ms(5.0);
        c.set_bit_depth_range(24, 24);
        c.set_mix(1.0);
        c.set_downsample_max(8);

        // Crush a loud stretch so a held value is latched.
        charge(&mut c, 0.9, 500);

        // Let the envelope release well below threshold.
        charge(&mut c, 0.0, 4000);

        // Re-entering the crushing state must capture the current input,
        // not replay the held 0.9-era sample.
        let (l, _) = c.process_stereo(0.5, 0.5);
        assert!(
            (l - 0.5).abs() < 0.1,
            "fresh hold block should track the new input, got {}",
            l
        );
    }

    #[test]
    fn test_clip_toggle_changes_output() {
        let mut plain = crusher_at(-60.0);
        let mut clipped = crusher_at(-60.0);
        for c in [&mut plain, &mut clipped] {
            c.set_crush_range_db(6.0);
            c.set_bit_depth_range(24, 24);
            c.set_downsample_max(1);
            c.set_mix(1.0);
        }
        clipped.set_clip_enabled(true);
        clipped.set_clip_drive_db(12.0);
        clipped.set_clip_style(0.5);

        charge(&mut plain, 0.99, 2000);
        charge(&mut clipped, 0.99, 2000);

        // 0.5 sits exactly on a 24-bit step, so without the clipper the
        // wet path reproduces it bit-identically.
        let (p, _) = plain.process_stereo(0.5, 0.5);
        let (q, _) = clipped.process_stereo(0.5, 0.5);
        assert_eq!(p, 0.5);
        assert!((q - 0.5).abs() > 1e-6);
    }

    #[test]
    fn test_soft_vs_hard_style() {
        let mut soft = crusher_at(-60.0);
        let mut hard = crusher_at(-60.0);
        for c in [&mut soft, &mut hard] {
            c.set_crush_range_db(6.0);
            c.set_bit_depth_range(24, 24);
            c.set_downsample_max(1);
            c.set_mix(1.0);
            c.set_clip_enabled(true);
            c.set_clip_drive_db(12.0);
        }
        soft.set_clip_style(0.0);
        hard.set_clip_style(1.0);

        charge(&mut soft, 0.99, 2000);
        charge(&mut hard, 0.99, 2000);

        let (s, _) = soft.process_stereo(0.2, 0.2);
        let (h, _) = hard.process_stereo(0.2, 0.2);
        assert!(h > s, "hard clip {} should exceed tanh {} below the ceiling", h, s);
    }

    #[test]
    fn test_block_matches_per_sample() {
        let mut per_sample = crusher_at(-30.0);
        per_sample.set_downsample_max(6);
        per_sample.set_clip_enabled(true);
        let mut block = per_sample.clone();

        let n = 512;
        let left_in: Vec<f32> = (0..n).map(|i| libm::sinf(i as f32 * 0.05) * 0.8).collect();
        let right_in: Vec<f32> = (0..n).map(|i| libm::cosf(i as f32 * 0.07) * 0.6).collect();

        let mut left_ref = vec![0.0f32; n];
        let mut right_ref = vec![0.0f32; n];
        for i in 0..n {
            let (l, r) = per_sample.process_stereo(left_in[i], right_in[i]);
            left_ref[i] = l;
            right_ref[i] = r;
        }

        let mut left_out = vec![0.0f32; n];
        let mut right_out = vec![0.0f32; n];
        block.process_block_stereo(&left_in, &right_in, &mut left_out, &mut right_out);

        for i in 0..n {
            assert_eq!(left_out[i].to_bits(), left_ref[i].to_bits(), "L mismatch at {}", i);
            assert_eq!(right_out[i].to_bits(), right_ref[i].to_bits(), "R mismatch at {}", i);
        }
    }

    #[test]
    fn test_mono_process_matches_stereo_degenerate() {
        let mut mono = crusher_at(-30.0);
        let mut stereo = crusher_at(-30.0);

        for i in 0..256 {
            let x = libm::sinf(i as f32 * 0.1) * 0.7;
            let m = mono.process(x);
            let (l, r) = stereo.process_stereo(x, x);
            assert_eq!(m.to_bits(), l.to_bits());
            assert_eq!(l.to_bits(), r.to_bits());
        }
    }

    #[test]
    fn test_reset_clears_running_state() {
        let mut c = crusher_at(-60.0);
        c.set_downsample_max(8);
        charge(&mut c, 0.7, 200);
        assert!(c.envelope_db() > -20.0);

        c.reset();
        assert!(c.envelope_db() < -170.0, "envelope should be at the floor after reset");
        // Parameters survive reset.
        assert_eq!(c.downsample_max(), 8);
    }

    #[test]
    fn test_nonpositive_sample_rate_substitutes_default() {
        let mut c = ThresholdCrusher::new(0.0);
        let (l, r) = c.process_stereo(0.5, 0.5);
        assert!(l.is_finite() && r.is_finite());

        c.set_sample_rate(-48000.0);
        let (l, r) = c.process_stereo(0.5, 0.5);
        assert!(l.is_finite() && r.is_finite());
    }

    #[test]
    fn test_setter_saturation() {
        let mut c = ThresholdCrusher::new(48000.0);

        c.set_crush_range_db(0.0);
        assert_eq!(c.crush_range_db(), 1.0);

        // Inverted range is swapped, out-of-range clamped.
        c.set_bit_depth_range(30, 1);
        assert_eq!(c.min_bit_depth(), 2);
        assert_eq!(c.max_bit_depth(), 24);

        c.set_downsample_max(1000);
        assert_eq!(c.downsample_max(), 64);
        c.set_downsample_max(0);
        assert_eq!(c.downsample_max(), 1);

        c.set_mix(1.5);
        assert_eq!(c.mix(), 1.0);
        c.set_mix(-0.5);
        assert_eq!(c.mix(), 0.0);

        c.set_clip_drive_db(99.0);
        assert_eq!(c.clip_drive_db(), 24.0);
        c.set_clip_style(7.0);
        assert_eq!(c.clip_style(), 1.0);
    }

    #[test]
    fn test_param_set_get_roundtrip() {
        let mut c = ThresholdCrusher::new(48000.0);

        c.set_param(0, -24.0);
        assert!((c.get_param(0) - (-24.0)).abs() < 1e-5);

        c.set_param(1, 3.0);
        assert!((c.get_param(1) - 3.0).abs() < 1e-5);

        c.set_param(4, 6.0);
        assert!((c.get_param(4) - 6.0).abs() < 1e-5);

        c.set_param(5, 8.0);
        assert!((c.get_param(5) - 8.0).abs() < 1e-5);

        c.set_param(6, 1.0);
        assert!((c.get_param(6) - 1.0).abs() < 1e-5);
        assert!(c.clip_enabled());

        c.set_param(8, 70.0);
        assert!((c.get_param(8) - 70.0).abs() < 1e-5);
        assert!((c.clip_style() - 0.7).abs() < 1e-5);

        c.set_param(9, 65.0);
        assert!((c.get_param(9) - 65.0).abs() < 1e-5);
    }

    #[test]
    fn test_param_lookup_by_string_id() {
        let c = ThresholdCrusher::new(48000.0);
        assert_eq!(c.param_index_by_string_id("threshold_db"), Some(0));
        assert_eq!(c.param_index_by_string_id("downsample_max"), Some(5));
        assert_eq!(c.param_index_by_string_id("mix"), Some(9));
        assert_eq!(c.param_index_by_string_id("nope"), None);
        assert_eq!(c.param_index_by_id(ParamId(903)), Some(3));
    }

    #[test]
    fn test_quantize_known_values() {
        // 2 bits: 2 steps per polarity, step size 0.5.
        assert_eq!(ThresholdCrusher::quantize_to_bit_depth(0.3, 2), 0.5);
        assert_eq!(ThresholdCrusher::quantize_to_bit_depth(0.1, 2), 0.0);
        assert_eq!(ThresholdCrusher::quantize_to_bit_depth(-0.8, 2), -1.0);
        // Out-of-range depth saturates to the [2, 24] window.
        assert_eq!(
            ThresholdCrusher::quantize_to_bit_depth(0.3, 0),
            ThresholdCrusher::quantize_to_bit_depth(0.3, 2)
        );
    }
}
