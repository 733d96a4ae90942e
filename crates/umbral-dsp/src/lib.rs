//! Umbral DSP - the threshold-driven crusher engine
//!
//! A lo-fi degradation effect gated by a dynamics detector: clean signal
//! passes through bit-identically, signal above the threshold gets
//! progressively downsampled, bit-reduced, and optionally clipped, with
//! severity proportional to the overshoot.
//!
//! - [`ThresholdCrusher`] - the complete stereo-linked engine
//! - [`CrusherMeters`] - lock-free meter slots for a UI thread
//!
//! ## Example
//!
//! ```rust
//! use umbral_core::Effect;
//! use umbral_dsp::ThresholdCrusher;
//!
//! let mut crusher = ThresholdCrusher::new(48000.0);
//! crusher.set_threshold_db(-24.0);
//! crusher.set_downsample_max(8);
//! crusher.set_clip_enabled(true);
//!
//! let (l, r) = crusher.process_stereo(0.7, -0.7);
//! assert!(l.abs() <= 1.0 + 1e-6 || l.is_finite());
//! # let _ = r;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod crusher;
pub mod meters;

pub use crusher::ThresholdCrusher;
pub use meters::{CrusherMeters, input_meter01};
