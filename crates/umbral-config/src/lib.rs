//! Preset persistence for the umbral crusher.
//!
//! This crate provides:
//!
//! - **[`Preset`]**: a flat TOML map of parameter string IDs to values,
//!   applied to any [`ParameterInfo`](umbral_core::ParameterInfo) effect
//! - **Factory presets**: built-in starting points embedded at compile
//!   time ([`factory_preset`], [`all_factory_presets`])
//!
//! ## Quick Start
//!
//! ```rust
//! use umbral_config::factory_preset;
//! use umbral_dsp::ThresholdCrusher;
//!
//! let mut crusher = ThresholdCrusher::new(48000.0);
//! factory_preset("warm_crush").unwrap().apply_to(&mut crusher);
//! assert_eq!(crusher.min_bit_depth(), 6);
//! ```

mod error;
mod factory_presets;
mod preset;

pub use error::ConfigError;
pub use factory_presets::{FACTORY_PRESET_NAMES, all_factory_presets, factory_preset};
pub use preset::Preset;
