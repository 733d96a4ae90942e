//! Umbral Core - DSP primitives for the umbral crusher
//!
//! Foundational building blocks for real-time audio processing with zero
//! allocation in the audio path.
//!
//! # Core Abstractions
//!
//! - [`Effect`] - Object-safe trait for audio effects, stereo-first
//! - [`EnvelopeFollower`] - One-pole peak detector with asymmetric
//!   attack/release time constants
//! - [`ParameterInfo`] / [`ParamDescriptor`] - Runtime parameter
//!   discovery for presets, generic UIs, and plugin shells
//! - Math utilities: [`db_to_linear`], [`linear_to_db`], [`lerp`],
//!   [`soft_clip`], [`hard_clip`], [`wet_dry_mix`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded targets. Disable the
//! default `std` feature:
//!
//! ```toml
//! [dependencies]
//! umbral-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocations, locks, or blocking in processing paths
//! - **`libm` for math**: works without std
//! - **Object-safe traits**: dynamic dispatch when needed

#![cfg_attr(not(feature = "std"), no_std)]

pub mod effect;
pub mod envelope;
pub mod math;
pub mod param_info;

pub use effect::Effect;
pub use envelope::EnvelopeFollower;
pub use math::{db_to_linear, flush_denormal, hard_clip, lerp, linear_to_db, soft_clip, wet_dry_mix};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit, ParameterInfo};
