//! Preset file format and operations.
//!
//! A preset is a flat map of stable parameter string IDs to plain values,
//! plus a name and optional description. Values use the same units the
//! parameter descriptors expose (dB, ms, percent), so a preset file reads
//! the way the parameters display.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;
use umbral_core::ParameterInfo;

/// Preset file for the crusher.
///
/// # TOML Format
///
/// ```toml
/// name = "Warm Crush"
/// description = "Gentle degradation with a soft clipper"
///
/// [params]
/// threshold_db = -24.0
/// attack_ms = 8.0
/// min_bit_depth = 6.0
/// mix = 75.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter values keyed by stable string ID.
    ///
    /// A `BTreeMap` keeps serialization order deterministic.
    #[serde(default)]
    pub params: BTreeMap<String, f32>,
}

impl Preset {
    /// Create a new empty preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: BTreeMap::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a parameter value.
    pub fn with_param(mut self, string_id: impl Into<String>, value: f32) -> Self {
        self.params.insert(string_id.into(), value);
        self
    }

    /// Capture the current state of an effect as a preset.
    ///
    /// Records every parameter the effect exposes, keyed by string ID.
    pub fn capture(name: impl Into<String>, effect: &impl ParameterInfo) -> Self {
        let mut preset = Self::new(name);
        for i in 0..effect.param_count() {
            if let Some(desc) = effect.param_info(i) {
                preset
                    .params
                    .insert(desc.string_id.to_string(), effect.get_param(i));
            }
        }
        preset
    }

    /// Apply this preset's parameters to an effect.
    ///
    /// Keys are matched against parameter string IDs; values are clamped
    /// by the effect's own `set_param`. Unknown keys are skipped so
    /// presets stay forward- and backward-compatible across parameter
    /// additions. Returns the number of parameters applied.
    pub fn apply_to(&self, effect: &mut impl ParameterInfo) -> usize {
        let mut applied = 0;
        for (key, &value) in &self.params {
            if let Some(index) = effect.param_index_by_string_id(key) {
                effect.set_param(index, value);
                applied += 1;
            }
        }
        applied
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get a parameter value by string ID.
    pub fn get(&self, string_id: &str) -> Option<f32> {
        self.params.get(string_id).copied()
    }

    /// Number of parameters stored in the preset.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the preset stores no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
