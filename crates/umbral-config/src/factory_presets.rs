//! Factory presets bundled with the library.
//!
//! Built-in starting points that are always available without external
//! files. Embedded as TOML at compile time so they exercise the same
//! parsing path as user presets.

use crate::error::ConfigError;
use crate::preset::Preset;

/// Factory preset names, in menu order.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "clean_glue",
    "warm_crush",
    "lofi_steps",
    "bit_smash",
    "clipper_bite",
];

/// TOML content for factory presets.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("clean_glue", CLEAN_GLUE_PRESET),
    ("warm_crush", WARM_CRUSH_PRESET),
    ("lofi_steps", LOFI_STEPS_PRESET),
    ("bit_smash", BIT_SMASH_PRESET),
    ("clipper_bite", CLIPPER_BITE_PRESET),
];

/// Subtle dynamics-tied texture on a parallel blend.
const CLEAN_GLUE_PRESET: &str = r#"
name = "Clean Glue"
description = "Subtle texture only on peaks, blended in parallel"

[params]
threshold_db = -18.0
attack_ms = 15.0
release_ms = 150.0
crush_range_db = 30.0
min_bit_depth = 10.0
downsample_max = 1.0
clip_enabled = 0.0
clip_drive_db = 6.0
clip_style = 40.0
mix = 60.0
"#;

/// Gentle degradation with a mostly-soft clipper.
const WARM_CRUSH_PRESET: &str = r#"
name = "Warm Crush"
description = "Gentle bit reduction with a soft clipper on loud hits"

[params]
threshold_db = -24.0
attack_ms = 8.0
release_ms = 200.0
crush_range_db = 24.0
min_bit_depth = 6.0
downsample_max = 2.0
clip_enabled = 1.0
clip_drive_db = 8.0
clip_style = 30.0
mix = 75.0
"#;

/// Obvious staircase downsampling, fully wet.
const LOFI_STEPS_PRESET: &str = r#"
name = "Lo-Fi Steps"
description = "Audible sample-hold steps driven by the input level"

[params]
threshold_db = -30.0
attack_ms = 3.0
release_ms = 250.0
crush_range_db = 18.0
min_bit_depth = 4.0
downsample_max = 8.0
clip_enabled = 0.0
clip_drive_db = 12.0
clip_style = 50.0
mix = 100.0
"#;

/// Aggressive destruction, hard-leaning clipper.
const BIT_SMASH_PRESET: &str = r#"
name = "Bit Smash"
description = "Heavy crushing with a hard-edged clipper"

[params]
threshold_db = -36.0
attack_ms = 1.0
release_ms = 120.0
crush_range_db = 12.0
min_bit_depth = 3.0
downsample_max = 6.0
clip_enabled = 1.0
clip_drive_db = 18.0
clip_style = 70.0
mix = 100.0
"#;

/// Clipper-forward character with light quantization.
const CLIPPER_BITE_PRESET: &str = r#"
name = "Clipper Bite"
description = "Mostly clipper character, light bit reduction, parallel mix"

[params]
threshold_db = -20.0
attack_ms = 4.0
release_ms = 90.0
crush_range_db = 20.0
min_bit_depth = 8.0
downsample_max = 1.0
clip_enabled = 1.0
clip_drive_db = 20.0
clip_style = 85.0
mix = 65.0
"#;

/// Load a factory preset by its snake_case name.
pub fn factory_preset(name: &str) -> Result<Preset, ConfigError> {
    FACTORY_PRESETS_TOML
        .iter()
        .find(|(n, _)| *n == name)
        .ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))
        .and_then(|(_, toml_str)| Preset::from_toml(toml_str))
}

/// Load all factory presets in menu order.
pub fn all_factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .map(|(_, toml_str)| {
            Preset::from_toml(toml_str).expect("factory preset TOML must be valid")
        })
        .collect()
}
