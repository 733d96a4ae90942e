//! Parameter introspection for discoverable effect parameters.
//!
//! The [`ParameterInfo`] trait and its supporting types let hosts discover
//! and manipulate parameters at runtime without knowing the concrete
//! effect type. This drives:
//!
//! - **Preset persistence**: flat name → value maps applied by string ID
//! - **Generic UIs / hardware**: ranges, units, and steps for controls
//! - **Plugin shells**: stable numeric IDs for automation recording
//!
//! Parameters are addressed by zero-based index; each carries a
//! [`ParamDescriptor`] with display metadata, a stable [`ParamId`], a
//! stable `string_id` for serialization, and a [`ParamScale`] describing
//! its normalization curve.

/// Scaling curve for parameter normalization.
///
/// Determines how a plain value maps into normalized \[0.0, 1.0\] space
/// for knobs and host automation.
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Power(exp)**: `normalized = ((value - min) / (max - min)).powf(1.0 / exp)`
///
/// `Power` with an exponent below 1.0 concentrates resolution at the low
/// end of the range, matching the skew-factor convention of plugin
/// parameter ranges (time constants, crush range).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamScale {
    /// Linear mapping (default). Equal resolution across the range.
    #[default]
    Linear,
    /// Power-curve mapping with configurable exponent.
    /// exponent < 1.0 gives more resolution at the low end.
    Power(f32),
}

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter —
/// it is part of the persistence contract with hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags for host communication.
///
/// # Example
///
/// ```rust
/// use umbral_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::AUTOMATABLE));
/// assert!(flags.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter (default for all params).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps (integer or boolean values).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels (dB) - gain, threshold, drive.
    Decibels,
    /// Milliseconds (ms) - attack, release.
    Milliseconds,
    /// Percentage (%) - mix, clip style.
    Percent,
    /// Bit depth (bits).
    Bits,
    /// No unit - dimensionless (downsample factor, toggles).
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// # Example
    ///
    /// ```rust
    /// use umbral_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Percent => "%",
            ParamUnit::Bits => " bits",
            ParamUnit::None => "",
        }
    }
}

/// Describes a single parameter for display, validation, and persistence.
///
/// # Example
///
/// ```rust
/// use umbral_core::{ParamDescriptor, ParamId};
///
/// let threshold = ParamDescriptor::gain_db("Threshold", "Thresh", -60.0, 0.0, -18.0)
///     .with_id(ParamId(900), "threshold_db");
/// assert_eq!(threshold.string_id, "threshold_db");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Crush Range").
    pub name: &'static str,

    /// Short name for hardware displays, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Default value on initialization or reset.
    pub default: f32,

    /// Recommended increment for encoder-based control.
    pub step: f32,

    /// Stable numeric ID for host automation and persistence.
    pub id: ParamId,

    /// Human-readable stable ID for presets and serialization.
    ///
    /// Convention: snake_case with a unit hint (e.g., `"threshold_db"`).
    pub string_id: &'static str,

    /// Normalization curve for plain ↔ normalized conversion.
    pub scale: ParamScale,

    /// Capability flags for host communication.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Gain parameter in decibels.
    pub fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            step: 0.1,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Time parameter in milliseconds.
    pub fn time_ms(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Milliseconds,
            min,
            max,
            default,
            step: 0.1,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Percentage parameter (0–100%).
    pub fn percent(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Percent,
            min: 0.0,
            max: 100.0,
            default,
            step: 0.1,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Boolean toggle parameter stored as 0.0 / 1.0.
    pub fn toggle(name: &'static str, short_name: &'static str, default_on: bool) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: 1.0,
            default: if default_on { 1.0 } else { 0.0 },
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
        }
    }

    /// Fully custom parameter with a unit of `None`.
    pub fn custom(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Sets the stable parameter ID and string ID.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the unit type.
    pub const fn with_unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the normalization scale.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the parameter flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the recommended step increment.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Clamps a value into this parameter's valid range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Converts a plain value to normalized \[0.0, 1.0\], respecting the scale.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        let linear = (self.clamp(value) - self.min) / range;
        match self.scale {
            ParamScale::Linear => linear,
            ParamScale::Power(exp) => libm::powf(linear, 1.0 / exp),
        }
    }

    /// Converts a normalized \[0.0, 1.0\] value back to the plain range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let t = normalized.clamp(0.0, 1.0);
        match self.scale {
            ParamScale::Linear => self.min + t * (self.max - self.min),
            ParamScale::Power(exp) => {
                let curved = libm::powf(t, exp);
                self.min + curved * (self.max - self.min)
            }
        }
    }
}

/// Trait for effects that expose introspectable parameters.
///
/// Parameters are accessed by zero-based index, stable for the lifetime of
/// the effect instance. Implementations must clamp out-of-range values in
/// [`set_param`](Self::set_param) and ignore out-of-range indices —
/// parameter application never fails.
pub trait ParameterInfo {
    /// Number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` if out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index` (0.0 if out of range).
    fn get_param(&self, index: usize) -> f32;

    /// Sets the parameter at `index`, clamping into its valid range.
    /// Out-of-range indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);

    /// Finds a parameter index by display name (case-insensitive).
    ///
    /// Matches both [`ParamDescriptor::name`] and
    /// [`ParamDescriptor::short_name`].
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name) || desc.short_name.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Finds a parameter index by its stable string ID (exact match).
    ///
    /// This is the lookup used by preset application and persistence.
    fn param_index_by_string_id(&self, string_id: &str) -> Option<usize> {
        (0..self.param_count())
            .find(|&i| self.param_info(i).is_some_and(|d| d.string_id == string_id))
    }

    /// Stable [`ParamId`] of the parameter at `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }

    /// Finds a parameter index by its stable [`ParamId`]. O(n) scan —
    /// suitable for setup paths, not the audio thread.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestEffect {
        gain_db: f32,
        mix: f32,
    }

    impl ParameterInfo for TestEffect {
        fn param_count(&self) -> usize {
            2
        }

        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            match index {
                0 => Some(
                    ParamDescriptor::gain_db("Gain", "Gain", -60.0, 12.0, 0.0)
                        .with_id(ParamId(1), "gain_db"),
                ),
                1 => Some(ParamDescriptor::percent("Mix", "Mix", 100.0).with_id(ParamId(2), "mix")),
                _ => None,
            }
        }

        fn get_param(&self, index: usize) -> f32 {
            match index {
                0 => self.gain_db,
                1 => self.mix,
                _ => 0.0,
            }
        }

        fn set_param(&mut self, index: usize, value: f32) {
            match index {
                0 => self.gain_db = value.clamp(-60.0, 12.0),
                1 => self.mix = value.clamp(0.0, 100.0),
                _ => {}
            }
        }
    }

    #[test]
    fn test_find_by_name_case_insensitive() {
        let fx = TestEffect {
            gain_db: 0.0,
            mix: 100.0,
        };
        assert_eq!(fx.find_param_by_name("gain"), Some(0));
        assert_eq!(fx.find_param_by_name("MIX"), Some(1));
        assert_eq!(fx.find_param_by_name("nope"), None);
    }

    #[test]
    fn test_find_by_string_id_is_exact() {
        let fx = TestEffect {
            gain_db: 0.0,
            mix: 100.0,
        };
        assert_eq!(fx.param_index_by_string_id("gain_db"), Some(0));
        assert_eq!(fx.param_index_by_string_id("GAIN_DB"), None);
    }

    #[test]
    fn test_set_param_clamps() {
        let mut fx = TestEffect {
            gain_db: 0.0,
            mix: 100.0,
        };
        fx.set_param(0, 100.0);
        assert_eq!(fx.get_param(0), 12.0);
        fx.set_param(0, -100.0);
        assert_eq!(fx.get_param(0), -60.0);
        // Out-of-range index is a no-op
        fx.set_param(7, 1.0);
    }

    #[test]
    fn test_normalize_linear() {
        let desc = ParamDescriptor::percent("Mix", "Mix", 50.0);
        assert_eq!(desc.normalize(0.0), 0.0);
        assert_eq!(desc.normalize(50.0), 0.5);
        assert_eq!(desc.normalize(100.0), 1.0);
        assert_eq!(desc.denormalize(0.5), 50.0);
    }

    #[test]
    fn test_normalize_power_roundtrip() {
        let desc = ParamDescriptor::time_ms("Attack", "Attack", 0.5, 200.0, 10.0)
            .with_scale(ParamScale::Power(0.35));
        for &v in &[0.5, 1.0, 10.0, 50.0, 200.0] {
            let n = desc.normalize(v);
            assert!((0.0..=1.0).contains(&n));
            let back = desc.denormalize(n);
            assert!((back - v).abs() < 1e-2, "roundtrip {} -> {} -> {}", v, n, back);
        }
    }

    #[test]
    fn test_power_scale_concentrates_low_end() {
        let desc = ParamDescriptor::time_ms("Release", "Release", 5.0, 1000.0, 120.0)
            .with_scale(ParamScale::Power(0.35));
        // Midpoint of the knob should land well below the linear midpoint.
        let mid = desc.denormalize(0.5);
        assert!(mid < 502.5, "power curve midpoint {} should be below linear", mid);
    }

    #[test]
    fn test_toggle_descriptor() {
        let desc = ParamDescriptor::toggle("Clip", "Clip", false);
        assert_eq!(desc.default, 0.0);
        assert!(desc.flags.contains(ParamFlags::STEPPED));
        assert_eq!(desc.clamp(2.0), 1.0);
    }
}
