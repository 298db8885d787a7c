use super::{ModifierStatsBuilder, StatValue, ToolStat};
use crate::id::StatId;
use crate::predicate::ItemPredicate;

/// How a float stat renders in tooltips.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatFormat {
    /// `12.5`
    #[default]
    Number,
    /// `25%` for `0.25`
    Percent,
    /// `1.5x`
    Multiplier,
}

impl StatFormat {
    pub fn render(self, value: f32) -> String {
        match self {
            Self::Number => format!("{}", round2(value)),
            Self::Percent => format!("{}%", (value * 100.0).round()),
            Self::Multiplier => format!("{}x", round2(value)),
        }
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Numeric stat clamped to `[min, max]`.
///
/// Contributions go through the four accumulation operations below; the
/// builder applies them in a fixed order at resolution time (see the
/// [module docs](super)).
#[derive(Clone, Debug, PartialEq)]
pub struct FloatStat {
    id: StatId,
    default: f32,
    min: f32,
    max: f32,
    format: StatFormat,
    scope: ItemPredicate,
}

impl FloatStat {
    /// Declares a stat applying to every item, ranging over `[0, f32::MAX]`.
    pub fn new(id: impl Into<StatId>, default: f32) -> Self {
        Self {
            id: id.into(),
            default,
            min: 0.0,
            max: f32::MAX,
            format: StatFormat::Number,
            scope: ItemPredicate::Any,
        }
    }

    #[must_use]
    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: StatFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: ItemPredicate) -> Self {
        self.scope = scope;
        self
    }

    pub fn id(&self) -> &StatId {
        &self.id
    }

    pub fn default_value(&self) -> f32 {
        self.default
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn format(&self) -> StatFormat {
        self.format
    }

    /// Clamps into `[min, max]`. Never panics, even for an inverted range.
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }

    /// Sets the base value. A second update in the same pass adds instead.
    pub fn update(&self, builder: &mut ModifierStatsBuilder, value: f32) {
        builder.float(self).update(value);
    }

    pub fn add(&self, builder: &mut ModifierStatsBuilder, delta: f32) {
        builder.float(self).add(delta);
    }

    /// Multiplies the base plus additions.
    pub fn multiply(&self, builder: &mut ModifierStatsBuilder, factor: f32) {
        builder.float(self).multiply(factor);
    }

    /// Multiplies the final value, after every local multiplier.
    pub fn multiply_all(&self, builder: &mut ModifierStatsBuilder, factor: f32) {
        builder.float(self).multiply_all(factor);
    }

    /// Current resolved value within `builder`, or the default if untouched.
    pub fn get(&self, builder: &ModifierStatsBuilder) -> f32 {
        builder.float_value(self)
    }
}

impl ToolStat for FloatStat {
    type Value = f32;

    fn id(&self) -> &StatId {
        &self.id
    }

    fn default_value(&self) -> f32 {
        self.default
    }

    fn scope(&self) -> &ItemPredicate {
        &self.scope
    }

    fn read(&self, value: StatValue) -> Option<f32> {
        match value {
            StatValue::Float(value) => Some(value),
            StatValue::Tier(_) => None,
        }
    }

    fn write(&self, value: f32) -> StatValue {
        StatValue::Float(value)
    }

    fn format_value(&self, value: f32) -> String {
        self.format.render(value)
    }
}
