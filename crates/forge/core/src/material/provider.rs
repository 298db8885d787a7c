use super::{MaterialStatsCache, WeightedStatType};
use crate::error::{ErrorSeverity, ForgeError};
use crate::id::{MaterialId, MaterialStatsId};
use crate::stat::{FloatStat, ModifierStatsBuilder, TierStat};

/// How the weighted values of one attribute are reduced.
///
/// Each value carries the weight of its part. A weight counts the value that
/// many times without materializing the copies.
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
pub enum Aggregation {
    /// `Σ value × weight`.
    Sum,
    /// `Σ value × weight / Σ weight`. Empty lists yield the formula fallback.
    #[default]
    Average,
    /// Largest value; weights do not matter.
    Max,
}

impl Aggregation {
    /// Reduces `(value, weight)` pairs; `None` when there is nothing to
    /// contribute.
    pub fn reduce(self, values: &[(f64, u32)], fallback: f32) -> Option<f64> {
        let weighted_sum = || {
            values
                .iter()
                .map(|&(value, weight)| value * f64::from(weight))
                .sum::<f64>()
        };
        match self {
            Self::Sum if values.is_empty() => None,
            Self::Sum => Some(weighted_sum()),
            Self::Average => {
                let total: f64 = values.iter().map(|&(_, weight)| f64::from(weight)).sum();
                if total == 0.0 {
                    Some(f64::from(fallback))
                } else {
                    Some(weighted_sum() / total)
                }
            }
            Self::Max => values.iter().map(|&(value, _)| value).reduce(f64::max),
        }
    }
}

/// Which builder operation an aggregated value is fed into.
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
pub enum StatOperation {
    #[default]
    Update,
    Add,
    Multiply,
    MultiplyAll,
}

/// Output stat of a formula.
#[derive(Clone, Debug, PartialEq)]
pub enum StatTarget {
    Float(FloatStat),
    /// Tier targets ignore the operation: the highest tier wins.
    Tier(TierStat),
}

impl From<FloatStat> for StatTarget {
    fn from(stat: FloatStat) -> Self {
        Self::Float(stat)
    }
}

impl From<TierStat> for StatTarget {
    fn from(stat: TierStat) -> Self {
        Self::Tier(stat)
    }
}

/// One output stat computed from one material attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct StatFormula {
    target: StatTarget,
    attribute: String,
    stat_types: Vec<MaterialStatsId>,
    aggregation: Aggregation,
    operation: StatOperation,
    fallback: f32,
}

impl StatFormula {
    /// Averages `attribute` across every part into an `update` of `target`.
    pub fn new(target: impl Into<StatTarget>, attribute: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            attribute: attribute.into(),
            stat_types: Vec::new(),
            aggregation: Aggregation::Average,
            operation: StatOperation::Update,
            fallback: 0.0,
        }
    }

    /// Restricts the formula to parts of the given stat types.
    #[must_use]
    pub fn from_types<I, S>(mut self, stat_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<MaterialStatsId>,
    {
        self.stat_types = stat_types.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn aggregate(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    #[must_use]
    pub fn operation(mut self, operation: StatOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Value used by `Average` when no part contributes.
    #[must_use]
    pub fn fallback(mut self, fallback: f32) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn target(&self) -> &StatTarget {
        &self.target
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    fn reads(&self, stat_type: &MaterialStatsId) -> bool {
        self.stat_types.is_empty() || self.stat_types.contains(stat_type)
    }

    fn apply(&self, value: f64, builder: &mut ModifierStatsBuilder) {
        match &self.target {
            StatTarget::Float(stat) => {
                let value = value as f32;
                match self.operation {
                    StatOperation::Update => stat.update(builder, value),
                    StatOperation::Add => stat.add(builder, value),
                    StatOperation::Multiply => stat.multiply(builder, value),
                    StatOperation::MultiplyAll => stat.multiply_all(builder, value),
                }
            }
            StatTarget::Tier(stat) => stat.update(builder, value.max(0.0).round() as u32),
        }
    }
}

/// Turns a tool's material parts into stat contributions.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialStatProvider {
    name: String,
    required: Vec<MaterialStatsId>,
    other: Vec<MaterialStatsId>,
    formulas: Vec<StatFormula>,
}

impl MaterialStatProvider {
    pub fn new<I, S>(name: impl Into<String>, required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<MaterialStatsId>,
    {
        Self {
            name: name.into(),
            required: required.into_iter().map(Into::into).collect(),
            other: Vec::new(),
            formulas: Vec::new(),
        }
    }

    /// Stat types accepted but not required.
    #[must_use]
    pub fn with_other<I, S>(mut self, other: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<MaterialStatsId>,
    {
        self.other = other.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_formula(mut self, formula: StatFormula) -> Self {
        self.formulas.push(formula);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn required(&self) -> &[MaterialStatsId] {
        &self.required
    }

    pub fn other(&self) -> &[MaterialStatsId] {
        &self.other
    }

    pub fn formulas(&self) -> &[StatFormula] {
        &self.formulas
    }

    /// Checks a part list against this provider.
    ///
    /// # Errors
    ///
    /// [`MaterialError::UnknownStatType`] for a stat type outside
    /// `required ∪ other`, [`MaterialError::MissingRequired`] when no required
    /// type is present.
    pub fn validate(&self, stat_types: &[WeightedStatType]) -> Result<(), MaterialError> {
        if let Some(foreign) = stat_types.iter().find(|slot| {
            !self.required.contains(slot.stat_type()) && !self.other.contains(slot.stat_type())
        }) {
            return Err(MaterialError::UnknownStatType {
                provider: self.name.clone(),
                stat_type: foreign.stat_type().clone(),
            });
        }

        if !stat_types
            .iter()
            .any(|slot| self.required.contains(slot.stat_type()))
        {
            return Err(MaterialError::MissingRequired {
                provider: self.name.clone(),
                required: self.required.clone(),
            });
        }

        Ok(())
    }

    /// The attribute values a formula reads, paired with their part weight.
    pub fn weighted_values(
        &self,
        formula: &StatFormula,
        stat_types: &[WeightedStatType],
        materials: &[MaterialId],
        stats: &MaterialStatsCache,
    ) -> Vec<(f64, u32)> {
        stat_types
            .iter()
            .zip(materials)
            .filter(|(slot, _)| formula.reads(slot.stat_type()))
            .filter_map(|(slot, material)| {
                let value = stats.get(material, slot.stat_type()).get(formula.attribute())?;
                Some((f64::from(value), slot.weight().get()))
            })
            .collect()
    }

    /// Feeds every formula into `builder`.
    ///
    /// A material list whose length differs from the part list is ignored.
    pub fn apply(
        &self,
        stat_types: &[WeightedStatType],
        materials: &[MaterialId],
        stats: &MaterialStatsCache,
        builder: &mut ModifierStatsBuilder,
    ) {
        if stat_types.len() != materials.len() {
            return;
        }
        for formula in &self.formulas {
            let values = self.weighted_values(formula, stat_types, materials, stats);
            if let Some(value) = formula.aggregation.reduce(&values, formula.fallback) {
                formula.apply(value, builder);
            }
        }
    }
}

/// A part list that does not fit its provider.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MaterialError {
    #[error("material stat type {stat_type} is not accepted by provider {provider}")]
    UnknownStatType {
        provider: String,
        stat_type: MaterialStatsId,
    },

    #[error("provider {provider} needs at least one of {required:?}")]
    MissingRequired {
        provider: String,
        required: Vec<MaterialStatsId>,
    },
}

impl ForgeError for MaterialError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownStatType { .. } => "MATERIAL_UNKNOWN_STAT_TYPE",
            Self::MissingRequired { .. } => "MATERIAL_MISSING_REQUIRED",
        }
    }
}
