//! Serializable descriptions of modules, definitions and modifiers.
//!
//! Specs are plain data; [`crate::ModuleFactory`] turns them into live modules.
//! Any serde format can carry them, which keeps this crate independent of a
//! particular definition file layout.

use std::collections::BTreeMap;

use forge_core::modifier::priority;
use forge_core::{
    DefinitionId, HookId, ItemPredicate, ItemProfile, ItemTag, ModifierId, StatOperation,
    WeightedStatType,
};

use crate::hooks::{Rarity, ToolAction};

/// One stock module and its parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum ModuleSpec {
    SetStats {
        #[cfg_attr(feature = "serde", serde(default))]
        stats: BTreeMap<String, f32>,
        #[cfg_attr(feature = "serde", serde(default))]
        tiers: BTreeMap<String, u32>,
    },
    StatBoost {
        stat: String,
        operation: StatOperation,
        value: f32,
        #[cfg_attr(feature = "serde", serde(default))]
        condition: ItemPredicate,
    },
    MaterialStats {
        provider: String,
        parts: Vec<WeightedStatType>,
    },
    Tooltip {
        lines: Vec<String>,
    },
    ToolAction {
        actions: Vec<ToolAction>,
    },
    Interaction {
        target: ItemTag,
        message: String,
    },
    Slots {
        slots: u32,
    },
    Rarity {
        rarity: Rarity,
    },
}

/// A module plus optional overrides of its requested hooks and priority.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleEntrySpec {
    pub module: ModuleSpec,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub hooks: Option<Vec<HookId>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub priority: Option<i32>,
}

impl ModuleEntrySpec {
    pub fn new(module: ModuleSpec) -> Self {
        Self {
            module,
            hooks: None,
            priority: None,
        }
    }

    #[must_use]
    pub fn with_hooks<I, H>(mut self, hooks: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<HookId>,
    {
        self.hooks = Some(hooks.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }
}

impl From<ModuleSpec> for ModuleEntrySpec {
    fn from(module: ModuleSpec) -> Self {
        Self::new(module)
    }
}

/// A tool definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefinitionSpec {
    pub id: DefinitionId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub item: ItemProfile,
    pub modules: Vec<ModuleEntrySpec>,
}

/// A modifier definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierSpec {
    pub id: ModifierId,
    #[cfg_attr(feature = "serde", serde(default = "default_priority"))]
    pub priority: i32,
    pub modules: Vec<ModuleEntrySpec>,
}

#[cfg(feature = "serde")]
fn default_priority() -> i32 {
    priority::DEFAULT
}

impl ModifierSpec {
    pub fn new(id: impl Into<ModifierId>, modules: Vec<ModuleEntrySpec>) -> Self {
        Self {
            id: id.into(),
            priority: priority::DEFAULT,
            modules,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn modifier_spec_from_json() {
        let json = r#"{
            "id": "haste",
            "modules": [
                {
                    "module": {
                        "type": "stat_boost",
                        "stat": "mining_speed",
                        "operation": "multiply",
                        "value": 0.25,
                        "condition": { "tag": "harvest" }
                    }
                },
                {
                    "module": { "type": "tooltip", "lines": ["Haste"] },
                    "priority": 5
                }
            ]
        }"#;
        let spec: ModifierSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.priority, priority::DEFAULT);
        assert_eq!(spec.modules.len(), 2);
        assert_eq!(
            spec.modules[0].module,
            ModuleSpec::StatBoost {
                stat: "mining_speed".to_string(),
                operation: StatOperation::Multiply,
                value: 0.25,
                condition: ItemPredicate::tag("harvest"),
            }
        );
        assert_eq!(spec.modules[1].priority, Some(5));
    }

    #[test]
    fn definition_spec_json_round_trip() {
        let spec = DefinitionSpec {
            id: DefinitionId::new("hatchet"),
            item: ItemProfile::new().with_tag("harvest"),
            modules: vec![
                ModuleEntrySpec::new(ModuleSpec::Slots { slots: 2 }),
                ModuleEntrySpec::new(ModuleSpec::ToolAction {
                    actions: vec![ToolAction::Strip],
                })
                .with_hooks(["forge:tool_action"]),
            ],
        };
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(serde_json::from_str::<DefinitionSpec>(&json).unwrap(), spec);
    }
}
