//! String identifiers used across definitions, hooks and stats.
//!
//! Every id wraps a `Cow<'static, str>` so built-in tokens can be declared
//! from string literals without allocating, while ids read from definition
//! data own their text. All ids borrow as `str` for map lookups.

use std::borrow::{Borrow, Cow};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(Cow<'static, str>);

        impl $name {
            /// Creates an id from a string literal without allocating.
            pub const fn from_static(id: &'static str) -> Self {
                Self(Cow::Borrowed(id))
            }

            pub fn new(id: impl Into<String>) -> Self {
                Self(Cow::Owned(id.into()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&'static str> for $name {
            fn from(id: &'static str) -> Self {
                Self::from_static(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(Cow::Owned(id))
            }
        }
    };
}

string_id!(
    /// Identity of a hook (capability) token.
    HookId
);

string_id!(
    /// Identity of a stat token.
    StatId
);

string_id!(
    /// Identity of a tool or armor definition.
    DefinitionId
);

string_id!(
    /// Identity of a stacking modifier.
    ModifierId
);

string_id!(
    /// Identity of a material.
    MaterialId
);

string_id!(
    /// Identity of a material stat type, i.e. the part slot kind a material
    /// fills (`head`, `handle`, `binding`, ...).
    MaterialStatsId
);

string_id!(
    /// Tag carried by an item profile, used to scope stats and conditions.
    ItemTag
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn static_and_owned_ids_compare_equal() {
        assert_eq!(HookId::from_static("forge:tool_stats"), HookId::new("forge:tool_stats"));
    }

    #[test]
    fn ids_borrow_as_str_for_lookups() {
        let mut map = HashMap::new();
        map.insert(StatId::new("durability"), 1);
        assert_eq!(map.get("durability"), Some(&1));
        assert_eq!(map.get("mining_speed"), None);
    }
}
