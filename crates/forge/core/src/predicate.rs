//! Item profiles and the predicates that scope stats and modules to them.

use std::collections::BTreeSet;

use crate::id::ItemTag;

/// The tags of the item a stat pass runs for (tool class, armor slot, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemProfile {
    tags: BTreeSet<ItemTag>,
}

/// Profile with no tags, shared by contexts that do not name an item.
pub(crate) static UNTAGGED: ItemProfile = ItemProfile {
    tags: BTreeSet::new(),
};

impl ItemProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<ItemTag>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn insert(&mut self, tag: impl Into<ItemTag>) {
        self.tags.insert(tag.into());
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &ItemTag> + '_ {
        self.tags.iter()
    }
}

impl<T: Into<ItemTag>> FromIterator<T> for ItemProfile {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Condition over an [`ItemProfile`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemPredicate {
    /// Matches every item.
    #[default]
    Any,
    /// Matches items carrying the tag.
    Tag(ItemTag),
    /// Matches when every inner predicate matches.
    All(Vec<ItemPredicate>),
    /// Matches when at least one inner predicate matches.
    AnyOf(Vec<ItemPredicate>),
    /// Inverts the inner predicate.
    Not(Box<ItemPredicate>),
}

impl ItemPredicate {
    pub fn tag(tag: impl Into<ItemTag>) -> Self {
        Self::Tag(tag.into())
    }

    pub fn matches(&self, item: &ItemProfile) -> bool {
        match self {
            Self::Any => true,
            Self::Tag(tag) => item.has_tag(tag.as_str()),
            Self::All(inner) => inner.iter().all(|p| p.matches(item)),
            Self::AnyOf(inner) => inner.iter().any(|p| p.matches(item)),
            Self::Not(inner) => !inner.matches(item),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}
