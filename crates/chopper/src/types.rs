use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Stable identity of an item (a tab's linked panel, a window id, ...)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Text direction of a label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}

/// A labelled item as supplied by the host for one pass
///
/// `label` and `group_key` are optional so that an item whose fields could not
/// be read is still representable; such items are excluded from compression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identity
    pub id: ItemId,

    /// Full, un-chopped label
    #[serde(default)]
    pub label: Option<String>,

    /// Text direction of the label
    #[serde(default)]
    pub direction: Direction,

    /// Precomputed grouping key (e.g. site domain)
    #[serde(default)]
    pub group_key: Option<String>,

    /// Pinned items are never compressed
    #[serde(default)]
    pub pinned: bool,
}

impl Item {
    /// Create a left-to-right, unpinned item
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        group_key: impl Into<String>,
    ) -> Self {
        Self {
            id: ItemId::new(id),
            label: Some(label.into()),
            direction: Direction::Ltr,
            group_key: Some(group_key.into()),
            pinned: false,
        }
    }

    /// Builder: set direction
    #[must_use]
    pub const fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Builder: set pinned flag
    #[must_use]
    pub const fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Missing label or group key
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        self.label.is_none() || self.group_key.is_none()
    }

    /// Pinned, malformed, or empty-labelled items take no part in compression
    #[must_use]
    pub fn excluded(&self) -> bool {
        self.pinned
            || self.label.as_deref().map_or(true, str::is_empty)
            || self.group_key.is_none()
    }
}

/// A non-excluded item borrowed into a group for one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member<'a> {
    pub id: &'a ItemId,
    pub label: &'a str,
    pub direction: Direction,
}

impl<'a> Member<'a> {
    /// Borrow an item as a group member; `None` if the item is excluded
    #[must_use]
    pub fn from_item(item: &'a Item) -> Option<Self> {
        if item.excluded() {
            return None;
        }
        Some(Self {
            id: &item.id,
            label: item.label.as_deref()?,
            direction: item.direction,
        })
    }
}

/// Diagnostics for one compression pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassStats {
    /// Items supplied to the pass
    pub items: usize,

    /// Groups that were planned ("unknown" not counted)
    pub groups: usize,

    /// Items whose display label lost at least one word
    pub chopped: usize,

    /// Wall time of the pass
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

fn serialize_millis<S: serde::Serializer>(
    value: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
}
