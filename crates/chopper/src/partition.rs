use crate::types::{Item, Member};
use std::collections::BTreeMap;

/// Members sharing one group key, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemGroup<'a> {
    key: &'a str,
    members: Vec<Member<'a>>,
}

impl<'a> ItemGroup<'a> {
    pub fn new(key: &'a str, members: Vec<Member<'a>>) -> Self {
        Self { key, members }
    }

    #[must_use]
    pub fn key(&self) -> &'a str {
        self.key
    }

    #[must_use]
    pub fn members(&self) -> &[Member<'a>] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Result of splitting one pass's items by group key
#[derive(Debug, Clone, Default)]
pub struct Partition<'a> {
    groups: BTreeMap<&'a str, ItemGroup<'a>>,
    excluded: usize,
    malformed: usize,
}

impl<'a> Partition<'a> {
    /// Group items by key, dropping pinned, empty-labelled and malformed items
    pub fn build(items: &'a [Item]) -> Self {
        let mut partition = Self::default();

        for item in items {
            if item.is_malformed() {
                log::debug!("Skipping item {} with unreadable label or group", item.id);
                partition.malformed += 1;
                continue;
            }
            let (Some(member), Some(key)) = (Member::from_item(item), item.group_key.as_deref())
            else {
                partition.excluded += 1;
                continue;
            };
            partition
                .groups
                .entry(key)
                .or_insert_with(|| ItemGroup::new(key, Vec::new()))
                .members
                .push(member);
        }

        partition
    }

    /// All groups, including the one keyed by the unknown sentinel
    pub fn groups(&self) -> impl Iterator<Item = &ItemGroup<'a>> {
        self.groups.values()
    }

    #[must_use]
    pub fn group(&self, key: &str) -> Option<&ItemGroup<'a>> {
        self.groups.get(key)
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Pinned or empty-labelled items
    #[must_use]
    pub const fn excluded(&self) -> usize {
        self.excluded
    }

    /// Items missing a label or group key
    #[must_use]
    pub const fn malformed(&self) -> usize {
        self.malformed
    }
}
