use crate::partition::ItemGroup;
use crate::types::{ItemId, Member};
use std::collections::BTreeMap;

/// Planned chop for one member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanEntry<'a> {
    pub member: Member<'a>,
    pub chop: usize,
}

/// Item identity to chop count, merged with "largest chop wins"
///
/// Every update consumes the plan and returns the next one, so a plan is
/// built as a fold over comparisons rather than patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChopPlan<'a> {
    entries: BTreeMap<&'a ItemId, PlanEntry<'a>>,
}

impl<'a> ChopPlan<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan that leaves every member of a group untouched
    #[must_use]
    pub fn zeroed(group: &ItemGroup<'a>) -> Self {
        group
            .members()
            .iter()
            .fold(Self::new(), |plan, member| plan.raise(*member, 0))
    }

    /// Record `chop` for a member unless a larger chop is already recorded
    #[must_use]
    pub fn raise(mut self, member: Member<'a>, chop: usize) -> Self {
        self.entries
            .entry(member.id)
            .and_modify(|entry| entry.chop = entry.chop.max(chop))
            .or_insert(PlanEntry { member, chop });
        self
    }

    /// Combine two plans; overlapping entries keep the larger chop
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        other
            .entries
            .into_values()
            .fold(self, |plan, entry| plan.raise(entry.member, entry.chop))
    }

    #[must_use]
    pub fn chop_for(&self, id: &ItemId) -> Option<usize> {
        self.entries.get(id).map(|entry| entry.chop)
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.entries.contains_key(id)
    }

    /// Entries ordered by item id
    pub fn entries(&self) -> impl Iterator<Item = &PlanEntry<'a>> {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn member(id: &ItemId) -> Member<'_> {
        Member {
            id,
            label: "label",
            direction: Direction::Ltr,
        }
    }

    #[test]
    fn test_raise_keeps_maximum() {
        let id = ItemId::from("1");
        let plan = ChopPlan::new()
            .raise(member(&id), 2)
            .raise(member(&id), 1)
            .raise(member(&id), 0);
        assert_eq!(plan.chop_for(&id), Some(2));

        let plan = plan.raise(member(&id), 3);
        assert_eq!(plan.chop_for(&id), Some(3));
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_merge_disjoint_and_overlapping() {
        let a = ItemId::from("a");
        let b = ItemId::from("b");
        let left = ChopPlan::new().raise(member(&a), 1);
        let right = ChopPlan::new().raise(member(&a), 4).raise(member(&b), 0);

        let merged = left.merge(right);
        assert_eq!(merged.chop_for(&a), Some(4));
        assert_eq!(merged.chop_for(&b), Some(0));
        assert!(merged.contains(&b));
    }

    #[test]
    fn test_zeroed_covers_group() {
        let a = ItemId::from("a");
        let b = ItemId::from("b");
        let group = ItemGroup::new("example.com", vec![member(&a), member(&b)]);
        let plan = ChopPlan::zeroed(&group);
        assert_eq!(plan.len(), 2);
        assert!(plan.entries().all(|entry| entry.chop == 0));
    }
}
