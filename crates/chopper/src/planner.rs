//! Chop planning for one group.
//!
//! Members are sorted by their comparable text so near-duplicates become
//! neighbours, then each adjacent pair decides how many leading words the two
//! share. A pair may only be chopped up to the last word (counted from the
//! front) that still differs between them, so a chop never eats into a
//! distinguishing suffix.

use crate::error::{ChopError, Result};
use crate::partition::ItemGroup;
use crate::plan::ChopPlan;
use crate::types::Member;
use crate::words::ComparableLabel;

/// Compute the chop plan for one group
///
/// Every member of `group` has exactly one entry in the returned plan.
pub fn plan_group<'a>(group: &ItemGroup<'a>) -> Result<ChopPlan<'a>> {
    let mut sorted: Vec<(Member<'a>, ComparableLabel<'a>)> = group
        .members()
        .iter()
        .map(|member| (*member, ComparableLabel::new(member.label, member.direction)))
        .collect();
    sorted.sort_by(|a, b| a.1.cmp_comparable(&b.1));

    let plan = scan(&sorted);
    ensure_complete(group, &plan)?;
    Ok(plan)
}

fn scan<'a>(sorted: &[(Member<'a>, ComparableLabel<'a>)]) -> ChopPlan<'a> {
    let len = sorted.len();
    let mut plan = ChopPlan::new();

    for i in 0..len {
        let (member, cur) = &sorted[i];
        plan = plan.raise(*member, 0);
        if i + 1 == len {
            break;
        }

        // Identical titles behave as one; look past them for a real neighbour.
        let mut next = i + 1;
        while cur.same_text(&sorted[next].1) {
            next += 1;
            if next == len {
                let chop = plan.chop_for(member.id).unwrap_or(0);
                return raise_all(plan, &sorted[i..], chop);
            }
        }
        // Copies of a title take the chop already recorded for the first copy.
        let inherited = plan.chop_for(member.id).unwrap_or(0);
        plan = raise_all(plan, &sorted[i..next], inherited);

        let other = &sorted[next].1;
        let max_chop = trailing_bound(cur, other);
        let chop = match leading_divergence(cur, other, max_chop) {
            Some(j) if j > 0 => j.min(max_chop),
            _ => 0,
        };
        plan = raise_all(plan, &sorted[i..=next], chop);
    }

    plan
}

fn raise_all<'a>(
    plan: ChopPlan<'a>,
    run: &[(Member<'a>, ComparableLabel<'a>)],
    chop: usize,
) -> ChopPlan<'a> {
    run.iter()
        .fold(plan, |plan, (member, _)| plan.raise(*member, chop))
}

/// Furthest chop allowed between two neighbours
///
/// Walks both labels from the end; the first differing word (indexed from the
/// front of `cur`) is the bound. Labels sharing their whole compared tail get 0.
pub fn trailing_bound(cur: &ComparableLabel<'_>, next: &ComparableLabel<'_>) -> usize {
    let tab_last = cur.last_index();
    let next_last = next.last_index();
    let shorter = tab_last.min(next_last);

    (0..shorter)
        .find(|&j| !cur.word_eq(tab_last - j, next, next_last - j))
        .map_or(0, |j| tab_last - j)
}

/// First leading word index, up to `max_chop`, where the labels differ
pub fn leading_divergence(
    cur: &ComparableLabel<'_>,
    next: &ComparableLabel<'_>,
    max_chop: usize,
) -> Option<usize> {
    let shorter = cur.word_count().min(next.word_count());
    (0..shorter)
        .take_while(|&j| j <= max_chop)
        .find(|&j| !cur.word_eq(j, next, j))
}

fn ensure_complete(group: &ItemGroup<'_>, plan: &ChopPlan<'_>) -> Result<()> {
    let missing = group
        .members()
        .iter()
        .filter(|member| !plan.contains(member.id))
        .count();
    if missing > 0 {
        return Err(ChopError::IncompletePlan {
            group: group.key().to_string(),
            missing,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Item, ItemId};
    use crate::words::{to_comparable, tokenize};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn items(labels: &[&str]) -> Vec<Item> {
        labels
            .iter()
            .enumerate()
            .map(|(idx, label)| Item::new(idx.to_string(), *label, "example.com"))
            .collect()
    }

    fn chops(items: &[Item]) -> Vec<usize> {
        let members: Vec<_> = items.iter().filter_map(Member::from_item).collect();
        let group = ItemGroup::new("example.com", members);
        let plan = plan_group(&group).expect("plan");
        items
            .iter()
            .map(|item| plan.chop_for(&item.id).expect("entry"))
            .collect()
    }

    fn view(label: &str) -> ComparableLabel<'_> {
        ComparableLabel::new(label, Direction::Ltr)
    }

    #[test]
    fn test_trailing_bound() {
        assert_eq!(trailing_bound(&view("a b c One"), &view("a b c Two")), 3);
        assert_eq!(trailing_bound(&view("News - Site A"), &view("Weather - Site A")), 0);
        assert_eq!(trailing_bound(&view("a x c"), &view("a y c")), 1);
        assert_eq!(trailing_bound(&view("single"), &view("other")), 0);
    }

    #[test]
    fn test_leading_divergence_respects_bound() {
        assert_eq!(leading_divergence(&view("a b c"), &view("a b d"), 2), Some(2));
        assert_eq!(leading_divergence(&view("a b x"), &view("a b y x"), 1), None);
        assert_eq!(leading_divergence(&view("x b"), &view("y b"), 0), Some(0));
        assert_eq!(leading_divergence(&view("a b"), &view("a b c"), 5), None);
    }

    #[test]
    fn test_basic_adjacent_chop() {
        let items = items(&["Shared Prefix - Page One", "Shared Prefix - Page Two"]);
        assert_eq!(chops(&items), vec![4, 4]);
    }

    #[test]
    fn test_shared_suffix_blocks_chop() {
        let items = items(&["News - Site A", "Weather - Site A"]);
        assert_eq!(chops(&items), vec![0, 0]);
    }

    #[test]
    fn test_chop_stops_before_shared_suffix() {
        // Tails share "- Forum"; the chop may reach the differing topic word only.
        let items = items(&["Forum Topic alpha - Forum", "Forum Topic beta - Forum"]);
        assert_eq!(chops(&items), vec![2, 2]);
    }

    #[test]
    fn test_singleton_group() {
        let items = items(&["Only One Page"]);
        assert_eq!(chops(&items), vec![0]);
    }

    #[test]
    fn test_identical_titles_share_chop() {
        let items = items(&["Alpha Beta", "Alpha Beta", "Alpha Beta"]);
        assert_eq!(chops(&items), vec![0, 0, 0]);
    }

    #[test]
    fn test_identical_run_followed_by_neighbour() {
        let items = items(&[
            "Docs Guide Intro",
            "Docs Guide Intro",
            "Docs Guide Setup",
        ]);
        assert_eq!(chops(&items), vec![2, 2, 2]);
    }

    #[test]
    fn test_identical_tail_inherits_earlier_chop() {
        let items = items(&["Wiki Page A", "Wiki Page B", "Wiki Page B"]);
        assert_eq!(chops(&items), vec![2, 2, 2]);
    }

    #[test]
    fn test_identical_run_keeps_predecessor_chop() {
        // The duplicated title is chopped against "B" before the run meets
        // "Zeta", which shares nothing with it; both copies keep that chop.
        let items = items(&[
            "Docs Page C",
            "Docs Page B",
            "Docs Page C",
            "Zeta Index",
        ]);
        assert_eq!(chops(&items), vec![2, 2, 2, 0]);
    }

    #[test]
    fn test_max_rule_across_pairs() {
        // Sorted: "Site A x", "Site B One", "Site B Two"
        let items = items(&["Site B Two", "Site A x", "Site B One"]);
        assert_eq!(chops(&items), vec![2, 1, 2]);
    }

    #[test]
    fn test_first_words_differ() {
        let items = items(&["Apples and pears", "Bananas and pears"]);
        assert_eq!(chops(&items), vec![0, 0]);
    }

    #[test]
    fn test_rtl_group_compares_from_the_end() {
        // Reading order of an RTL label is right to left, so the words shared
        // at the logical end are the leading comparable words.
        let items: Vec<Item> = ["One Page - Site", "Two Page - Site"]
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                Item::new(idx.to_string(), *label, "example.com").direction(Direction::Rtl)
            })
            .collect();
        assert_eq!(chops(&items), vec![3, 3]);
    }

    #[test]
    fn test_every_member_has_entry() {
        let items = items(&["b", "a", "c d", "c e", "c e", ""]);
        let members: Vec<_> = items.iter().filter_map(Member::from_item).collect();
        let group = ItemGroup::new("example.com", members);
        let plan = plan_group(&group).unwrap();
        assert_eq!(plan.len(), 5);
        assert!(!plan.contains(&ItemId::from("5")));
    }

    #[test]
    fn test_incomplete_plan_detected() {
        let items = items(&["a b", "a c"]);
        let members: Vec<_> = items.iter().filter_map(Member::from_item).collect();
        let group = ItemGroup::new("example.com", members);
        let err = ensure_complete(&group, &ChopPlan::new()).unwrap_err();
        assert!(matches!(err, ChopError::IncompletePlan { missing: 2, .. }));
    }

    /// Word-by-word planning over reversed comparable strings
    fn reference_chops(labels: &[(&str, Direction)]) -> Vec<usize> {
        fn raise(chops: &mut [Option<usize>], idx: usize, chop: usize) {
            chops[idx] = Some(chops[idx].map_or(chop, |old| old.max(chop)));
        }

        let comparable: Vec<String> = labels
            .iter()
            .map(|(label, direction)| to_comparable(label, *direction))
            .collect();
        let mut order: Vec<usize> = (0..labels.len()).collect();
        order.sort_by(|&a, &b| comparable[a].cmp(&comparable[b]));

        let len = order.len();
        let mut chops = vec![None; len];
        'scan: for i in 0..len {
            let a = order[i];
            raise(&mut chops, a, 0);
            if i + 1 == len {
                break;
            }

            let inherited = chops[a].unwrap_or(0);
            let mut next = i + 1;
            while comparable[a] == comparable[order[next]] {
                next += 1;
                if next == len {
                    for &k in &order[i..] {
                        raise(&mut chops, k, inherited);
                    }
                    break 'scan;
                }
            }
            for &k in &order[i..next] {
                raise(&mut chops, k, inherited);
            }

            let cur = tokenize(&comparable[a]);
            let other = tokenize(&comparable[order[next]]);
            let (tab_last, next_last) = (cur.len() - 1, other.len() - 1);
            let mut max_chop = 0;
            for j in 0..tab_last.min(next_last) {
                if cur[tab_last - j] != other[next_last - j] {
                    max_chop = tab_last - j;
                    break;
                }
            }
            let mut chop = 0;
            for j in 0..cur.len().min(other.len()) {
                if j > max_chop {
                    break;
                }
                if cur[j] != other[j] {
                    if j > 0 {
                        chop = j.min(max_chop);
                    }
                    break;
                }
            }
            for &k in &order[i..=next] {
                raise(&mut chops, k, chop);
            }
        }

        chops.into_iter().map(|chop| chop.unwrap_or(0)).collect()
    }

    fn label_strategy() -> impl Strategy<Value = String> {
        let word = prop::sample::select(vec!["a", "b", "c", "-", "ab", "ba", ""]);
        prop::collection::vec(word, 1..5).prop_map(|words| words.join(" "))
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Direction::Ltr), Just(Direction::Rtl)]
    }

    fn check_against_reference(
        entries: &[(String, Direction)],
    ) -> std::result::Result<(), TestCaseError> {
        let items: Vec<Item> = entries
            .iter()
            .enumerate()
            .map(|(idx, (label, direction))| {
                Item::new(idx.to_string(), label.as_str(), "example.com").direction(*direction)
            })
            .collect();
        let members: Vec<_> = items.iter().filter_map(Member::from_item).collect();
        let labels: Vec<(&str, Direction)> = members
            .iter()
            .map(|member| (member.label, member.direction))
            .collect();
        let expected = reference_chops(&labels);

        let group = ItemGroup::new("example.com", members.clone());
        let plan = plan_group(&group).expect("plan");
        let got: Vec<usize> = members
            .iter()
            .map(|member| plan.chop_for(member.id).unwrap_or(usize::MAX))
            .collect();
        prop_assert_eq!(got, expected, "labels: {:?}", labels);
        Ok(())
    }

    proptest! {
        #[test]
        fn test_ltr_plan_matches_reference(
            labels in prop::collection::vec(label_strategy(), 0..8),
        ) {
            let entries: Vec<_> = labels
                .into_iter()
                .map(|label| (label, Direction::Ltr))
                .collect();
            check_against_reference(&entries)?;
        }

        #[test]
        fn test_mixed_direction_plan_matches_reference(
            entries in prop::collection::vec((label_strategy(), direction_strategy()), 0..8),
        ) {
            check_against_reference(&entries)?;
        }
    }
}
