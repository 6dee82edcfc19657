//! Word tokenization and direction handling.
//!
//! Labels are split on every single space; a run of spaces yields empty words
//! rather than being collapsed. Right-to-left labels are compared as if their
//! characters were reversed, which reverses the word order and the characters
//! inside each word. [`ComparableLabel`] keeps the logical words, walks them
//! back to front for right-to-left labels and only reverses characters when
//! two labels of opposite direction are compared.

use crate::types::Direction;
use std::cmp::Ordering;

/// Comparable form of a label: reversed for right-to-left text
#[must_use]
pub fn to_comparable(label: &str, direction: Direction) -> String {
    match direction {
        Direction::Ltr => label.to_string(),
        Direction::Rtl => label.chars().rev().collect(),
    }
}

/// Inverse of [`to_comparable`]
#[must_use]
pub fn from_comparable(comparable: &str, direction: Direction) -> String {
    to_comparable(comparable, direction)
}

/// Split on single spaces without collapsing runs
#[must_use]
pub fn tokenize(s: &str) -> Vec<&str> {
    s.split(' ').collect()
}

/// Join words with a single space
#[must_use]
pub fn detokenize(words: &[&str]) -> String {
    words.join(" ")
}

/// A label viewed as the word sequence used for comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparableLabel<'a> {
    label: &'a str,
    direction: Direction,
    /// Logical words, in comparison order
    words: Vec<&'a str>,
}

impl<'a> ComparableLabel<'a> {
    pub fn new(label: &'a str, direction: Direction) -> Self {
        let words = match direction {
            Direction::Ltr => label.split(' ').collect(),
            Direction::Rtl => label.split(' ').rev().collect(),
        };
        Self {
            label,
            direction,
            words,
        }
    }

    #[must_use]
    pub fn words(&self) -> &[&'a str] {
        &self.words
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Index of the last word (0 for a single word)
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.words.len().saturating_sub(1)
    }

    /// Compare word `i` of this label with word `j` of `other`
    ///
    /// Out-of-range indices never match. Words of opposite directions are
    /// compared with one side reversed, as their comparable strings would be.
    #[must_use]
    pub fn word_eq(&self, i: usize, other: &Self, j: usize) -> bool {
        match (self.words.get(i), other.words.get(j)) {
            (Some(a), Some(b)) if self.direction == other.direction => a == b,
            (Some(a), Some(b)) => a.chars().eq(b.chars().rev()),
            _ => false,
        }
    }

    /// Same comparable text
    #[must_use]
    pub fn same_text(&self, other: &Self) -> bool {
        self.cmp_comparable(other) == Ordering::Equal
    }

    /// Plain code-point ordering of the comparable strings
    #[must_use]
    pub fn cmp_comparable(&self, other: &Self) -> Ordering {
        let (a, b) = (self.label, other.label);
        match (self.direction, other.direction) {
            (Direction::Ltr, Direction::Ltr) => a.cmp(b),
            (Direction::Rtl, Direction::Rtl) => a.chars().rev().cmp(b.chars().rev()),
            (Direction::Ltr, Direction::Rtl) => a.chars().cmp(b.chars().rev()),
            (Direction::Rtl, Direction::Ltr) => a.chars().rev().cmp(b.chars()),
        }
    }

    /// Display label after dropping `chop` leading comparable words
    ///
    /// `chop` is clamped to the word count; dropping every word yields "".
    #[must_use]
    pub fn render(&self, chop: usize) -> String {
        let chop = chop.min(self.words.len());
        let kept = &self.words[chop..];
        match self.direction {
            Direction::Ltr => detokenize(kept),
            Direction::Rtl => {
                let logical: Vec<&str> = kept.iter().rev().copied().collect();
                detokenize(&logical)
            }
        }
    }

    /// The words removed by a chop, in display order
    #[must_use]
    pub fn removed(&self, chop: usize) -> String {
        let chop = chop.min(self.words.len());
        let dropped = &self.words[..chop];
        match self.direction {
            Direction::Ltr => detokenize(dropped),
            Direction::Rtl => {
                let logical: Vec<&str> = dropped.iter().rev().copied().collect();
                detokenize(&logical)
            }
        }
    }
}
