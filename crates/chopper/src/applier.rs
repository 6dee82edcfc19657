use crate::config::ChopperConfig;
use crate::plan::{ChopPlan, PlanEntry};
use crate::sink::LabelSink;
use crate::types::Member;
use crate::words::ComparableLabel;

/// Display label produced for one plan entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub label: String,
    /// Words actually removed, after clamping and separator handling
    pub chop: usize,
}

/// Turns a chop plan into display labels
pub struct ChopApplier<'c> {
    config: &'c ChopperConfig,
}

impl<'c> ChopApplier<'c> {
    #[must_use]
    pub const fn new(config: &'c ChopperConfig) -> Self {
        Self { config }
    }

    /// Drop `chop` leading comparable words from a member's label
    #[must_use]
    pub fn render(&self, member: &Member<'_>, chop: usize) -> Rendered {
        let view = ComparableLabel::new(member.label, member.direction);
        let words = view.words();
        let mut chop = chop.min(words.len());

        // Only ever shortens the chop, so the planned bound still holds.
        if self.config.skip_leading_separator {
            while chop > 0 && chop < words.len() && self.config.is_separator(words[chop]) {
                chop -= 1;
            }
        }

        if chop > 0 {
            log::debug!("{} :: {}", view.removed(chop), member.label);
        }

        Rendered {
            label: view.render(chop),
            chop,
        }
    }

    /// Emit the display label of every planned item; returns how many were chopped
    ///
    /// Items with an empty label are skipped.
    pub fn apply<S: LabelSink + ?Sized>(&self, plan: &ChopPlan<'_>, sink: &mut S) -> usize {
        plan.entries()
            .filter(|entry| !entry.member.label.is_empty())
            .map(|entry| self.emit(entry, sink))
            .filter(|&chop| chop > 0)
            .count()
    }

    fn emit<S: LabelSink + ?Sized>(&self, entry: &PlanEntry<'_>, sink: &mut S) -> usize {
        let rendered = self.render(&entry.member, entry.chop);
        sink.set_label(entry.member.id, &rendered.label);
        sink.label_changed(entry.member.id);
        rendered.chop
    }
}
