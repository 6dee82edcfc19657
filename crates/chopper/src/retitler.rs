use crate::applier::ChopApplier;
use crate::config::ChopperConfig;
use crate::error::{ChopError, Result};
use crate::partition::{ItemGroup, Partition};
use crate::plan::ChopPlan;
use crate::planner::plan_group;
use crate::sink::LabelSink;
use crate::types::{Item, PassStats};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::time::Instant;

/// Main entry point: compresses and resets the labels of one item set
///
/// A `Retitler` runs one pass at a time. A sink that calls back into the same
/// retitler while a pass is running gets [`ChopError::PassInProgress`].
pub struct Retitler {
    config: ChopperConfig,
    in_pass: Cell<bool>,
    last_pass: Cell<Option<PassStats>>,
}

impl Retitler {
    /// Create a retitler with a validated configuration
    pub fn new(config: ChopperConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            in_pass: Cell::new(false),
            last_pass: Cell::new(None),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &ChopperConfig {
        &self.config
    }

    /// Diagnostics of the most recent compression pass
    #[must_use]
    pub fn last_pass(&self) -> Option<PassStats> {
        self.last_pass.get()
    }

    /// Plan every group of `items`, keyed by group
    ///
    /// The unknown group is skipped. A group whose planning fails keeps all of
    /// its items at chop 0.
    pub fn plan_by_group<'a>(&self, items: &'a [Item]) -> BTreeMap<&'a str, ChopPlan<'a>> {
        let partition = Partition::build(items);
        partition
            .groups()
            .filter(|group| group.key() != self.config.unknown_group)
            .map(|group| (group.key(), settle(group, plan_group(group))))
            .collect()
    }

    /// Aggregate chop plan for `items`
    pub fn plan<'a>(&self, items: &'a [Item]) -> ChopPlan<'a> {
        self.plan_by_group(items)
            .into_values()
            .fold(ChopPlan::new(), ChopPlan::merge)
    }

    /// Recompute display labels for `items`
    pub fn compress<S: LabelSink + ?Sized>(
        &self,
        items: &[Item],
        sink: &mut S,
    ) -> Result<PassStats> {
        let _guard = PassGuard::enter(&self.in_pass)?;
        let started = Instant::now();

        let groups = self.plan_by_group(items);
        let group_count = groups.len();
        let plan = groups.into_values().fold(ChopPlan::new(), ChopPlan::merge);
        let chopped = ChopApplier::new(&self.config).apply(&plan, sink);

        let stats = PassStats {
            items: items.len(),
            groups: group_count,
            chopped,
            elapsed: started.elapsed(),
        };
        sink.labels_recomputed(&stats);
        self.last_pass.set(Some(stats));

        log::debug!(
            "took {:.3} seconds for {} items ({} chopped)",
            stats.elapsed.as_secs_f64(),
            stats.items,
            stats.chopped
        );
        Ok(stats)
    }

    /// Restore every readable item's full label
    pub fn reset<S: LabelSink + ?Sized>(&self, items: &[Item], sink: &mut S) -> Result<()> {
        let _guard = PassGuard::enter(&self.in_pass)?;
        for item in items {
            if let Some(label) = item.label.as_deref() {
                sink.set_label(&item.id, label);
            }
        }
        sink.labels_reset();
        Ok(())
    }
}

impl Default for Retitler {
    fn default() -> Self {
        Self {
            config: ChopperConfig::default(),
            in_pass: Cell::new(false),
            last_pass: Cell::new(None),
        }
    }
}

fn settle<'a>(group: &ItemGroup<'a>, planned: Result<ChopPlan<'a>>) -> ChopPlan<'a> {
    planned.unwrap_or_else(|err| {
        log::warn!("Leaving group '{}' uncompressed: {err}", group.key());
        ChopPlan::zeroed(group)
    })
}

/// Holds the one-pass flag; released on drop
struct PassGuard<'r> {
    flag: &'r Cell<bool>,
}

impl<'r> PassGuard<'r> {
    fn enter(flag: &'r Cell<bool>) -> Result<Self> {
        if flag.replace(true) {
            return Err(ChopError::PassInProgress);
        }
        Ok(Self { flag })
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
