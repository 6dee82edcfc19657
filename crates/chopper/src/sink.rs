use crate::types::{ItemId, PassStats};
use std::collections::BTreeMap;

/// Receiver of the effects of a pass
///
/// The host implements this to update its UI. Only `set_label` is required.
pub trait LabelSink {
    /// Set the displayed label of an item
    fn set_label(&mut self, id: &ItemId, label: &str);

    /// The displayed label of an item was recomputed by a compression pass
    fn label_changed(&mut self, _id: &ItemId) {}

    /// A compression pass finished
    fn labels_recomputed(&mut self, _stats: &PassStats) {}

    /// A reset finished
    fn labels_reset(&mut self) {}
}

/// In-memory sink collecting the latest label per item
#[derive(Debug, Clone, Default)]
pub struct LabelMap {
    labels: BTreeMap<ItemId, String>,
    changed: usize,
    passes: usize,
    resets: usize,
}

impl LabelMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn label(&self, id: &ItemId) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    pub fn labels(&self) -> impl Iterator<Item = (&ItemId, &str)> {
        self.labels.iter().map(|(id, label)| (id, label.as_str()))
    }

    #[must_use]
    pub fn into_labels(self) -> BTreeMap<ItemId, String> {
        self.labels
    }

    /// Number of `label_changed` notifications received
    #[must_use]
    pub const fn changed(&self) -> usize {
        self.changed
    }

    /// Number of completed compression passes
    #[must_use]
    pub const fn passes(&self) -> usize {
        self.passes
    }

    /// Number of completed resets
    #[must_use]
    pub const fn resets(&self) -> usize {
        self.resets
    }
}

impl LabelSink for LabelMap {
    fn set_label(&mut self, id: &ItemId, label: &str) {
        self.labels.insert(id.clone(), label.to_string());
    }

    fn label_changed(&mut self, _id: &ItemId) {
        self.changed += 1;
    }

    fn labels_recomputed(&mut self, _stats: &PassStats) {
        self.passes += 1;
    }

    fn labels_reset(&mut self) {
        self.resets += 1;
    }
}
