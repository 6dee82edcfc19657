//! # Retitle Chopper
//!
//! Shortens groups of near-duplicate labels (browser tab titles, window
//! titles, ...) by dropping the leading words they share, without ever making
//! two different labels of the same group look alike.
//!
//! ## Architecture
//!
//! ```text
//! Item[]
//!     │
//!     ├──> Partition (by group key)
//!     │      └─ drop pinned, empty and malformed items
//!     │
//!     ├──> Chop Planner (per group, "unknown" skipped)
//!     │      ├─ sort by comparable text
//!     │      ├─ bound each neighbour pair by its shared tail
//!     │      └─ fold pair chops into a max-wins ChopPlan
//!     │
//!     └──> Chop Applier
//!            ├─ drop leading words (right-to-left aware)
//!            └─ emit labels to a LabelSink
//! ```
//!
//! ## Example
//!
//! ```rust
//! use retitle_chopper::{Item, ItemId, LabelMap, Retitler};
//!
//! let items = vec![
//!     Item::new("1", "Shared Prefix - Page One", "example.com"),
//!     Item::new("2", "Shared Prefix - Page Two", "example.com"),
//! ];
//!
//! let retitler = Retitler::default();
//! let mut labels = LabelMap::new();
//! retitler.compress(&items, &mut labels).unwrap();
//!
//! assert_eq!(labels.label(&ItemId::from("1")), Some("One"));
//! assert_eq!(labels.label(&ItemId::from("2")), Some("Two"));
//! ```

mod applier;
mod config;
mod error;
mod partition;
mod plan;
mod planner;
mod retitler;
mod sink;
mod types;
pub mod words;

pub use applier::{ChopApplier, Rendered};
pub use config::{ChopperConfig, UNKNOWN_GROUP};
pub use error::{ChopError, Result};
pub use partition::{ItemGroup, Partition};
pub use plan::{ChopPlan, PlanEntry};
pub use planner::{leading_divergence, plan_group, trailing_bound};
pub use retitler::Retitler;
pub use sink::{LabelMap, LabelSink};
pub use types::{Direction, Item, ItemId, Member, PassStats};
