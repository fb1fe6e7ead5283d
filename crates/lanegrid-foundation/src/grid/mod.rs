//! Spanned-lane grid layout for virtualized containers.
//!
//! This module packs variable-size items into a fixed number of parallel
//! lanes inside a bidirectionally scrollable window. Each item may span
//! several contiguous lanes; only the visible slice of the item sequence is
//! ever laid out, and placement decisions are cached per index so scrolling
//! backward (or jumping straight to an index) reproduces the exact geometry
//! of the first pass.
//!
//! # Architecture
//!
//! - [`LaneSet`] - the lanes and their scroll-axis frontiers, with a
//!   journal that makes every frontier move reversible
//! - [`find_lane`] - the greedy window scan deciding where a new item goes
//! - [`place_frame`] / [`unplace_frame`] - frame propagation across an
//!   item's whole lane range
//! - [`ItemEntries`] / [`ItemEntry`] - the per-index placement cache and
//!   its persisted form
//! - [`GridItemProvider`] - the host seam for item counts and span
//!   declarations
//! - [`LaneGridLayout`] - the engine: incremental scroll, jump-to-index
//!   replay, data-set change handling and the measuring guard
//!
//! # Example
//!
//! ```rust
//! use lanegrid_foundation::grid::{
//!     GridItemProvider, GridItemSpan, LaneGridConfig, LaneGridLayout,
//! };
//! use lanegrid_layout::Axis;
//!
//! struct Tiles;
//!
//! impl GridItemProvider for Tiles {
//!     fn item_count(&self) -> usize {
//!         1000
//!     }
//!
//!     fn item_span(&mut self, index: usize) -> GridItemSpan {
//!         if index % 7 == 0 {
//!             GridItemSpan::new(2, 2)
//!         } else {
//!             GridItemSpan::default()
//!         }
//!     }
//! }
//!
//! let config = LaneGridConfig::from_cross_extent(Axis::Vertical, 3, 360.0).unwrap();
//! let mut grid = LaneGridLayout::new(config);
//! grid.scroll_by(250.0, 640.0, &mut Tiles).unwrap();
//! for item in grid.visible_items() {
//!     // hand item.frame to the view-positioning step
//!     let _ = item.frame;
//! }
//! ```

mod entries;
mod entry;
mod lanes;
mod layout;
mod placement;
mod propagator;
mod provider;
mod span;

pub use entries::*;
pub use entry::*;
pub use lanes::*;
pub use layout::*;
pub use placement::*;
pub use propagator::*;
pub use provider::*;
pub use span::*;
