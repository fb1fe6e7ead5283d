//! Foundation elements for lanegrid: the spanned-lane grid layout engine.

pub mod grid;

pub use grid::*;

pub mod prelude {
    pub use crate::grid::{
        GridItemProvider, GridItemSpan, ItemEntry, LaneGridConfig, LaneGridLayout, PlacedItem,
    };
    pub use lanegrid_layout::{Axis, Direction, Rect};
}
