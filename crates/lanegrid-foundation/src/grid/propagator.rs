//! Frame propagation over lane ranges.
//!
//! Placing an item affects every lane it covers, not just its anchor. These
//! wrappers push a decided frame across the item's whole lane range, and
//! pull it back out again when the item leaves the window.
//!
//! Unplacing is only valid for items adjacent to the visible window's edge,
//! which gives each lane frontier strict LIFO discipline; the lane set
//! checks that discipline and fails loudly when it is broken.

use lanegrid_layout::{Direction, Rect};

use super::lanes::LaneSet;

/// Advances lane frontiers across a freshly placed frame.
pub fn place_frame(
    lanes: &mut LaneSet,
    frame: &Rect,
    start_lane: usize,
    lane_span: usize,
    direction: Direction,
) {
    lanes.extend_range(start_lane, start_lane + lane_span, frame, direction);
}

/// Rolls lane frontiers back across a departing frame, restoring the state
/// the lanes held before the item was placed on this side of the window.
pub fn unplace_frame(
    lanes: &mut LaneSet,
    frame: &Rect,
    start_lane: usize,
    lane_span: usize,
    direction: Direction,
) {
    lanes.retract_range(start_lane, start_lane + lane_span, frame, direction);
}
