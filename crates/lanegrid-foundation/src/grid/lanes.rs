//! Lane bookkeeping along the scroll axis.
//!
//! A [`LaneSet`] owns the grid's parallel tracks. Each lane tracks two
//! frontiers in content coordinates: the leading edge (extent consumed
//! toward the end of the scroll axis) and the trailing edge (extent consumed
//! toward the start). Placements advance a frontier; detachments undo the
//! advance.
//!
//! Every frontier move is recorded in a per-edge journal so that the inverse
//! operation restores the exact prior value. Spanned placements leave gaps in
//! non-anchor lanes, and plain scalar bookkeeping cannot roll those back
//! without re-flowing; the journal is what makes scroll reversal reproduce
//! frames bit-for-bit. A detach that does not match the journal head is an
//! out-of-order detach and fails loudly rather than corrupting lane state.

use lanegrid_layout::{Axis, Direction, Rect};
use smallvec::SmallVec;

/// Inline capacity for the lane array. Grids rarely run more lanes than
/// this, so the set itself stays off the heap.
const LANE_INLINE_CAPACITY: usize = 8;

/// A resolved lane assignment: the first lane an item occupies and the lane
/// whose frontier fixes the item's scroll-axis position.
///
/// Never persisted on its own; it is either freshly computed by the
/// placement scan or restored from a cached entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaneInfo {
    pub start_lane: usize,
    pub anchor_lane: usize,
}

/// Current frontiers of a single lane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaneEdges {
    /// Extent consumed toward the end of the scroll axis.
    pub leading: f32,
    /// Extent consumed toward the start of the scroll axis.
    pub trailing: f32,
}

/// One recorded frontier move, kept so the move can be undone exactly.
#[derive(Clone, Copy, Debug)]
struct EdgeOp {
    /// Frame edge the frontier was moved to.
    produced: f32,
    /// Frontier value before the move.
    previous: f32,
}

#[derive(Clone, Debug)]
struct Lane {
    leading: f32,
    trailing: f32,
    /// End-edge placements covering this lane, most recent last.
    leading_log: Vec<EdgeOp>,
    /// Start-edge detachments that advanced this lane, most recent last.
    trailing_log: Vec<EdgeOp>,
}

impl Lane {
    fn at(offset: f32) -> Self {
        Self {
            leading: offset,
            trailing: offset,
            leading_log: Vec::new(),
            trailing_log: Vec::new(),
        }
    }
}

/// The grid's parallel tracks and their scroll-axis frontiers.
///
/// Lane geometry is fixed at construction: every lane has the same
/// cross-axis size, and lane `i` occupies the cross-axis band
/// `[i * lane_size, (i + 1) * lane_size)`. Only frontier state mutates, and
/// only through [`reset`](Self::reset), [`rebase`](Self::rebase),
/// [`offset`](Self::offset), [`extend_range`](Self::extend_range) and
/// [`retract_range`](Self::retract_range).
#[derive(Clone, Debug)]
pub struct LaneSet {
    axis: Axis,
    lane_size: f32,
    lanes: SmallVec<[Lane; LANE_INLINE_CAPACITY]>,
}

impl LaneSet {
    pub fn new(axis: Axis, lane_count: usize, lane_size: f32) -> Self {
        debug_assert!(lane_count > 0, "lane count must be positive");
        debug_assert!(lane_size > 0.0, "lane size must be positive");
        Self {
            axis,
            lane_size,
            lanes: (0..lane_count).map(|_| Lane::at(0.0)).collect(),
        }
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[inline]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    #[inline]
    pub fn lane_size(&self) -> f32 {
        self.lane_size
    }

    pub fn edges_of(&self, lane: usize) -> LaneEdges {
        let lane = &self.lanes[lane];
        LaneEdges {
            leading: lane.leading,
            trailing: lane.trailing,
        }
    }

    /// Start-most edge of laid-out content across all lanes.
    pub fn content_start(&self) -> f32 {
        self.lanes
            .iter()
            .map(|lane| lane.trailing)
            .fold(f32::INFINITY, f32::min)
    }

    /// End-most edge of laid-out content across all lanes.
    pub fn content_end(&self) -> f32 {
        self.lanes
            .iter()
            .map(|lane| lane.leading)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// The least-advanced frontier in `direction`: the line the next
    /// placement in that direction would anchor on, and past which no lane
    /// is covered yet.
    pub fn frontier(&self, direction: Direction) -> f32 {
        match direction {
            Direction::End => self
                .lanes
                .iter()
                .map(|lane| lane.leading)
                .fold(f32::INFINITY, f32::min),
            Direction::Start => self
                .lanes
                .iter()
                .map(|lane| lane.trailing)
                .fold(f32::NEG_INFINITY, f32::max),
        }
    }

    /// Restarts bookkeeping with every frontier at `offset` and the journal
    /// emptied.
    pub fn reset(&mut self, offset: f32) {
        for lane in &mut self.lanes {
            *lane = Lane::at(offset);
        }
    }

    /// Collapses each lane's band onto its frontier in `direction`, keeping
    /// the per-lane stagger but forgetting the attached extent and journal.
    ///
    /// Used when the viewport restarts bookkeeping from a specific item,
    /// e.g. right after a jump replay.
    pub fn rebase(&mut self, direction: Direction) {
        for lane in &mut self.lanes {
            match direction {
                Direction::End => lane.trailing = lane.leading,
                Direction::Start => lane.leading = lane.trailing,
            }
            lane.leading_log.clear();
            lane.trailing_log.clear();
        }
    }

    /// Translates every frontier (and the journal that refers to them) by
    /// `delta` along the scroll axis.
    pub fn offset(&mut self, delta: f32) {
        for lane in &mut self.lanes {
            lane.leading += delta;
            lane.trailing += delta;
            for op in lane
                .leading_log
                .iter_mut()
                .chain(lane.trailing_log.iter_mut())
            {
                op.produced += delta;
                op.previous += delta;
            }
        }
    }

    /// Computes the frame a placement with this assignment would occupy.
    ///
    /// The cross-axis position comes from the start lane; the scroll-axis
    /// position comes from the anchor lane's frontier in `direction`. Lane
    /// state is not touched.
    pub fn child_frame(
        &self,
        info: LaneInfo,
        lane_extent: f32,
        scroll_extent: f32,
        direction: Direction,
    ) -> Rect {
        let cross_start = info.start_lane as f32 * self.lane_size;
        let anchor = &self.lanes[info.anchor_lane];
        let (main_start, main_end) = match direction {
            Direction::End => (anchor.leading, anchor.leading + scroll_extent),
            Direction::Start => (anchor.trailing - scroll_extent, anchor.trailing),
        };

        Rect::from_axis_bounds(
            self.axis,
            main_start,
            main_end,
            cross_start,
            cross_start + lane_extent,
        )
    }

    /// Advances the frontiers of lanes `[start_lane, end_lane)` past a
    /// placed frame.
    ///
    /// `End` placements move leading edges to the frame's far edge; a lane
    /// whose leading edge is already past the frame keeps it (frontiers only
    /// advance). `Start` placements move trailing edges toward the start; a
    /// re-entering item consumes the journal record its detachment left and
    /// restores the exact prior frontier.
    pub fn extend_range(
        &mut self,
        start_lane: usize,
        end_lane: usize,
        frame: &Rect,
        direction: Direction,
    ) {
        let main_start = frame.main_start(self.axis);
        let main_end = frame.main_end(self.axis);

        for index in start_lane..end_lane {
            let lane = &mut self.lanes[index];
            match direction {
                Direction::End => {
                    lane.leading_log.push(EdgeOp {
                        produced: main_end,
                        previous: lane.leading,
                    });
                    if main_end > lane.leading {
                        lane.leading = main_end;
                    }
                }
                Direction::Start => {
                    if let Some(op) = lane.trailing_log.last().copied() {
                        if op.produced != main_end {
                            panic!(
                                "out-of-order start-edge placement on lane {index}: \
                                 journal expects the frame ending at {}, got {}",
                                op.produced, main_end
                            );
                        }
                        lane.trailing_log.pop();
                        lane.trailing = op.previous;
                    } else if main_start < lane.trailing {
                        // Fresh fill toward the start, nothing to undo.
                        lane.trailing = main_start;
                    }
                }
            }
        }
    }

    /// Rolls the frontiers of lanes `[start_lane, end_lane)` back across a
    /// departing frame.
    ///
    /// `End` detaches undo the most recent end-edge placement covering each
    /// lane; the frame must match the journal head. `Start` detaches advance
    /// trailing edges past the departing frame and record the move so a
    /// later re-entry can undo it; the frontier must not already have passed
    /// the frame. Both mismatches are caller-ordering bugs and panic.
    pub fn retract_range(
        &mut self,
        start_lane: usize,
        end_lane: usize,
        frame: &Rect,
        direction: Direction,
    ) {
        let main_start = frame.main_start(self.axis);
        let main_end = frame.main_end(self.axis);

        for index in start_lane..end_lane {
            let lane = &mut self.lanes[index];
            match direction {
                Direction::End => {
                    let Some(op) = lane.leading_log.pop() else {
                        panic!("end-edge detach without a matching placement on lane {index}");
                    };
                    if op.produced != main_end {
                        panic!(
                            "out-of-order end-edge detach on lane {index}: \
                             journal expects the frame ending at {}, got {}",
                            op.produced, main_end
                        );
                    }
                    lane.leading = op.previous;
                }
                Direction::Start => {
                    if lane.trailing > main_start {
                        panic!(
                            "out-of-order start-edge detach on lane {index}: \
                             frontier {} is already past the frame starting at {}",
                            lane.trailing, main_start
                        );
                    }
                    lane.trailing_log.push(EdgeOp {
                        produced: main_end,
                        previous: lane.trailing,
                    });
                    lane.trailing = main_end;
                }
            }
        }
    }
}
