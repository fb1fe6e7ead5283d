//! The layout engine driving lanes, placement and the entry cache.
//!
//! [`LaneGridLayout`] owns one grid's mutable layout state and exposes the
//! two operating modes of the engine:
//!
//! - *Incremental scroll* ([`scroll_by`](LaneGridLayout::scroll_by)): items
//!   entering the visible window are placed at the frontier (consulting the
//!   entry cache first, so a reversal reproduces earlier frames), items
//!   leaving it are unplaced in window-edge order.
//! - *Jump to index* ([`move_to_position`](LaneGridLayout::move_to_position)):
//!   lane state is rebuilt by replaying every placement from the origin up
//!   to the target, then translated so the target lands at the requested
//!   on-screen offset. Replays are cache-driven and never materialize items
//!   that were placed before.
//!
//! The engine is single-threaded by contract with its host: every call
//! happens inside the container's layout pass. The one piece of deliberate
//! re-entrancy protection is the measuring scope, which forces scroll
//! queries to report "cannot scroll" while a child is being measured.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use lanegrid_layout::{Axis, Direction, Rect};
use thiserror::Error;

use super::entries::ItemEntries;
use super::entry::ItemEntry;
use super::lanes::LaneSet;
use super::placement::find_lane;
use super::propagator::{place_frame, unplace_frame};
use super::provider::GridItemProvider;
use super::span::{GridItemSpan, SpanError};

/// Items kept attached beyond each edge of the viewport band so a small
/// scroll reversal re-enters without churning the provider.
const BEYOND_BOUNDS_ITEMS: usize = 1;

/// Errors surfaced by the grid engine.
///
/// These are configuration errors, rejected synchronously before any lane
/// state is touched. Invariant violations (out-of-order detaches, layout on
/// a stale cache) are not errors but panics; see the crate docs.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GridError {
    #[error("grid must have at least one lane")]
    NoLanes,

    #[error("lane size must be positive, got {0}")]
    NonPositiveLaneSize(f32),

    #[error(transparent)]
    Span(#[from] SpanError),
}

/// Unified result type for engine operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Fixed geometry of a lane grid.
///
/// Decided once from the container's cross-axis extent; everything else in
/// the engine is derived from these three values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaneGridConfig {
    axis: Axis,
    lane_count: usize,
    lane_size: f32,
}

impl LaneGridConfig {
    pub fn new(axis: Axis, lane_count: usize, lane_size: f32) -> Result<Self> {
        if lane_count == 0 {
            return Err(GridError::NoLanes);
        }
        if lane_size <= 0.0 {
            return Err(GridError::NonPositiveLaneSize(lane_size));
        }
        Ok(Self {
            axis,
            lane_count,
            lane_size,
        })
    }

    /// Derives the lane size by dividing the container's cross-axis extent
    /// evenly between the lanes.
    pub fn from_cross_extent(axis: Axis, lane_count: usize, cross_extent: f32) -> Result<Self> {
        if lane_count == 0 {
            return Err(GridError::NoLanes);
        }
        Self::new(axis, lane_count, cross_extent / lane_count as f32)
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[inline]
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    #[inline]
    pub fn lane_size(&self) -> f32 {
        self.lane_size
    }

    /// Extent a span occupies on the lane axis and the scroll axis.
    pub fn child_extents(&self, span: GridItemSpan) -> (f32, f32) {
        (
            span.lane_span as f32 * self.lane_size,
            span.scroll_span as f32 * self.lane_size,
        )
    }
}

/// An item currently attached to the visible window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedItem {
    pub index: usize,
    /// Frame in content coordinates; subtract the engine's scroll offset to
    /// get viewport coordinates.
    pub frame: Rect,
}

/// Orchestrates lane allocation for a virtualized window over the item
/// sequence.
///
/// Owned, explicit state scoped to one container; never shared. All
/// geometry lives in content coordinates, with the viewport's near edge at
/// [`scroll_offset`](Self::scroll_offset).
pub struct LaneGridLayout {
    config: LaneGridConfig,
    lanes: LaneSet,
    entries: ItemEntries,
    /// Attached items in index order; indices are contiguous.
    window: VecDeque<PlacedItem>,
    scroll_offset: f32,
    viewport_extent: f32,
    /// Item count observed on the last pass.
    item_count: usize,
    /// Where the next fill starts when the window is empty.
    anchor_index: usize,
    /// Set while a child is being measured; scroll queries report false.
    measuring: Rc<Cell<bool>>,
}

impl LaneGridLayout {
    pub fn new(config: LaneGridConfig) -> Self {
        Self {
            config,
            lanes: LaneSet::new(config.axis, config.lane_count, config.lane_size),
            entries: ItemEntries::new(),
            window: VecDeque::new(),
            scroll_offset: 0.0,
            viewport_extent: 0.0,
            item_count: 0,
            anchor_index: 0,
            measuring: Rc::new(Cell::new(false)),
        }
    }

    #[inline]
    pub fn config(&self) -> &LaneGridConfig {
        &self.config
    }

    /// Read-only view of the lane frontiers.
    pub fn lanes(&self) -> &LaneSet {
        &self.lanes
    }

    /// Content-coordinate offset of the viewport's near edge.
    #[inline]
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Currently attached items in index order, including the small
    /// beyond-bounds buffer at each edge.
    pub fn visible_items(&self) -> impl Iterator<Item = &PlacedItem> {
        self.window.iter()
    }

    /// Cached placement record for `index`, if it has been placed since the
    /// last invalidation covering it.
    pub fn entry(&self, index: usize) -> Option<ItemEntry> {
        self.entries.get(index)
    }

    /// Lane span of an already-placed index.
    ///
    /// Asking about an index that was never placed is a caller-ordering bug.
    pub fn lane_span_of(&self, index: usize) -> usize {
        match self.entries.get(index) {
            Some(entry) => entry.lane_span(),
            None => panic!("no cached span for index {index}; the item was never placed"),
        }
    }

    /// Extent a span occupies on the lane axis and the scroll axis.
    pub fn child_extents(&self, span: GridItemSpan) -> (f32, f32) {
        self.config.child_extents(span)
    }

    /// Whether the container may scroll in `direction`.
    ///
    /// Always false inside a measuring scope, so re-entrant layout triggered
    /// by a child measurement cannot observe half-updated lane state.
    pub fn can_scroll(&self, direction: Direction) -> bool {
        if self.measuring.get() {
            return false;
        }
        match direction {
            Direction::Start => match self.window.front() {
                None => false,
                Some(front) => {
                    front.index > 0 || self.scroll_offset > self.lanes.content_start()
                }
            },
            Direction::End => match self.window.back() {
                None => false,
                Some(back) => {
                    back.index + 1 < self.item_count
                        || self.lanes.content_end() > self.scroll_offset + self.viewport_extent
                }
            },
        }
    }

    /// Runs `f` with the measuring flag set, clearing it on every exit path,
    /// early returns and panics included.
    ///
    /// Measuring a child can re-enter the container with a scroll-capability
    /// query; the flag makes that query answer "no" for the duration.
    pub fn measure_scope<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        struct ClearOnDrop(Rc<Cell<bool>>);
        impl Drop for ClearOnDrop {
            fn drop(&mut self) {
                self.0.set(false);
            }
        }

        let flag = Rc::clone(&self.measuring);
        flag.set(true);
        let _clear = ClearOnDrop(flag);
        f(self)
    }

    /// Places the item entering the window at `direction`'s edge.
    ///
    /// Cache hits reuse the stored lane assignment so the frame matches
    /// every earlier pass; misses materialize the span through the provider,
    /// run the placement scan and freeze the result into the cache. The
    /// index must be adjacent to the window edge it enters at.
    pub fn attach<P: GridItemProvider>(
        &mut self,
        index: usize,
        direction: Direction,
        provider: &mut P,
    ) -> Result<PlacedItem> {
        match direction {
            Direction::End => {
                if let Some(back) = self.window.back() {
                    assert!(
                        index == back.index + 1,
                        "items must enter at the window edge: attaching {index} at the end \
                         of a window ending at {}",
                        back.index
                    );
                }
            }
            Direction::Start => {
                if let Some(front) = self.window.front() {
                    assert!(
                        front.index > 0 && index == front.index - 1,
                        "items must enter at the window edge: attaching {index} at the start \
                         of a window beginning at {}",
                        front.index
                    );
                }
            }
        }

        let entry = self.resolve_entry(index, direction, provider)?;
        let (lane_extent, scroll_extent) = self.config.child_extents(entry.span());
        let frame = self
            .lanes
            .child_frame(entry.lane_info(), lane_extent, scroll_extent, direction);
        place_frame(
            &mut self.lanes,
            &frame,
            entry.start_lane(),
            entry.lane_span(),
            direction,
        );

        let placed = PlacedItem { index, frame };
        match direction {
            Direction::End => self.window.push_back(placed),
            Direction::Start => self.window.push_front(placed),
        }
        Ok(placed)
    }

    /// Unplaces the item leaving the window at `direction`'s edge, rolling
    /// every lane it covered back to its pre-placement frontier.
    ///
    /// The cache entry is retained so the item can be redisplayed without
    /// recomputation. Detaching anything but the edge item is a
    /// caller-ordering bug.
    pub fn detach(&mut self, index: usize, direction: Direction) {
        let edge = match direction {
            Direction::End => self.window.back().copied(),
            Direction::Start => self.window.front().copied(),
        };
        let Some(placed) = edge else {
            panic!("detach of index {index} from an empty window");
        };
        assert!(
            placed.index == index,
            "items must leave at the window edge: asked to detach {index} but the edge \
             item is {}",
            placed.index
        );

        let Some(entry) = self.entries.get(index) else {
            panic!("no cached entry for attached index {index}; the cache is stale");
        };
        unplace_frame(
            &mut self.lanes,
            &placed.frame,
            entry.start_lane(),
            entry.lane_span(),
            direction,
        );
        match direction {
            Direction::End => self.window.pop_back(),
            Direction::Start => self.window.pop_front(),
        };
    }

    /// Applies a scroll delta, filling and recycling the window so the band
    /// `[offset, offset + viewport_extent)` stays covered.
    ///
    /// Returns the delta actually consumed after clamping at the content
    /// edges.
    pub fn scroll_by<P: GridItemProvider>(
        &mut self,
        delta: f32,
        viewport_extent: f32,
        provider: &mut P,
    ) -> Result<f32> {
        if viewport_extent <= 0.0 {
            log::warn!("ignoring scroll with non-positive viewport extent {viewport_extent}");
            return Ok(0.0);
        }
        let item_count = provider.item_count();
        self.item_count = item_count;
        self.viewport_extent = viewport_extent;
        if item_count == 0 {
            return Ok(0.0);
        }

        let previous = self.scroll_offset;
        let mut offset = previous + delta;

        if self.window.is_empty() {
            let seed = self.anchor_index.min(item_count - 1);
            self.attach(seed, Direction::End, provider)?;
        }

        self.fill_start(offset, provider)?;
        offset = self.clamp_offset_start(offset);
        self.fill_end(offset + viewport_extent, item_count, provider)?;
        offset = self.clamp_offset_end(offset, viewport_extent);
        // The end clamp can slide the band back toward the start; cover and
        // re-clamp once more so both edges agree.
        self.fill_start(offset, provider)?;
        offset = self.clamp_offset_start(offset);

        self.recycle_end(offset + viewport_extent);
        self.recycle_start(offset);

        self.scroll_offset = offset;
        if let Some(front) = self.window.front() {
            self.anchor_index = front.index;
        }
        Ok(offset - previous)
    }

    /// Repositions the viewport directly onto `index`, with the item's near
    /// edge at `offset` in viewport coordinates.
    ///
    /// Lane state is rebuilt by replaying placements from the origin: cached
    /// indices replay their stored assignment without touching the provider,
    /// unknown indices are materialized, decided and cached exactly as
    /// incremental scrolling would have. The replayed frontier is then
    /// collapsed and translated so the target lands where requested, which
    /// makes geometry after a jump identical to what incremental scrolling
    /// would have produced.
    ///
    /// On a configuration error the lane set is left in its reset state, not
    /// half-replayed.
    pub fn move_to_position<P: GridItemProvider>(
        &mut self,
        index: usize,
        offset: f32,
        provider: &mut P,
    ) -> Result<()> {
        let item_count = provider.item_count();
        self.item_count = item_count;
        self.window.clear();
        self.lanes.reset(0.0);
        self.scroll_offset = 0.0;
        self.anchor_index = 0;
        if item_count == 0 {
            return Ok(());
        }

        let target = if index >= item_count {
            log::warn!("clamping jump target {index} to last item {}", item_count - 1);
            item_count - 1
        } else {
            index
        };

        let mut target_frame = Rect::ZERO;
        for i in 0..=target {
            let entry = match self.resolve_entry(i, Direction::End, provider) {
                Ok(entry) => entry,
                Err(err) => {
                    // Fail atomically: a half-replayed frontier is worse
                    // than an empty one.
                    self.lanes.reset(0.0);
                    return Err(err);
                }
            };
            let (lane_extent, scroll_extent) = self.config.child_extents(entry.span());
            let frame =
                self.lanes
                    .child_frame(entry.lane_info(), lane_extent, scroll_extent, Direction::End);
            if i == target {
                target_frame = frame;
            } else {
                place_frame(
                    &mut self.lanes,
                    &frame,
                    entry.start_lane(),
                    entry.lane_span(),
                    Direction::End,
                );
            }
        }

        self.lanes.rebase(Direction::End);
        self.lanes
            .offset(offset - target_frame.main_start(self.config.axis));
        self.anchor_index = target;
        Ok(())
    }

    /// Exports every cached entry as `(index, entry)` pairs for persistence.
    pub fn persisted_entries(&self) -> Vec<(usize, ItemEntry)> {
        self.entries.iter().collect()
    }

    /// Replaces the entry cache with previously persisted pairs and restarts
    /// lane bookkeeping. Restored indices replay without the provider.
    pub fn restore_entries(&mut self, pairs: impl IntoIterator<Item = (usize, ItemEntry)>) {
        self.entries.restore(pairs);
        self.lanes.reset(0.0);
        self.window.clear();
        self.scroll_offset = 0.0;
        self.anchor_index = 0;
    }

    pub fn on_items_inserted(&mut self, start_index: usize, count: usize) {
        log::debug!("{count} items inserted at {start_index}; invalidating cached lanes");
        self.invalidate_structure(start_index);
    }

    pub fn on_items_removed(&mut self, start_index: usize, count: usize) {
        log::debug!("{count} items removed at {start_index}; invalidating cached lanes");
        self.invalidate_structure(start_index);
    }

    pub fn on_items_changed(&mut self, start_index: usize, count: usize) {
        log::debug!("{count} items changed at {start_index}; invalidating cached lanes");
        self.invalidate_structure(start_index);
    }

    pub fn on_items_moved(&mut self, from_index: usize, to_index: usize, count: usize) {
        log::debug!("{count} items moved {from_index} -> {to_index}; invalidating cached lanes");
        self.invalidate_structure(from_index.min(to_index));
    }

    /// Resolves the placement record for `index`, deciding and caching a
    /// fresh one on a miss.
    fn resolve_entry<P: GridItemProvider>(
        &mut self,
        index: usize,
        direction: Direction,
        provider: &mut P,
    ) -> Result<ItemEntry> {
        if let Some(entry) = self.entries.get(index) {
            return Ok(entry);
        }
        let span = provider
            .item_span(index)
            .validated(self.config.lane_count)?;
        let info = find_lane(&self.lanes, span.lane_span, direction);
        let entry = ItemEntry::new(info, span);
        self.entries.set(index, entry);
        Ok(entry)
    }

    fn fill_end<P: GridItemProvider>(
        &mut self,
        band_end: f32,
        item_count: usize,
        provider: &mut P,
    ) -> Result<()> {
        let axis = self.config.axis;
        while let Some(back) = self.window.back().copied() {
            // Placement frontiers only advance, so once one item starts past
            // the band every later one does too.
            if back.frame.main_start(axis) >= band_end {
                break;
            }
            let next = back.index + 1;
            if next >= item_count {
                break;
            }
            self.attach(next, Direction::End, provider)?;
        }
        Ok(())
    }

    fn fill_start<P: GridItemProvider>(
        &mut self,
        band_start: f32,
        provider: &mut P,
    ) -> Result<()> {
        while let Some(front) = self.window.front().copied() {
            if front.index == 0 {
                break;
            }
            // Some lane may still be uncovered above the band even when the
            // front item is not, so the stop condition is the frontier.
            if self.lanes.frontier(Direction::Start) <= band_start {
                break;
            }
            self.attach(front.index - 1, Direction::Start, provider)?;
        }
        Ok(())
    }

    fn clamp_offset_start(&self, offset: f32) -> f32 {
        if self
            .window
            .front()
            .is_some_and(|front| front.index == 0)
        {
            offset.max(self.lanes.content_start())
        } else {
            offset
        }
    }

    fn clamp_offset_end(&self, offset: f32, viewport_extent: f32) -> f32 {
        if self
            .window
            .back()
            .is_some_and(|back| back.index + 1 == self.item_count)
        {
            let max_offset = self.lanes.content_end() - viewport_extent;
            offset.min(max_offset.max(self.lanes.content_start()))
        } else {
            offset
        }
    }

    fn recycle_end(&mut self, band_end: f32) {
        let axis = self.config.axis;
        let out_of_band = self
            .window
            .iter()
            .rev()
            .take_while(|item| item.frame.main_start(axis) >= band_end)
            .count();
        for _ in 0..out_of_band.saturating_sub(BEYOND_BOUNDS_ITEMS) {
            if self.window.len() <= 1 {
                break;
            }
            let Some(back) = self.window.back().copied() else {
                break;
            };
            self.detach(back.index, Direction::End);
        }
    }

    fn recycle_start(&mut self, band_start: f32) {
        let axis = self.config.axis;
        let out_of_band = self
            .window
            .iter()
            .take_while(|item| item.frame.main_end(axis) <= band_start)
            .count();
        for _ in 0..out_of_band.saturating_sub(BEYOND_BOUNDS_ITEMS) {
            if self.window.len() <= 1 {
                break;
            }
            let Some(front) = self.window.front().copied() else {
                break;
            };
            self.detach(front.index, Direction::Start);
        }
    }

    fn invalidate_structure(&mut self, first_affected: usize) {
        self.entries.invalidate_from(first_affected);
        self.lanes.reset(0.0);
        self.window.clear();
        self.scroll_offset = 0.0;
        self.anchor_index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestProvider {
        spans: Vec<GridItemSpan>,
        materialized: Vec<usize>,
    }

    impl TestProvider {
        fn new(spans: Vec<GridItemSpan>) -> Self {
            Self {
                spans,
                materialized: Vec::new(),
            }
        }

        fn uniform(count: usize) -> Self {
            Self::new(vec![GridItemSpan::default(); count])
        }
    }

    impl GridItemProvider for TestProvider {
        fn item_count(&self) -> usize {
            self.spans.len()
        }

        fn item_span(&mut self, index: usize) -> GridItemSpan {
            self.materialized.push(index);
            self.spans[index]
        }
    }

    fn vertical_grid(lane_count: usize) -> LaneGridLayout {
        let config =
            LaneGridConfig::from_cross_extent(Axis::Vertical, lane_count, lane_count as f32 * 100.0)
                .unwrap();
        LaneGridLayout::new(config)
    }

    #[test]
    fn test_config_rejects_bad_geometry() {
        assert_eq!(
            LaneGridConfig::new(Axis::Vertical, 0, 100.0),
            Err(GridError::NoLanes)
        );
        assert_eq!(
            LaneGridConfig::from_cross_extent(Axis::Vertical, 3, 0.0),
            Err(GridError::NonPositiveLaneSize(0.0))
        );
    }

    #[test]
    fn test_three_lane_packing_example() {
        // 3 lanes of 100: a 2x2 item, then two tiles. Both tiles stack into
        // lane 2 because it stays the least advanced lane.
        let mut grid = vertical_grid(3);
        let mut provider = TestProvider::new(vec![
            GridItemSpan::new(2, 2),
            GridItemSpan::default(),
            GridItemSpan::default(),
        ]);

        let first = grid.attach(0, Direction::End, &mut provider).unwrap();
        let second = grid.attach(1, Direction::End, &mut provider).unwrap();
        let third = grid.attach(2, Direction::End, &mut provider).unwrap();

        assert_eq!(first.frame, Rect::new(0.0, 0.0, 200.0, 200.0));
        assert_eq!(second.frame, Rect::new(200.0, 0.0, 100.0, 100.0));
        assert_eq!(third.frame, Rect::new(200.0, 100.0, 100.0, 100.0));
    }

    #[test]
    fn test_horizontal_grid_lays_out_row_lanes() {
        // 2 row lanes of 80; scrolling runs along x.
        let config = LaneGridConfig::from_cross_extent(Axis::Horizontal, 2, 160.0).unwrap();
        let mut grid = LaneGridLayout::new(config);
        let mut provider = TestProvider::new(vec![
            GridItemSpan::new(2, 1),
            GridItemSpan::default(),
            GridItemSpan::default(),
        ]);

        let first = grid.attach(0, Direction::End, &mut provider).unwrap();
        let second = grid.attach(1, Direction::End, &mut provider).unwrap();
        let third = grid.attach(2, Direction::End, &mut provider).unwrap();

        assert_eq!(first.frame, Rect::new(0.0, 0.0, 80.0, 160.0));
        assert_eq!(second.frame, Rect::new(80.0, 0.0, 80.0, 80.0));
        assert_eq!(third.frame, Rect::new(80.0, 80.0, 80.0, 80.0));
    }

    #[test]
    fn test_invalid_span_is_rejected_before_lane_mutation() {
        let mut grid = vertical_grid(3);
        let mut provider = TestProvider::new(vec![GridItemSpan::new(4, 1)]);

        let result = grid.attach(0, Direction::End, &mut provider);
        assert_eq!(
            result,
            Err(GridError::Span(SpanError::ExceedsLaneCount {
                lane_span: 4,
                lane_count: 3
            }))
        );
        for lane in 0..3 {
            assert_eq!(grid.lanes().edges_of(lane).leading, 0.0);
        }
        assert!(grid.entry(0).is_none());
    }

    #[test]
    fn test_cache_hit_skips_the_provider() {
        let mut grid = vertical_grid(2);
        let mut provider = TestProvider::uniform(4);

        let placed = grid.attach(0, Direction::End, &mut provider).unwrap();
        grid.detach(0, Direction::Start);
        let replaced = grid.attach(0, Direction::Start, &mut provider).unwrap();

        assert_eq!(provider.materialized, vec![0]);
        assert_eq!(placed.frame, replaced.frame);
    }

    #[test]
    #[should_panic(expected = "items must leave at the window edge")]
    fn test_detach_requires_window_edge() {
        let mut grid = vertical_grid(2);
        let mut provider = TestProvider::uniform(4);
        grid.attach(0, Direction::End, &mut provider).unwrap();
        grid.attach(1, Direction::End, &mut provider).unwrap();

        grid.detach(0, Direction::End);
    }

    #[test]
    fn test_lane_span_of_reads_the_cache() {
        let mut grid = vertical_grid(3);
        let mut provider = TestProvider::new(vec![GridItemSpan::new(3, 2)]);
        grid.attach(0, Direction::End, &mut provider).unwrap();

        assert_eq!(grid.lane_span_of(0), 3);
    }

    #[test]
    #[should_panic(expected = "never placed")]
    fn test_lane_span_of_unplaced_index_panics() {
        let grid = vertical_grid(3);
        grid.lane_span_of(7);
    }

    #[test]
    fn test_measure_scope_gates_scroll_queries() {
        let mut grid = vertical_grid(2);
        let mut provider = TestProvider::uniform(50);
        grid.scroll_by(0.0, 300.0, &mut provider).unwrap();
        assert!(grid.can_scroll(Direction::End));

        grid.measure_scope(|grid| {
            assert!(!grid.can_scroll(Direction::End));
            assert!(!grid.can_scroll(Direction::Start));
        });
        assert!(grid.can_scroll(Direction::End));
    }

    #[test]
    fn test_measure_scope_clears_flag_on_panic() {
        let mut grid = vertical_grid(2);
        let mut provider = TestProvider::uniform(50);
        grid.scroll_by(0.0, 300.0, &mut provider).unwrap();

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            grid.measure_scope(|_| panic!("child measurement failed"));
        }));
        assert!(outcome.is_err());
        assert!(grid.can_scroll(Direction::End));
    }

    #[test]
    fn test_scroll_by_fills_and_clamps() {
        let mut grid = vertical_grid(2);
        let mut provider = TestProvider::uniform(6);

        // 6 tiles over 2 lanes of 100 -> content is 300 tall.
        let consumed = grid.scroll_by(0.0, 200.0, &mut provider).unwrap();
        assert_eq!(consumed, 0.0);
        assert!(grid.visible_items().any(|item| item.index == 0));

        // Scrolling far past the end clamps to content_end - viewport.
        let consumed = grid.scroll_by(1000.0, 200.0, &mut provider).unwrap();
        assert_eq!(consumed, 100.0);
        assert_eq!(grid.scroll_offset(), 100.0);
        assert!(!grid.can_scroll(Direction::End));
        assert!(grid.can_scroll(Direction::Start));

        // And back past the start clamps to zero.
        let consumed = grid.scroll_by(-500.0, 200.0, &mut provider).unwrap();
        assert_eq!(consumed, -100.0);
        assert_eq!(grid.scroll_offset(), 0.0);
        assert!(!grid.can_scroll(Direction::Start));
    }

    #[test]
    fn test_notifications_purge_suffix_and_reset_lanes() {
        let mut grid = vertical_grid(2);
        let mut provider = TestProvider::uniform(8);
        grid.scroll_by(0.0, 400.0, &mut provider).unwrap();
        assert!(grid.entry(3).is_some());

        grid.on_items_removed(2, 1);

        assert!(grid.entry(0).is_some());
        assert!(grid.entry(1).is_some());
        for index in 2..8 {
            assert!(grid.entry(index).is_none(), "entry {index} should be gone");
        }
        for lane in 0..2 {
            assert_eq!(grid.lanes().edges_of(lane).leading, 0.0);
        }
        assert_eq!(grid.visible_items().count(), 0);
    }

    #[test]
    fn test_move_to_position_lands_target_at_requested_offset() {
        let mut grid = vertical_grid(3);
        let mut provider = TestProvider::new(vec![
            GridItemSpan::new(2, 2),
            GridItemSpan::default(),
            GridItemSpan::default(),
        ]);
        // Warm the cache the incremental way first.
        grid.scroll_by(0.0, 300.0, &mut provider).unwrap();
        let warmed = provider.materialized.len();

        grid.move_to_position(2, 50.0, &mut provider).unwrap();
        grid.scroll_by(0.0, 300.0, &mut provider).unwrap();

        // Replay ran entirely from the cache.
        assert_eq!(provider.materialized.len(), warmed);
        let target = grid
            .visible_items()
            .find(|item| item.index == 2)
            .copied()
            .expect("target attached");
        assert_eq!(target.frame, Rect::new(200.0, 50.0, 100.0, 100.0));
    }

    #[test]
    fn test_move_to_position_clamps_target_index() {
        let mut grid = vertical_grid(2);
        let mut provider = TestProvider::uniform(3);

        grid.move_to_position(10, 0.0, &mut provider).unwrap();
        grid.scroll_by(0.0, 200.0, &mut provider).unwrap();

        assert!(grid.visible_items().any(|item| item.index == 2));
    }

    #[test]
    fn test_move_to_position_failure_leaves_reset_lanes() {
        let mut grid = vertical_grid(2);
        let mut provider =
            TestProvider::new(vec![GridItemSpan::default(), GridItemSpan::new(3, 1)]);

        let result = grid.move_to_position(1, 0.0, &mut provider);
        assert!(result.is_err());
        for lane in 0..2 {
            assert_eq!(grid.lanes().edges_of(lane).leading, 0.0);
            assert_eq!(grid.lanes().edges_of(lane).trailing, 0.0);
        }
        assert_eq!(grid.visible_items().count(), 0);
    }
}
