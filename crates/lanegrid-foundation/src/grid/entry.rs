//! Cached per-item placement records.
//!
//! Once an index has been placed, its lane assignment is frozen into an
//! [`ItemEntry`] so that every later pass (scrolling back, replaying a jump,
//! restoring persisted state) reproduces the same placement instead of
//! re-running the packing heuristic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::lanes::LaneInfo;
use super::span::GridItemSpan;

/// Persistent placement record for one item index.
///
/// The single-lane and spanning cases share the lane assignment fields; the
/// spanning variant additionally remembers the declared spans so a replay
/// never has to materialize the item again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RawItemEntry", try_from = "RawItemEntry")]
pub enum ItemEntry {
    /// An item occupying exactly one lane-size cell.
    Single { start_lane: usize, anchor_lane: usize },

    /// An item covering several lanes and/or lane-size units.
    Spanned {
        start_lane: usize,
        anchor_lane: usize,
        lane_span: usize,
        scroll_span: usize,
    },
}

impl ItemEntry {
    /// Builds the entry for a freshly decided placement.
    pub fn new(info: LaneInfo, span: GridItemSpan) -> Self {
        if span == GridItemSpan::default() {
            ItemEntry::Single {
                start_lane: info.start_lane,
                anchor_lane: info.anchor_lane,
            }
        } else {
            ItemEntry::Spanned {
                start_lane: info.start_lane,
                anchor_lane: info.anchor_lane,
                lane_span: span.lane_span,
                scroll_span: span.scroll_span,
            }
        }
    }

    /// First lane the item occupies.
    #[inline]
    pub fn start_lane(&self) -> usize {
        match *self {
            ItemEntry::Single { start_lane, .. } | ItemEntry::Spanned { start_lane, .. } => {
                start_lane
            }
        }
    }

    /// Lane whose frontier fixes the item's scroll-axis position.
    #[inline]
    pub fn anchor_lane(&self) -> usize {
        match *self {
            ItemEntry::Single { anchor_lane, .. } | ItemEntry::Spanned { anchor_lane, .. } => {
                anchor_lane
            }
        }
    }

    /// Number of lanes the item covers.
    #[inline]
    pub fn lane_span(&self) -> usize {
        match *self {
            ItemEntry::Single { .. } => 1,
            ItemEntry::Spanned { lane_span, .. } => lane_span,
        }
    }

    /// Number of lane-size units the item covers along the scroll axis.
    #[inline]
    pub fn scroll_span(&self) -> usize {
        match *self {
            ItemEntry::Single { .. } => 1,
            ItemEntry::Spanned { scroll_span, .. } => scroll_span,
        }
    }

    /// The stored lane assignment.
    pub fn lane_info(&self) -> LaneInfo {
        LaneInfo {
            start_lane: self.start_lane(),
            anchor_lane: self.anchor_lane(),
        }
    }

    /// The stored span declaration.
    pub fn span(&self) -> GridItemSpan {
        GridItemSpan::new(self.lane_span(), self.scroll_span())
    }
}

/// Wire form of an entry: `(start_lane, anchor_lane, lane_span, scroll_span)`.
///
/// This is the serialization boundary; hosts persist and restore entries in
/// exactly this tuple shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItemEntry(pub i32, pub i32, pub i32, pub i32);

/// Persisted entries rejected at restore time.
///
/// Restoring crosses a trust boundary, so malformed tuples are errors, not
/// panics.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EntryDecodeError {
    #[error("negative lane index in persisted entry: start {0}, anchor {1}")]
    NegativeLane(i32, i32),

    #[error("non-positive span in persisted entry: {0}x{1}")]
    NonPositiveSpan(i32, i32),
}

impl From<ItemEntry> for RawItemEntry {
    fn from(entry: ItemEntry) -> Self {
        RawItemEntry(
            entry.start_lane() as i32,
            entry.anchor_lane() as i32,
            entry.lane_span() as i32,
            entry.scroll_span() as i32,
        )
    }
}

impl TryFrom<RawItemEntry> for ItemEntry {
    type Error = EntryDecodeError;

    fn try_from(raw: RawItemEntry) -> Result<Self, Self::Error> {
        let RawItemEntry(start_lane, anchor_lane, lane_span, scroll_span) = raw;
        if start_lane < 0 || anchor_lane < 0 {
            return Err(EntryDecodeError::NegativeLane(start_lane, anchor_lane));
        }
        if lane_span < 1 || scroll_span < 1 {
            return Err(EntryDecodeError::NonPositiveSpan(lane_span, scroll_span));
        }

        let info = LaneInfo {
            start_lane: start_lane as usize,
            anchor_lane: anchor_lane as usize,
        };
        let span = GridItemSpan::new(lane_span as usize, scroll_span as usize);
        Ok(ItemEntry::new(info, span))
    }
}
