//! Span declaration and validation for grid items.
//!
//! Items declare how many lanes they cover on each axis as part of their
//! layout configuration. Declarations are checked here, at the acceptance
//! boundary, so that the placement algorithm never sees an impossible span.

use thiserror::Error;

/// Span used on both axes when an item declares nothing.
pub const DEFAULT_SPAN: usize = 1;

/// How much of the grid an item occupies.
///
/// `lane_span` counts contiguous lanes along the cross axis; `scroll_span`
/// counts lane-size units along the scroll axis. A plain tile is 1×1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridItemSpan {
    pub lane_span: usize,
    pub scroll_span: usize,
}

impl Default for GridItemSpan {
    fn default() -> Self {
        Self {
            lane_span: DEFAULT_SPAN,
            scroll_span: DEFAULT_SPAN,
        }
    }
}

/// Span declarations rejected at acceptance time.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SpanError {
    /// Spans must cover at least one lane-size unit on each axis.
    #[error("span must be at least 1 on both axes, got {lane_span}x{scroll_span}")]
    NonPositive {
        lane_span: usize,
        scroll_span: usize,
    },

    /// An item cannot cover more lanes than the grid has.
    #[error("lane span {lane_span} exceeds lane count {lane_count}")]
    ExceedsLaneCount { lane_span: usize, lane_count: usize },
}

impl GridItemSpan {
    pub const fn new(lane_span: usize, scroll_span: usize) -> Self {
        Self {
            lane_span,
            scroll_span,
        }
    }

    /// Strict acceptance path: rejects spans the grid cannot place.
    ///
    /// This runs before a span reaches the placement algorithm; a span that
    /// fails here must never touch lane state.
    pub fn validated(self, lane_count: usize) -> Result<Self, SpanError> {
        if self.lane_span < 1 || self.scroll_span < 1 {
            return Err(SpanError::NonPositive {
                lane_span: self.lane_span,
                scroll_span: self.scroll_span,
            });
        }
        if self.lane_span > lane_count {
            return Err(SpanError::ExceedsLaneCount {
                lane_span: self.lane_span,
                lane_count,
            });
        }
        Ok(self)
    }

    /// Lenient acceptance path: coerces the span into range instead of
    /// rejecting it, for hosts that adopt foreign layout configurations.
    pub fn clamped(self, lane_count: usize) -> Self {
        let clamped = Self {
            lane_span: self.lane_span.clamp(DEFAULT_SPAN, lane_count),
            scroll_span: self.scroll_span.max(DEFAULT_SPAN),
        };
        if clamped != self {
            log::warn!(
                "clamped span {}x{} to {}x{} for a {}-lane grid",
                self.lane_span,
                self.scroll_span,
                clamped.lane_span,
                clamped.scroll_span,
                lane_count
            );
        }
        clamped
    }
}
