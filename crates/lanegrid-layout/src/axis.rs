/// Represents the scroll axis of a lane grid container.
///
/// Content moves along the scroll axis; lanes run parallel to it and are
/// stacked side by side along the cross axis. A vertically scrolling grid
/// has column lanes, a horizontally scrolling grid has row lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal scroll axis.
    /// Main axis: left to right
    /// Cross axis: top to bottom (lanes are rows)
    Horizontal,

    /// Vertical scroll axis.
    /// Main axis: top to bottom
    /// Cross axis: left to right (lanes are columns)
    Vertical,
}

impl Axis {
    /// Returns the opposite axis.
    #[inline]
    pub fn cross_axis(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Returns true if this is the horizontal axis.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Axis::Horizontal)
    }

    /// Returns true if this is the vertical axis.
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Axis::Vertical)
    }
}
