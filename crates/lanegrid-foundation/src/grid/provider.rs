//! Item provider seam to the hosting container.

use super::span::GridItemSpan;

/// Provides the engine with what it must know about the item sequence.
///
/// This is the only seam between the engine and the host's view pipeline.
/// `item_span` stands in for materializing a view: the engine calls it only
/// on cache misses, when an index is about to be placed for the first time
/// and its declared span is not yet known. Replays of already-placed indices
/// never touch the provider.
pub trait GridItemProvider {
    /// Total number of items in the data set, visible or not.
    fn item_count(&self) -> usize;

    /// Declared span for the item at `index`.
    ///
    /// Implementations that create views lazily should do so here, inside
    /// the engine's measuring scope. The returned span is re-validated by
    /// the engine; out-of-range declarations make the placement fail with a
    /// configuration error before any lane state is touched.
    fn item_span(&mut self, index: usize) -> GridItemSpan;
}

impl<P: GridItemProvider + ?Sized> GridItemProvider for &mut P {
    fn item_count(&self) -> usize {
        (**self).item_count()
    }

    fn item_span(&mut self, index: usize) -> GridItemSpan {
        (**self).item_span(index)
    }
}
