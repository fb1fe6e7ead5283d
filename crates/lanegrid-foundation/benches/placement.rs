use criterion::{Criterion, black_box, criterion_group, criterion_main};

use lanegrid_foundation::grid::{GridItemProvider, GridItemSpan, LaneGridConfig, LaneGridLayout};
use lanegrid_layout::Axis;

struct PatternTiles {
    count: usize,
}

impl GridItemProvider for PatternTiles {
    fn item_count(&self) -> usize {
        self.count
    }

    fn item_span(&mut self, index: usize) -> GridItemSpan {
        match index % 11 {
            0 => GridItemSpan::new(2, 2),
            4 => GridItemSpan::new(3, 1),
            7 => GridItemSpan::new(1, 2),
            _ => GridItemSpan::default(),
        }
    }
}

fn grid() -> LaneGridLayout {
    let config = LaneGridConfig::from_cross_extent(Axis::Vertical, 4, 360.0).expect("config");
    LaneGridLayout::new(config)
}

fn steady_scroll(c: &mut Criterion) {
    c.bench_function("steady_scroll_10k_items", |b| {
        b.iter(|| {
            let mut layout = grid();
            let mut tiles = PatternTiles { count: 10_000 };
            for _ in 0..200 {
                layout
                    .scroll_by(black_box(120.0), 800.0, &mut tiles)
                    .expect("scroll");
            }
            layout.scroll_offset()
        })
    });
}

fn scroll_reversal(c: &mut Criterion) {
    c.bench_function("scroll_reversal_cached", |b| {
        b.iter(|| {
            let mut layout = grid();
            let mut tiles = PatternTiles { count: 4_000 };
            for _ in 0..60 {
                layout
                    .scroll_by(black_box(150.0), 800.0, &mut tiles)
                    .expect("scroll");
            }
            for _ in 0..60 {
                layout
                    .scroll_by(black_box(-150.0), 800.0, &mut tiles)
                    .expect("scroll");
            }
            layout.scroll_offset()
        })
    });
}

fn jump_replay(c: &mut Criterion) {
    // Warm the cache once; each iteration replays placements from the
    // origin the way a fast-scroll restore does.
    let mut layout = grid();
    let mut tiles = PatternTiles { count: 8_000 };
    layout
        .move_to_position(6_000, 0.0, &mut tiles)
        .expect("warm replay");

    c.bench_function("jump_replay_6k_cached", |b| {
        b.iter(|| {
            layout
                .move_to_position(black_box(6_000), 0.0, &mut tiles)
                .expect("replay");
            layout.scroll_offset()
        })
    });
}

criterion_group!(benches, steady_scroll, scroll_reversal, jump_replay);
criterion_main!(benches);
