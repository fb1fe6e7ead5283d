//! Greedy lane selection for new placements.

use lanegrid_layout::Direction;

use super::lanes::{LaneInfo, LaneSet};

/// Chooses the contiguous lanes a new placement should occupy.
///
/// Every window of `lane_span` adjacent lanes is a candidate; there are
/// `lane_count - lane_span + 1` of them. A window's governing edge is the
/// most advanced frontier inside it: the line the item has to clear so it
/// cannot overlap content already packed into those lanes. The scan picks
/// the window whose governing edge is least advanced in the direction of
/// travel, ties going to the lowest start lane, and anchors the item on the
/// first lane that produces that edge.
///
/// This is an online shelf-packing heuristic: it always grows the
/// least-advanced part of the layout, keeping lanes balanced without
/// attempting optimal packing. Items arrive in index order and placements
/// are final, so nothing better is available online.
///
/// Spans are validated where they are declared; a span that cannot fit the
/// grid reaching this scan is a caller bug.
pub fn find_lane(lanes: &LaneSet, lane_span: usize, direction: Direction) -> LaneInfo {
    let lane_count = lanes.lane_count();
    assert!(
        lane_span >= 1 && lane_span <= lane_count,
        "unplaceable lane span {lane_span} reached the placement scan \
         (lane count {lane_count}); spans must be validated at declaration"
    );

    let mut best: Option<(f32, LaneInfo)> = None;

    for start_lane in 0..=(lane_count - lane_span) {
        // Governing edge of this window and the lane producing it.
        let mut anchor_lane = start_lane;
        let mut governing = window_edge(lanes, start_lane, direction);
        for lane in (start_lane + 1)..(start_lane + lane_span) {
            let edge = window_edge(lanes, lane, direction);
            let more_advanced = match direction {
                Direction::End => edge > governing,
                Direction::Start => edge < governing,
            };
            if more_advanced {
                governing = edge;
                anchor_lane = lane;
            }
        }

        let better = match (&best, direction) {
            (None, _) => true,
            (Some((best_edge, _)), Direction::End) => governing < *best_edge,
            (Some((best_edge, _)), Direction::Start) => governing > *best_edge,
        };
        if better {
            best = Some((
                governing,
                LaneInfo {
                    start_lane,
                    anchor_lane,
                },
            ));
        }
    }

    // At least one window exists whenever the span fits the grid.
    best.map(|(_, info)| info)
        .expect("a validated span always has a candidate window")
}

fn window_edge(lanes: &LaneSet, lane: usize, direction: Direction) -> f32 {
    let edges = lanes.edges_of(lane);
    match direction {
        Direction::End => edges.leading,
        Direction::Start => edges.trailing,
    }
}
