// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loop assembly and surface extraction (`spec.md` §4.3): stitch the
//! unordered segments a single layer's facet slicing produced into closed
//! polylines, then classify each loop as an exterior boundary or a hole by
//! its signed area, producing the layer's [`ExPolygons`].

use layercore_types::{ExPolygon, ExPolygons, Point2, Segment};
use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;

/// How close two segment endpoints must be to be treated as the same
/// vertex when chaining segments into a loop. Sliced endpoints that should
/// coincide exactly can differ by a few ULPs after independent
/// facet/plane interpolation, so exact equality is not safe here.
pub const JOIN_EPSILON: f64 = 1e-6;

fn key(point: Point2) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
    let scale = 1.0 / JOIN_EPSILON;
    (
        OrderedFloat((point.0 * scale).round() / scale),
        OrderedFloat((point.1 * scale).round() / scale),
    )
}

/// Chain a layer's raw segments into closed polylines.
///
/// Segments are indexed by their start point so each loop can be walked by
/// repeatedly looking up "what segment starts where the last one ended".
/// A well-formed watertight mesh slice leaves no unmatched endpoints; any
/// segment left over after every closeable chain is extracted is dropped
/// here; `spec.md` §4.5 (Slice Repair) is responsible for deciding whether
/// dropped material should be flagged to the caller.
pub fn assemble_loops(segments: &[Segment]) -> Vec<Vec<Point2>> {
    let mut by_start: FxHashMap<_, Vec<usize>> = FxHashMap::default();
    for (i, segment) in segments.iter().enumerate() {
        by_start.entry(key(segment.a)).or_default().push(i);
    }

    let mut used = vec![false; segments.len()];
    let mut loops = Vec::new();

    for start_idx in 0..segments.len() {
        if used[start_idx] {
            continue;
        }
        let mut loop_points = vec![segments[start_idx].a];
        let mut current = start_idx;
        used[current] = true;

        loop {
            let next_point = segments[current].b;
            loop_points.push(next_point);

            if key(next_point) == key(loop_points[0]) {
                break;
            }

            let candidates = by_start.get(&key(next_point));
            let Some(next_idx) = candidates
                .into_iter()
                .flatten()
                .copied()
                .find(|&i| !used[i])
            else {
                // Dangling chain: no match found, can't close this loop.
                break;
            };
            used[next_idx] = true;
            current = next_idx;
        }

        if loop_points.len() >= 4 && key(*loop_points.last().unwrap()) == key(loop_points[0]) {
            loop_points.pop(); // drop the duplicated closing point
            loops.push(loop_points);
        }
    }

    loops
}

fn signed_area(contour: &[Point2]) -> f64 {
    let n = contour.len();
    let mut sum = 0.0;
    for i in 0..n {
        let (x0, y0) = contour[i];
        let (x1, y1) = contour[(i + 1) % n];
        sum += x0 * y1 - x1 * y0;
    }
    sum / 2.0
}

/// Classify assembled loops into expolygons: counter-clockwise loops
/// (positive signed area) are exterior boundaries, clockwise loops are
/// holes. Each hole is assigned to the smallest-area exterior loop that
/// contains one of its points, matching the nesting rule `spec.md` §4.3
/// describes for coincident/overlapping loops.
pub fn loops_to_expolygons(loops: Vec<Vec<Point2>>) -> ExPolygons {
    let mut exteriors: Vec<(Vec<Point2>, f64)> = Vec::new();
    let mut holes: Vec<Vec<Point2>> = Vec::new();

    for contour in loops {
        let area = signed_area(&contour);
        if area > 0.0 {
            exteriors.push((contour, area));
        } else if area < 0.0 {
            holes.push(contour);
        }
    }

    let mut result: Vec<ExPolygon> = exteriors
        .into_iter()
        .map(|(outer, area)| (ExPolygon::new(outer), area))
        .collect();

    for hole in holes {
        let probe = hole[0];
        let owner = result
            .iter()
            .enumerate()
            .filter(|(_, (expoly, _))| point_in_contour(probe, &expoly.outer))
            .min_by(|(_, (_, a)), (_, (_, b))| a.partial_cmp(b).unwrap());

        if let Some((idx, _)) = owner {
            result[idx].0.holes.push(hole);
        }
        // A hole with no enclosing exterior is geometrically inconsistent
        // slice data; silently dropping it matches how repair treats other
        // unmatched fragments rather than failing the whole layer.
    }

    result.into_iter().map(|(expolygon, _)| expolygon).collect()
}

fn point_in_contour(point: Point2, contour: &[Point2]) -> bool {
    let (px, py) = point;
    let mut inside = false;
    let n = contour.len();
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = contour[i];
        let (xj, yj) = contour[j];
        if ((yi > py) != (yj > py)) && (px < (xj - xi) * (py - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Convenience: slice a layer's segments straight into expolygons.
pub fn segments_to_expolygons(segments: &[Segment]) -> ExPolygons {
    loops_to_expolygons(assemble_loops(segments))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_segments(x0: f64, y0: f64, side: f64) -> Vec<Segment> {
        let pts = [
            (x0, y0),
            (x0 + side, y0),
            (x0 + side, y0 + side),
            (x0, y0 + side),
        ];
        (0..4)
            .map(|i| Segment {
                a: pts[i],
                b: pts[(i + 1) % 4],
            })
            .collect()
    }

    #[test]
    fn assembles_a_single_closed_square() {
        let segments = square_segments(0.0, 0.0, 10.0);
        let loops = assemble_loops(&segments);
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 4);
    }

    #[test]
    fn reorders_shuffled_segments_into_one_loop() {
        let mut segments = square_segments(0.0, 0.0, 10.0);
        segments.swap(0, 2);
        segments.swap(1, 3);
        let loops = assemble_loops(&segments);
        assert_eq!(loops.len(), 1);
    }

    #[test]
    fn outer_square_with_hole_nests_correctly() {
        let mut segments = square_segments(0.0, 0.0, 10.0);
        // Reverse-wound (clockwise) inner square is classified as a hole.
        let hole_pts = [(4.0, 4.0), (4.0, 6.0), (6.0, 6.0), (6.0, 4.0)];
        for i in 0..4 {
            segments.push(Segment {
                a: hole_pts[i],
                b: hole_pts[(i + 1) % 4],
            });
        }
        let expolygons = segments_to_expolygons(&segments);
        assert_eq!(expolygons.len(), 1);
        assert_eq!(expolygons[0].holes.len(), 1);
    }

    #[test]
    fn dangling_segment_is_dropped_not_panicking() {
        let mut segments = square_segments(0.0, 0.0, 10.0);
        segments.push(Segment {
            a: (100.0, 100.0),
            b: (200.0, 200.0),
        });
        let loops = assemble_loops(&segments);
        assert_eq!(loops.len(), 1);
    }
}
