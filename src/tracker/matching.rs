//! Matching utilities for centroid association.

use nalgebra::Point2;
use ndarray::Array2;

use crate::tracker::centroid::Centroid;
use crate::tracker::rect::Rect;

/// Cost given to pairs that may never be matched, and to padding cells.
const UNASSIGNABLE_COST: f64 = 1e6;
/// Scale of the tie-break reward for pairing low rows with low columns.
const TIE_BREAK_EPSILON: f64 = 1e-6;

/// Detection input for the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Bounding box (stored as TLWH)
    pub bbox: Rect,
}

impl Detection {
    /// Build from TLBR corners (x1, y1, x2, y2).
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            bbox: Rect::from_tlbr(x1, y1, x2, y2),
        }
    }

    /// Build from centre and size (cx, cy, width, height).
    pub fn from_xywh(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self {
            bbox: Rect::from_xywh(cx, cy, width, height),
        }
    }

    pub fn from_rect(bbox: Rect) -> Self {
        Self { bbox }
    }
}

/// `[x, y, width, height]`, the layout contour bounding-rect routines return.
impl From<[f32; 4]> for Detection {
    fn from([x, y, width, height]: [f32; 4]) -> Self {
        Self::from_rect(Rect::new(x, y, width, height))
    }
}

/// Compute the Euclidean distance matrix between track positions (rows) and
/// current centroids (columns).
pub fn euclidean_distance(track_points: &[Point2<f32>], centroids: &[Centroid]) -> Array2<f32> {
    let mut dists = Array2::zeros((track_points.len(), centroids.len()));
    for (i, t) in track_points.iter().enumerate() {
        for (j, c) in centroids.iter().enumerate() {
            dists[[i, j]] = nalgebra::distance(t, &c.position);
        }
    }
    dists
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentResult {
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

impl AssignmentResult {
    fn empty(num_rows: usize, num_cols: usize) -> Self {
        Self {
            matches: vec![],
            unmatched_tracks: (0..num_rows).collect(),
            unmatched_detections: (0..num_cols).collect(),
        }
    }

    fn from_masks(matches: Vec<(usize, usize)>, row_used: &[bool], col_used: &[bool]) -> Self {
        let unused = |mask: &[bool]| -> Vec<usize> {
            mask.iter()
                .enumerate()
                .filter_map(|(i, &used)| if used { None } else { Some(i) })
                .collect()
        };
        Self {
            unmatched_tracks: unused(row_used),
            unmatched_detections: unused(col_used),
            matches,
        }
    }
}

/// Greedy nearest-neighbour assignment.
///
/// Repeatedly takes the globally smallest remaining cost strictly below
/// `max_distance`, pairing its row and column and retiring both. Equal costs
/// resolve to the lowest row, then the lowest column, so callers that order
/// rows by track ID get the lowest-ID-wins rule.
pub fn greedy_assignment(cost_matrix: &Array2<f32>, max_distance: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();
    if num_rows == 0 || num_cols == 0 {
        return AssignmentResult::empty(num_rows, num_cols);
    }

    let mut candidates: Vec<(f32, usize, usize)> = cost_matrix
        .indexed_iter()
        .filter(|&(_, &d)| d < max_distance)
        .map(|((i, j), &d)| (d, i, j))
        .collect();
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

    let mut row_used = vec![false; num_rows];
    let mut col_used = vec![false; num_cols];
    let mut matches = vec![];

    for (_, row, col) in candidates {
        if row_used[row] || col_used[col] {
            continue;
        }
        row_used[row] = true;
        col_used[col] = true;
        matches.push((row, col));
    }

    AssignmentResult::from_masks(matches, &row_used, &col_used)
}

/// Minimum-cost assignment via Jonker-Volgenant.
///
/// Pairs at or beyond `max_distance` are priced out of the problem and never
/// returned. Among equal-cost matchings the solver prefers low rows paired
/// with low columns: a contested column goes to the lowest row, and a fully
/// symmetric matrix resolves to `(0, 0), (1, 1), ...`.
pub fn linear_assignment(cost_matrix: &Array2<f32>, max_distance: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();
    if num_rows == 0 || num_cols == 0 {
        return AssignmentResult::empty(num_rows, num_cols);
    }

    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), UNASSIGNABLE_COST);

    // Cell (i, j) is discounted by (rows - i) * (cols - j). Every matching of
    // the same size pays the same `rows * cols` base, so the rearrangement
    // inequality leaves the sorted pairing as the cheapest among equal costs.
    let full_rank = (num_rows * num_cols) as f64;
    for i in 0..num_rows {
        for j in 0..num_cols {
            let d = cost_matrix[[i, j]];
            if d < max_distance {
                let reward = ((num_rows - i) * (num_cols - j)) as f64;
                padded[[i, j]] = d as f64 + (full_rank - reward) * TIE_BREAK_EPSILON;
            }
        }
    }

    let mut row_used = vec![false; num_rows];
    let mut col_used = vec![false; num_cols];
    let mut matches = vec![];

    // The solver only fails on non-finite input, which the padding rules out;
    // treat a failure as "nothing matched" so every track ages normally.
    if let Ok((row_to_col, _)) = lapjv::lapjv(&padded) {
        for (row_idx, &col_idx) in row_to_col.iter().enumerate().take(num_rows) {
            if col_idx < num_cols && cost_matrix[[row_idx, col_idx]] < max_distance {
                row_used[row_idx] = true;
                col_used[col_idx] = true;
                matches.push((row_idx, col_idx));
            }
        }
    }

    AssignmentResult::from_masks(matches, &row_used, &col_used)
}
