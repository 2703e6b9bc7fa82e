//! Single vehicle track.

use std::collections::VecDeque;

use nalgebra::Point2;

use crate::tracker::centroid::Centroid;
use crate::tracker::rect::Rect;
use crate::tracker::track_state::TrackState;

/// One physical vehicle followed across frames.
#[derive(Debug, Clone)]
pub struct Track {
    /// Unique track identifier, never reused within a session
    pub id: u64,
    /// Current track state
    pub state: TrackState,
    /// Matched centroids, oldest first
    pub position_history: VecDeque<Point2<f32>>,
    /// Most recently matched bounding box
    pub bbox: Rect,
    /// Frame index at which the track was created
    pub start_frame: u64,
    /// Frame index of the most recent match
    pub last_seen_frame: u64,
    /// Consecutive frames without a match
    pub disappeared_count: u32,
    /// Set once the track has produced a crossing event
    pub counted: bool,
    /// Latest position seen off the counting line. Maintained by the crossing
    /// evaluator, and outlives points dropped from the bounded history.
    pub last_off_line: Option<Point2<f32>>,
    history_len: usize,
}

impl Track {
    /// Create a track whose history holds only `centroid`.
    ///
    /// `history_len` bounds the history; it is clamped to at least 2 so a
    /// crossing can always be evaluated.
    pub fn new(id: u64, centroid: &Centroid, frame_id: u64, history_len: usize) -> Self {
        let history_len = history_len.max(2);
        let mut position_history = VecDeque::with_capacity(history_len);
        position_history.push_back(centroid.position);
        Self {
            id,
            state: TrackState::Tracked,
            position_history,
            bbox: centroid.bbox,
            start_frame: frame_id,
            last_seen_frame: frame_id,
            disappeared_count: 0,
            counted: false,
            last_off_line: None,
            history_len,
        }
    }

    /// Latest matched position.
    pub fn position(&self) -> Point2<f32> {
        // History is never empty: it starts with one entry and only drops
        // from the front once it exceeds `history_len >= 2`.
        self.position_history
            .back()
            .copied()
            .unwrap_or_else(|| Point2::new(0.0, 0.0))
    }

    /// Record a match on `frame_id`.
    pub fn update(&mut self, centroid: &Centroid, frame_id: u64) {
        self.position_history.push_back(centroid.position);
        while self.position_history.len() > self.history_len {
            self.position_history.pop_front();
        }
        self.bbox = centroid.bbox;
        self.last_seen_frame = frame_id;
        self.disappeared_count = 0;
        self.state = TrackState::Tracked;
    }

    /// Record a frame without a match.
    pub fn mark_missed(&mut self) {
        self.disappeared_count += 1;
        self.state = TrackState::Lost;
    }

    pub fn mark_removed(&mut self) {
        self.state = TrackState::Removed;
    }
}
