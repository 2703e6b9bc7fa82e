//! Frame-to-frame association of centroids with live tracks.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;
use crate::tracker::centroid::{Centroid, extract_centroids};
use crate::tracker::matching::{self, AssignmentResult, Detection};
use crate::tracker::registry::TrackRegistry;
use crate::tracker::track::Track;

/// How current centroids are paired with live tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStrategy {
    /// Globally-nearest pair first, repeatedly.
    #[default]
    Greedy,
    /// Minimum total distance (Jonker-Volgenant).
    Optimal,
}

/// Configuration for the CentroidTracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Pairs at or beyond this pixel distance are never matched.
    pub max_match_distance: f32,
    /// A track missed on more than this many consecutive frames is retired.
    pub max_disappeared: u32,
    /// Number of recent centroids kept per track.
    pub history_len: usize,
    pub assignment: AssignmentStrategy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_match_distance: 80.0,
            max_disappeared: 30,
            history_len: 30,
            assignment: AssignmentStrategy::Greedy,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.max_match_distance.is_finite() && self.max_match_distance > 0.0) {
            return Err(Error::InvalidMatchDistance(self.max_match_distance));
        }
        if self.max_disappeared < 1 {
            return Err(Error::InvalidMaxDisappeared(self.max_disappeared));
        }
        if self.history_len < 2 {
            return Err(Error::InvalidHistoryLen(self.history_len));
        }
        Ok(())
    }
}

/// What one association step did to the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationSummary {
    /// `(track id, centroid index)` pairs that were matched
    pub matched: Vec<(u64, usize)>,
    /// IDs created this frame, in centroid order
    pub spawned: Vec<u64>,
    /// IDs retired this frame, in ascending order
    pub retired: Vec<u64>,
}

pub struct CentroidTracker {
    registry: TrackRegistry,
    frame_id: u64,
    config: TrackerConfig,
}

impl CentroidTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            registry: TrackRegistry::new(config.history_len),
            frame_id: 0,
            config,
        }
    }

    /// Advance one frame with this frame's detections.
    pub fn update(&mut self, detections: &[Detection]) -> AssociationSummary {
        debug_assert!(
            detections.iter().all(|d| d.bbox.has_positive_size()),
            "detections must be filtered before tracking"
        );
        let centroids = extract_centroids(detections);
        self.update_centroids(&centroids)
    }

    /// Advance one frame with already extracted centroids.
    pub fn update_centroids(&mut self, centroids: &[Centroid]) -> AssociationSummary {
        self.frame_id += 1;
        let frame_id = self.frame_id;
        let mut summary = AssociationSummary::default();

        // Rows follow ascending track ID, which is what makes matrix-order
        // tie-breaking equal to lowest-ID-wins.
        let track_ids = self.registry.ids();
        let track_points: Vec<Point2<f32>> =
            self.registry.live_tracks().map(Track::position).collect();
        let dists = matching::euclidean_distance(&track_points, centroids);

        let AssignmentResult {
            matches,
            unmatched_tracks,
            unmatched_detections,
        } = match self.config.assignment {
            AssignmentStrategy::Greedy => {
                matching::greedy_assignment(&dists, self.config.max_match_distance)
            }
            AssignmentStrategy::Optimal => {
                matching::linear_assignment(&dists, self.config.max_match_distance)
            }
        };

        for (row, col) in matches {
            let id = track_ids[row];
            if let Some(track) = self.registry.get_mut(id) {
                track.update(&centroids[col], frame_id);
                summary.matched.push((id, col));
            }
        }

        for row in unmatched_tracks {
            let id = track_ids[row];
            let expired = match self.registry.get_mut(id) {
                Some(track) => {
                    track.mark_missed();
                    track.disappeared_count > self.config.max_disappeared
                }
                None => false,
            };
            if expired {
                self.registry.remove(id);
                debug!(track_id = id, frame = frame_id, "track retired");
                summary.retired.push(id);
            }
        }

        for col in unmatched_detections {
            let centroid = &centroids[col];
            let id = self.registry.create(centroid, frame_id);
            debug!(
                track_id = id,
                frame = frame_id,
                x = centroid.x(),
                y = centroid.y(),
                "track spawned"
            );
            summary.spawned.push(id);
        }

        debug!(
            frame = frame_id,
            matched = summary.matched.len(),
            spawned = summary.spawned.len(),
            retired = summary.retired.len(),
            live = self.registry.len(),
            "association done"
        );

        summary
    }

    /// Index of the last processed frame; 0 before the first update.
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TrackRegistry {
        &mut self.registry
    }

    pub fn live_tracks(&self) -> impl Iterator<Item = &Track> {
        self.registry.live_tracks()
    }
}
