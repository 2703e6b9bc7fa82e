mod centroid;
mod centroid_tracker;
mod matching;
mod rect;
mod registry;
mod track;
mod track_state;

pub use centroid::{Centroid, extract_centroids};
pub use centroid_tracker::{AssignmentStrategy, AssociationSummary, CentroidTracker, TrackerConfig};
pub use matching::{
    AssignmentResult, Detection, euclidean_distance, greedy_assignment, linear_assignment,
};
pub use rect::Rect;
pub use registry::TrackRegistry;
pub use track::Track;
pub use track_state::TrackState;
