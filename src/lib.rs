//! Vehicle counting on video footage: centroid tracking of foreground blobs
//! and one-shot counting of tracks that cross a fixed line.
//!
//! Frames flow detector → [`DetectionFilter`] → [`CountingSession`], which
//! associates centroids with live tracks and then checks each uncounted
//! track against the [`CountingLine`].

pub mod counting;
pub mod integration;
pub mod tracker;

mod error;

pub use counting::{
    Counter, CountingLine, CountingSession, CrossingDirection, CrossingEvent, DirectionFilter,
    FrameReport, SessionConfig,
};
pub use error::Error;
pub use integration::{
    CountingPipeline, DetectionFilter, DetectionSource, FrameRenderer, FrameView, IntoDetections,
};
pub use tracker::{AssignmentStrategy, CentroidTracker, Detection, Rect, Track, TrackerConfig};
