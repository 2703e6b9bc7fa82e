//! Detector-boundary validation of candidate boxes.

use tracing::{debug, warn};

use crate::counting::SessionConfig;
use crate::tracker::Detection;

/// Drops boxes the tracker must never see: malformed ones, ones poking out
/// of the frame, and blobs too small to be a vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionFilter {
    pub min_area: f32,
    pub min_side: f32,
}

impl Default for DetectionFilter {
    fn default() -> Self {
        Self {
            min_area: 1500.0,
            min_side: 30.0,
        }
    }
}

impl DetectionFilter {
    pub fn new(min_area: f32, min_side: f32) -> Self {
        Self { min_area, min_side }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.min_detection_area, config.min_detection_side)
    }

    /// Whether `det` may be passed to the tracker for a `width` x `height` frame.
    pub fn accepts(&self, det: &Detection, width: u32, height: u32) -> bool {
        let bbox = &det.bbox;
        if !bbox.has_positive_size() || !bbox.is_within(width, height) {
            warn!(?bbox, width, height, "malformed detection dropped");
            return false;
        }
        if bbox.area() < self.min_area
            || bbox.width < self.min_side
            || bbox.height < self.min_side
        {
            debug!(?bbox, "detection below size limits");
            return false;
        }
        true
    }

    pub fn apply(&self, detections: Vec<Detection>, width: u32, height: u32) -> Vec<Detection> {
        detections
            .into_iter()
            .filter(|d| self.accepts(d, width, height))
            .collect()
    }
}
