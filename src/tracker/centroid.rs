//! Centroid extraction: bounding boxes to 2D points with their size metadata.

use nalgebra::Point2;

use crate::tracker::matching::Detection;
use crate::tracker::rect::Rect;

/// Geometric centre of one detection, carrying the box it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    /// Centre point `(x + width / 2, y + height / 2)`
    pub position: Point2<f32>,
    /// Source bounding box in TLWH format
    pub bbox: Rect,
}

impl Centroid {
    pub fn from_rect(bbox: Rect) -> Self {
        let (cx, cy) = bbox.center();
        Self {
            position: Point2::new(cx, cy),
            bbox,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }
}

impl From<&Detection> for Centroid {
    fn from(det: &Detection) -> Self {
        Self::from_rect(det.bbox)
    }
}

/// One centroid per detection, same length and order.
pub fn extract_centroids(detections: &[Detection]) -> Vec<Centroid> {
    detections.iter().map(Centroid::from).collect()
}
