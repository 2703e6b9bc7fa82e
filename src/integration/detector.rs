//! Trait for foreground blob detectors.

use crate::tracker::Detection;

/// Trait for the detector that turns raw frames into candidate boxes.
///
/// Implementations own background modelling, shadow suppression and
/// morphological cleanup; the counter only sees the boxes they return.
///
/// # Example
///
/// ```ignore
/// use line_counter::{DetectionSource, Detection};
///
/// struct MogDetector {
///     // Background model here
/// }
///
/// impl DetectionSource for MogDetector {
///     type Error = std::io::Error;
///
///     fn detect(
///         &mut self,
///         input: &[u8],
///         width: u32,
///         height: u32,
///     ) -> Result<Vec<Detection>, Self::Error> {
///         // Update the background model and return foreground boxes
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Run detection on one raw frame.
    ///
    /// # Arguments
    /// * `input` - Raw pixel buffer (layout depends on implementation)
    /// * `width` - Frame width in pixels
    /// * `height` - Frame height in pixels
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}

/// Helper trait for converting detector-specific outputs to `Detection`.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

/// `[x, y, width, height]` boxes, as contour bounding-rect routines return them.
impl IntoDetections for Vec<[f32; 4]> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter().map(Detection::from).collect()
    }
}
