//! CountingPipeline for combining detection with counting.

use crate::counting::{CountingSession, FrameReport, SessionConfig};
use crate::error::Error;

use super::{DetectionFilter, DetectionSource, FrameRenderer, FrameView};

/// A detector, its boundary filter and a counting session, run frame by frame.
pub struct CountingPipeline<D: DetectionSource> {
    detector: D,
    filter: DetectionFilter,
    session: CountingSession,
}

impl<D: DetectionSource> CountingPipeline<D> {
    /// Create a new counting pipeline with the given detector and config.
    pub fn new(detector: D, config: SessionConfig) -> Result<Self, Error> {
        let filter = DetectionFilter::from_config(&config);
        Ok(Self {
            detector,
            filter,
            session: CountingSession::new(config)?,
        })
    }

    /// Create a new counting pipeline with default configuration.
    pub fn with_default_config(detector: D) -> Result<Self, Error> {
        Self::new(detector, SessionConfig::default())
    }

    /// Process a single frame.
    ///
    /// Detector errors are returned as-is and leave the session untouched.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameReport, D::Error> {
        let detections = self.detector.detect(input, width, height)?;
        let detections = self.filter.apply(detections, width, height);
        Ok(self.session.process_frame(&detections))
    }

    /// Process a single frame, then hand the result to `renderer`.
    pub fn process_frame_with<R: FrameRenderer>(
        &mut self,
        renderer: &mut R,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameReport, D::Error> {
        let report = self.process_frame(input, width, height)?;
        let view = FrameView {
            frame_id: report.frame_id,
            tracks: self.session.live_tracks().collect(),
            line: self.session.line(),
            count: report.count,
            crossings: &report.crossings,
        };
        renderer.render(&view);
        Ok(report)
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    pub fn session(&self) -> &CountingSession {
        &self.session
    }
}
