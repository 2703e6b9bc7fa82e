//! Per-run state: configuration, tracker, evaluator and counter.

use serde::{Deserialize, Serialize};

use crate::counting::counter::Counter;
use crate::counting::evaluator::{CrossingEvent, LineCrossingEvaluator};
use crate::counting::line::{CountingLine, DirectionFilter};
use crate::error::Error;
use crate::tracker::{CentroidTracker, Detection, Track, TrackerConfig};

/// Every tunable of a counting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    #[serde(flatten)]
    pub tracker: TrackerConfig,
    pub counting_line: CountingLine,
    pub count_direction: DirectionFilter,
    /// Smallest box area, in square pixels, the detector boundary lets through.
    pub min_detection_area: f32,
    /// Smallest box width or height, in pixels, the detector boundary lets through.
    pub min_detection_side: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            counting_line: CountingLine::default(),
            count_direction: DirectionFilter::Any,
            min_detection_area: 1500.0,
            min_detection_side: 30.0,
        }
    }
}

impl SessionConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.tracker.validate()?;
        self.counting_line.validate()?;
        for (name, value) in [
            ("min_detection_area", self.min_detection_area),
            ("min_detection_side", self.min_detection_side),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidDetectionLimit { name, value });
            }
        }
        Ok(())
    }
}

/// Outcome of one processed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame_id: u64,
    pub crossings: Vec<CrossingEvent>,
    /// `(track id, detection index)` pairs matched this frame
    pub matched: Vec<(u64, usize)>,
    pub spawned: Vec<u64>,
    pub retired: Vec<u64>,
    /// Counter value after this frame
    pub count: u64,
}

/// One independent counting run.
///
/// Frames must be fed in temporal order; each `process_frame` call leaves the
/// registry and counter in a consistent state.
pub struct CountingSession {
    tracker: CentroidTracker,
    evaluator: LineCrossingEvaluator,
    counter: Counter,
    config: SessionConfig,
}

impl CountingSession {
    pub fn new(config: SessionConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            tracker: CentroidTracker::new(config.tracker.clone()),
            evaluator: LineCrossingEvaluator::new(config.counting_line, config.count_direction),
            counter: Counter::new(),
            config,
        })
    }

    /// Associate this frame's detections, then count new crossings.
    pub fn process_frame(&mut self, detections: &[Detection]) -> FrameReport {
        let association = self.tracker.update(detections);
        let frame_id = self.tracker.frame_id();
        let crossings = self
            .evaluator
            .evaluate(self.tracker.registry_mut(), &mut self.counter, frame_id);

        FrameReport {
            frame_id,
            crossings,
            matched: association.matched,
            spawned: association.spawned,
            retired: association.retired,
            count: self.counter.total(),
        }
    }

    pub fn count(&self) -> u64 {
        self.counter.total()
    }

    pub fn counter(&self) -> &Counter {
        &self.counter
    }

    pub fn live_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracker.live_tracks()
    }

    pub fn track(&self, id: u64) -> Option<&Track> {
        self.tracker.registry().get(id)
    }

    /// Index of the last processed frame; 0 before the first.
    pub fn frame_id(&self) -> u64 {
        self.tracker.frame_id()
    }

    pub fn line(&self) -> &CountingLine {
        self.evaluator.line()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
