//! One-shot line-crossing detection over track histories.

use nalgebra::Point2;
use tracing::info;

use crate::counting::counter::Counter;
use crate::counting::line::{CountingLine, CrossingDirection, DirectionFilter, Side};
use crate::tracker::{Track, TrackRegistry};

/// A track crossing the counting line, reported once per track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingEvent {
    pub track_id: u64,
    /// Frame on which the crossing was observed
    pub frame_id: u64,
    pub direction: CrossingDirection,
    /// Track position after the crossing
    pub position: Point2<f32>,
}

#[derive(Debug, Clone)]
pub struct LineCrossingEvaluator {
    line: CountingLine,
    filter: DirectionFilter,
}

impl LineCrossingEvaluator {
    pub fn new(line: CountingLine, filter: DirectionFilter) -> Self {
        Self { line, filter }
    }

    pub fn line(&self) -> &CountingLine {
        &self.line
    }

    /// Direction in which `track` crossed between its last two positions, if
    /// it did and that direction is counted.
    ///
    /// A latest position exactly on the line keeps the previous side, so
    /// nothing fires until the track leaves the line. The previous side is
    /// taken from `Track::last_off_line`, however long the track sat on the
    /// line; a track never evaluated before falls back to its history.
    pub fn crossing(&self, track: &Track) -> Option<CrossingDirection> {
        if track.counted || track.position_history.len() < 2 {
            return None;
        }

        let current = track.position();
        let current_side = self.line.side(&current);
        if current_side == Side::On {
            return None;
        }

        let previous = match track.last_off_line {
            Some(p) => p,
            None => *track
                .position_history
                .iter()
                .rev()
                .skip(1)
                .find(|p| self.line.side(p) != Side::On)?,
        };
        if self.line.side(&previous) == current_side {
            return None;
        }
        if !self.line.crossing_in_bounds(&previous, &current) {
            return None;
        }

        let direction = match current_side {
            Side::Positive => CrossingDirection::Positive,
            _ => CrossingDirection::Negative,
        };
        self.filter.accepts(direction).then_some(direction)
    }

    /// Check every live track after association on `frame_id`, marking and
    /// counting the ones that just crossed.
    pub fn evaluate(
        &self,
        registry: &mut TrackRegistry,
        counter: &mut Counter,
        frame_id: u64,
    ) -> Vec<CrossingEvent> {
        let mut events = Vec::new();
        for track in registry.live_tracks_mut() {
            let crossed = self.crossing(track);
            let position = track.position();
            if self.line.side(&position) != Side::On {
                track.last_off_line = Some(position);
            }

            let Some(direction) = crossed else {
                continue;
            };
            track.counted = true;
            counter.record(direction);

            info!(
                track_id = track.id,
                frame = frame_id,
                ?direction,
                x = position.x,
                y = position.y,
                total = counter.total(),
                "line crossed"
            );
            events.push(CrossingEvent {
                track_id: track.id,
                frame_id,
                direction,
                position,
            });
        }
        events
    }
}
