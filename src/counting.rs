//! Line geometry, crossing evaluation and the per-run counting session.

mod counter;
mod evaluator;
mod line;
mod session;

pub use counter::Counter;
pub use evaluator::{CrossingEvent, LineCrossingEvaluator};
pub use line::{CountingLine, CrossingDirection, DirectionFilter, Side};
pub use session::{CountingSession, FrameReport, SessionConfig};
