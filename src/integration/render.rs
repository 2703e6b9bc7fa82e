//! Read-only hand-off of per-frame state to an overlay renderer.

use crate::counting::{CountingLine, CrossingEvent};
use crate::tracker::Track;

/// Everything a renderer may draw for one frame.
#[derive(Debug, Clone)]
pub struct FrameView<'a> {
    pub frame_id: u64,
    /// Live tracks in ascending ID order
    pub tracks: Vec<&'a Track>,
    pub line: &'a CountingLine,
    pub count: u64,
    /// Crossings that fired on this frame
    pub crossings: &'a [CrossingEvent],
}

/// Overlay sink, e.g. a window drawing boxes, IDs and the running count.
pub trait FrameRenderer {
    fn render(&mut self, view: &FrameView<'_>);
}
