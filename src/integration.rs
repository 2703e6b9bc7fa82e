//! Integration module for connecting a blob detector and an overlay renderer
//! with the counting session.

mod detector;
mod filter;
mod pipeline;
mod render;

pub use detector::{DetectionSource, IntoDetections};
pub use filter::DetectionFilter;
pub use pipeline::CountingPipeline;
pub use render::{FrameRenderer, FrameView};
