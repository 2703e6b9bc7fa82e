/// Track state enumeration for the track lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Matched on the most recent frame
    #[default]
    Tracked,
    /// Missed at least one frame, still live
    Lost,
    /// Retired from the registry
    Removed,
}
