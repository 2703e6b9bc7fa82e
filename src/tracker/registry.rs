//! Live track storage and ID allocation.

use std::collections::BTreeMap;

use crate::tracker::centroid::Centroid;
use crate::tracker::track::Track;

/// Owns every live track of one session, keyed by ID.
///
/// IDs come from a per-registry monotonic allocator, so two sessions in the
/// same process never interfere and a retired ID is never handed out again.
#[derive(Debug, Clone, Default)]
pub struct TrackRegistry {
    tracks: BTreeMap<u64, Track>,
    next_id: u64,
    history_len: usize,
}

impl TrackRegistry {
    pub fn new(history_len: usize) -> Self {
        Self {
            tracks: BTreeMap::new(),
            next_id: 0,
            history_len,
        }
    }

    /// Register a new track at `centroid` and return its ID.
    pub fn create(&mut self, centroid: &Centroid, frame_id: u64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let track = Track::new(id, centroid, frame_id, self.history_len);
        let previous = self.tracks.insert(id, track);
        assert!(previous.is_none(), "track id {id} allocated twice");
        id
    }

    /// Live tracks in ascending ID order.
    pub fn live_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn live_tracks_mut(&mut self) -> impl Iterator<Item = &mut Track> {
        self.tracks.values_mut()
    }

    /// IDs of live tracks in ascending order.
    pub fn ids(&self) -> Vec<u64> {
        self.tracks.keys().copied().collect()
    }

    pub fn get(&self, id: u64) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Track> {
        self.tracks.get_mut(&id)
    }

    /// Retire a track. Its ID stays burned.
    pub fn remove(&mut self, id: u64) -> Option<Track> {
        self.tracks.remove(&id).map(|mut track| {
            track.mark_removed();
            track
        })
    }

    /// The ID the next `create` will hand out.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
