use super::model::HighlightedNpc;
use super::tracker::{self, SharedTracker};

/// Read side for the overlay renderer, polled once per redraw.
#[derive(Clone)]
pub struct HighlightPublisher {
    tracker: SharedTracker,
}

impl HighlightPublisher {
    pub fn new(tracker: SharedTracker) -> Self {
        Self { tracker }
    }

    /// Highlighted NPCs ordered by index. Unmatched NPCs are left out.
    pub fn current_highlights(&self) -> Vec<HighlightedNpc> {
        tracker::read(&self.tracker)
            .snapshot()
            .into_iter()
            .filter(|npc| npc.classification.is_highlighted())
            .collect()
    }
}
