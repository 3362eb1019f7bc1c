use chrono::{DateTime, Utc};

use super::model::HighlightedNpc;

/// Raised when a newly spawned NPC is highlighted and spawn notifications are on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnNotice {
    pub npc: HighlightedNpc,
    pub raised_at: DateTime<Utc>,
}

/// Delivery is owned by the host; this crate only decides when to notify.
pub trait Notifier: Send {
    fn notify(&self, notice: &SpawnNotice);
}

/// Writes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &SpawnNotice) {
        log::info!(
            "[{}] {} spawned ({:?})",
            notice.raised_at.format("%H:%M:%S"),
            notice.npc.name,
            notice.npc.classification
        );
    }
}
