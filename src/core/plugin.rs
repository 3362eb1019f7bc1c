//! Event-dispatch facade: the host delivers events here, serially, on one thread.

use std::sync::Arc;

use chrono::Utc;

use super::annotator::MenuAnnotator;
use super::config::{ConfigChanged, ConfigSnapshot, Settings};
use super::highlights::HighlightPublisher;
use super::model::{Classification, HighlightedNpc, MenuEntry, NpcId};
use super::notifier::{Notifier, SpawnNotice};
use super::tracker::{self, EntityTracker, SharedTracker, SpawnOutcome};

pub struct NpcIndicatorsPlugin {
    tracker: SharedTracker,
    annotator: MenuAnnotator,
    notifier: Box<dyn Notifier>,
}

impl NpcIndicatorsPlugin {
    pub fn new(settings: &Settings, notifier: Box<dyn Notifier>) -> Self {
        let config = Arc::new(ConfigSnapshot::from_settings(settings));
        Self {
            tracker: EntityTracker::new(config).into_shared(),
            annotator: MenuAnnotator::new(),
            notifier,
        }
    }

    /// Re-derive the snapshot when one of our keys changed.
    /// Returns false when the change belongs to another group.
    pub fn on_config_changed(&mut self, event: &ConfigChanged, settings: &Settings) -> bool {
        if !event.is_relevant() {
            return false;
        }

        let config = Arc::new(ConfigSnapshot::from_settings(settings));
        log::info!(
            "Config key {} changed; highlighting {:?}",
            event.key,
            config.rules.tokens()
        );
        tracker::write(&self.tracker).on_configuration_replaced(config);
        true
    }

    pub fn on_npc_spawned(&mut self, id: NpcId, name: &str, is_dead: bool) -> SpawnOutcome {
        let outcome = tracker::write(&self.tracker).on_spawn(id, name, is_dead);

        if outcome.notify {
            let notice = SpawnNotice {
                npc: HighlightedNpc {
                    id,
                    name: name.to_string(),
                    classification: outcome.classification,
                },
                raised_at: Utc::now(),
            };
            self.notifier.notify(&notice);
        }
        outcome
    }

    pub fn on_npc_despawned(&mut self, id: NpcId) {
        tracker::write(&self.tracker).on_despawn(id);
    }

    pub fn on_npc_changed(&mut self, id: NpcId, name: &str, is_dead: bool) -> Option<Classification> {
        tracker::write(&self.tracker).on_name_or_death_changed(id, name, is_dead)
    }

    /// Host left the world (login screen, hopping); every index is now invalid.
    pub fn on_world_reset(&mut self) {
        tracker::write(&self.tracker).clear();
        log::debug!("World reset; tracker cleared");
    }

    pub fn on_menu_entry_added(&self, entry: &mut MenuEntry) -> bool {
        self.annotator.annotate(entry, &tracker::read(&self.tracker))
    }

    /// Active rule tokens in first-seen order.
    pub fn highlights(&self) -> Vec<String> {
        tracker::read(&self.tracker)
            .config()
            .rules
            .tokens()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn classify(&self, id: NpcId) -> Option<Classification> {
        tracker::read(&self.tracker).classify(id)
    }

    pub fn publisher(&self) -> HighlightPublisher {
        HighlightPublisher::new(Arc::clone(&self.tracker))
    }
}
