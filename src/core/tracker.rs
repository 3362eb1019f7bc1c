use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::config::ConfigSnapshot;
use super::model::{Classification, HighlightedNpc, NpcId, TrackedNpc};
use super::rules;

/// Tracker shared between the event thread (writer) and overlay readers.
/// Every mutation holds the write guard for its whole duration, so readers
/// never see a half-applied config replacement.
pub type SharedTracker = Arc<RwLock<EntityTracker>>;

/// Result of handling a spawn event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnOutcome {
    pub classification: Classification,
    /// Spawned straight into a highlighted state with notifications enabled.
    pub notify: bool,
}

/// Currently spawned NPCs keyed by host index, plus the installed config.
#[derive(Debug, Default)]
pub struct EntityTracker {
    npcs: BTreeMap<NpcId, TrackedNpc>,
    config: Arc<ConfigSnapshot>,
}

impl EntityTracker {
    pub fn new(config: Arc<ConfigSnapshot>) -> Self {
        Self {
            npcs: BTreeMap::new(),
            config,
        }
    }

    pub fn into_shared(self) -> SharedTracker {
        Arc::new(RwLock::new(self))
    }

    pub fn config(&self) -> &Arc<ConfigSnapshot> {
        &self.config
    }

    /// Start tracking `id`. A leftover entry for a reused index is replaced.
    pub fn on_spawn(&mut self, id: NpcId, name: &str, is_dead: bool) -> SpawnOutcome {
        let npc = evaluate(&self.config, id, name, is_dead);
        let classification = npc.classification;

        if let Some(stale) = self.npcs.insert(id, npc) {
            log::warn!(
                "NPC index {} spawned while still tracked as {:?}; replacing",
                id,
                stale.name
            );
        }
        log::debug!("Spawned NPC {} {:?} -> {:?}", id, name, classification);

        SpawnOutcome {
            classification,
            notify: classification.is_highlighted() && self.config.notify_on_spawn,
        }
    }

    /// Stop tracking `id`. Unknown ids are ignored.
    pub fn on_despawn(&mut self, id: NpcId) -> Option<TrackedNpc> {
        let removed = self.npcs.remove(&id);
        if removed.is_some() {
            log::debug!("Despawned NPC {}", id);
        }
        removed
    }

    /// Re-classify after a rename or death-state change. Only NPCs seen spawning are updated.
    pub fn on_name_or_death_changed(
        &mut self,
        id: NpcId,
        name: &str,
        is_dead: bool,
    ) -> Option<Classification> {
        let slot = self.npcs.get_mut(&id)?;
        *slot = evaluate(&self.config, id, name, is_dead);
        Some(slot.classification)
    }

    /// Install a new config and re-classify everything tracked against it.
    pub fn on_configuration_replaced(&mut self, config: Arc<ConfigSnapshot>) {
        self.config = config;
        for npc in self.npcs.values_mut() {
            *npc = evaluate(&self.config, npc.id, &npc.name, npc.is_dead);
        }
        log::debug!(
            "Re-classified {} NPCs against {} rules",
            self.npcs.len(),
            self.config.rules.len()
        );
    }

    /// Forget every NPC, e.g. when the host leaves the world.
    pub fn clear(&mut self) {
        self.npcs.clear();
    }

    pub fn classify(&self, id: NpcId) -> Option<Classification> {
        self.npcs.get(&id).map(|npc| npc.classification)
    }

    pub fn get(&self, id: NpcId) -> Option<&TrackedNpc> {
        self.npcs.get(&id)
    }

    /// Every tracked NPC, ordered by index.
    pub fn snapshot(&self) -> Vec<HighlightedNpc> {
        self.npcs.values().map(HighlightedNpc::from).collect()
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }
}

fn evaluate(config: &ConfigSnapshot, id: NpcId, name: &str, is_dead: bool) -> TrackedNpc {
    let matched_rule = rules::first_match(name, &config.rules).map(|rule| rule.pattern().to_string());
    TrackedNpc {
        id,
        name: name.to_string(),
        is_dead,
        classification: Classification::derive(matched_rule.is_some(), is_dead),
        matched_rule,
    }
}

/// Shared read access. State is derived, so a poisoned lock is still usable.
pub fn read(tracker: &SharedTracker) -> RwLockReadGuard<'_, EntityTracker> {
    tracker.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn write(tracker: &SharedTracker) -> RwLockWriteGuard<'_, EntityTracker> {
    tracker.write().unwrap_or_else(PoisonError::into_inner)
}
