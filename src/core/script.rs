//! Recorded host events, one JSON object per line.
//!
//! ```text
//! # comment lines and blank lines are skipped
//! {"type": "config_changed", "group": "npcindicators", "key": "npcToHighlight", "value": "goblin"}
//! {"type": "npc_spawned", "id": 0, "name": "Goblin", "is_dead": false}
//! {"type": "menu_entry_added", "option": "Attack", "target": "Goblin", "identifier": 0, "opcode": 9}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::config::{ConfigChanged, Settings};
use super::error::{IndicatorError, Result};
use super::model::{MenuEntry, NpcId};
use super::plugin::NpcIndicatorsPlugin;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    NpcSpawned {
        id: NpcId,
        name: String,
        #[serde(default)]
        is_dead: bool,
    },
    NpcDespawned {
        id: NpcId,
    },
    NpcChanged {
        id: NpcId,
        name: String,
        #[serde(default)]
        is_dead: bool,
    },
    MenuEntryAdded {
        option: String,
        target: String,
        identifier: i32,
        opcode: i32,
    },
    /// The host config store accepted a new value, then announced the change.
    ConfigChanged {
        group: String,
        key: String,
        value: String,
    },
    WorldReset,
}

pub fn read_script(reader: impl BufRead) -> Result<Vec<HostEvent>> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(trimmed).map_err(|source| IndicatorError::Script {
            line: index + 1,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}

pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<HostEvent>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IndicatorError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_script(BufReader::new(file))
}

/// Feed one event to the plugin. Menu events return the entry as annotated.
///
/// Config values for this plugin's group are written into `settings` first,
/// as the host's config store would; a bad value is logged and the change dropped.
pub fn dispatch(
    event: HostEvent,
    plugin: &mut NpcIndicatorsPlugin,
    settings: &mut Settings,
) -> Option<MenuEntry> {
    match event {
        HostEvent::NpcSpawned { id, name, is_dead } => {
            plugin.on_npc_spawned(id, &name, is_dead);
        }
        HostEvent::NpcDespawned { id } => plugin.on_npc_despawned(id),
        HostEvent::NpcChanged { id, name, is_dead } => {
            plugin.on_npc_changed(id, &name, is_dead);
        }
        HostEvent::MenuEntryAdded {
            option,
            target,
            identifier,
            opcode,
        } => {
            let mut entry = MenuEntry::new(option, target, identifier, opcode);
            plugin.on_menu_entry_added(&mut entry);
            return Some(entry);
        }
        HostEvent::ConfigChanged { group, key, value } => {
            let changed = ConfigChanged::new(group, key);
            if changed.is_relevant() {
                if let Err(e) = settings.set(&changed.key, &value) {
                    log::warn!("Rejected config value: {}", e);
                    return None;
                }
            }
            plugin.on_config_changed(&changed, settings);
        }
        HostEvent::WorldReset => plugin.on_world_reset(),
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Classification;
    use crate::core::notifier::LogNotifier;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const SCRIPT: &str = r##"
# dead goblin scenario
{"type": "config_changed", "group": "npcindicators", "key": "npcToHighlight", "value": "goblin"}
{"type": "config_changed", "group": "npcindicators", "key": "deadNpcMenuColor", "value": "#ff0000"}
{"type": "npc_spawned", "id": 0, "name": "Goblin", "is_dead": true}
{"type": "menu_entry_added", "option": "", "target": "Goblin", "identifier": 0, "opcode": 9}
{"type": "npc_despawned", "id": 0}
{"type": "world_reset"}
"##;

    #[test]
    fn test_read_script() {
        let events = read_script(Cursor::new(SCRIPT)).unwrap();
        assert_eq!(events.len(), 6);
        assert_eq!(
            events[2],
            HostEvent::NpcSpawned {
                id: 0,
                name: "Goblin".to_string(),
                is_dead: true
            }
        );
        assert_eq!(events[5], HostEvent::WorldReset);
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let script = "{\"type\": \"npc_despawned\", \"id\": 1}\n\n{\"type\": \"npc_teleported\"}\n";
        match read_script(Cursor::new(script)) {
            Err(IndicatorError::Script { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected script error, got {:?}", other),
        }
    }

    #[test]
    fn test_menu_rows_without_npc() {
        let script = r#"
{"type": "npc_spawned", "id": 0, "name": "Goblin"}
{"type": "menu_entry_added", "option": "Walk here", "target": "", "identifier": -1, "opcode": 23}
{"type": "menu_entry_added", "option": "Attack", "target": "Goblin", "identifier": 0, "opcode": 9, "modified": true}
"#;
        let events = read_script(Cursor::new(script)).unwrap();
        assert_eq!(events.len(), 3);

        let mut settings = Settings::default();
        let mut plugin = NpcIndicatorsPlugin::new(&settings, Box::new(LogNotifier));
        let entries: Vec<_> = events
            .into_iter()
            .filter_map(|event| dispatch(event, &mut plugin, &mut settings))
            .collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].identifier, -1);
        assert!(!entries[0].is_modified());
        // Nothing is highlighted, and the flag only comes from annotation
        assert!(!entries[1].is_modified());
        assert_eq!(entries[1].target, "Goblin");
    }

    #[test]
    fn test_load_script_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SCRIPT).unwrap();
        let events = load_script(file.path()).unwrap();
        assert_eq!(events.len(), 6);
    }

    #[test]
    fn test_dispatch_scenario() {
        let mut settings = Settings::default();
        let mut plugin = NpcIndicatorsPlugin::new(&settings, Box::new(LogNotifier));
        let mut annotated = Vec::new();

        for event in read_script(Cursor::new(SCRIPT)).unwrap().into_iter().take(4) {
            annotated.extend(dispatch(event, &mut plugin, &mut settings));
        }

        assert_eq!(settings.npc_to_highlight, "goblin");
        assert_eq!(plugin.classify(0), Some(Classification::MatchedDead));
        assert_eq!(annotated.len(), 1);
        assert!(annotated[0].is_modified());
        assert_eq!(annotated[0].target, "<col=ff0000>Goblin");
    }

    #[test]
    fn test_dispatch_drops_invalid_config_value() {
        let mut settings = Settings {
            npc_to_highlight: "goblin".to_string(),
            ..Settings::default()
        };
        let mut plugin = NpcIndicatorsPlugin::new(&settings, Box::new(LogNotifier));
        let event = HostEvent::ConfigChanged {
            group: "npcindicators".to_string(),
            key: "highlightColor".to_string(),
            value: "not-a-color".to_string(),
        };
        assert!(dispatch(event, &mut plugin, &mut settings).is_none());
        assert_eq!(plugin.highlights(), vec!["goblin"]);
    }
}
