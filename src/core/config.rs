use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::error::{IndicatorError, Result};
use super::rules::{self, RuleSet};

/// Namespace under which the host stores this plugin's keys.
pub const CONFIG_GROUP: &str = "npcindicators";

pub const KEY_NPC_TO_HIGHLIGHT: &str = "npcToHighlight";
pub const KEY_HIGHLIGHT_COLOR: &str = "highlightColor";
pub const KEY_DEAD_NPC_MENU_COLOR: &str = "deadNpcMenuColor";
pub const KEY_HIGHLIGHT_MENU_NAMES: &str = "highlightMenuNames";
pub const KEY_NOTIFY_ON_SPAWN: &str = "notifyOnSpawn";

/// Raw plugin settings as the host's config store holds them.
/// Keys mirror the host's camelCase names.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Comma-separated names; `*suffix` matches any name ending in `suffix`.
    pub npc_to_highlight: String,
    pub highlight_color: Color,
    /// `None` disables dead-NPC menu coloring.
    pub dead_npc_menu_color: Option<Color>,
    pub highlight_menu_names: bool,
    pub notify_on_spawn: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            npc_to_highlight: String::new(),
            highlight_color: Color::CYAN,
            dead_npc_menu_color: None,
            highlight_menu_names: false,
            notify_on_spawn: false,
        }
    }
}

impl Settings {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| IndicatorError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Apply one key/value pair the way the host config store delivers it.
    /// Unknown keys are ignored; the group is shared with other plugins' options.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || IndicatorError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            KEY_NPC_TO_HIGHLIGHT => self.npc_to_highlight = value.to_string(),
            KEY_HIGHLIGHT_COLOR => self.highlight_color = Color::from_hex(value)?,
            KEY_DEAD_NPC_MENU_COLOR => {
                self.dead_npc_menu_color = if value.trim().is_empty() {
                    None
                } else {
                    Some(Color::from_hex(value)?)
                };
            }
            KEY_HIGHLIGHT_MENU_NAMES => {
                self.highlight_menu_names = value.trim().parse().map_err(|_| invalid())?;
            }
            KEY_NOTIFY_ON_SPAWN => {
                self.notify_on_spawn = value.trim().parse().map_err(|_| invalid())?;
            }
            other => log::debug!("Ignoring unknown config key {}", other),
        }
        Ok(())
    }
}

/// Host notification that a stored config value changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigChanged {
    pub group: String,
    pub key: String,
}

impl ConfigChanged {
    pub fn new(group: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            key: key.into(),
        }
    }

    pub fn is_relevant(&self) -> bool {
        self.group == CONFIG_GROUP
    }
}

/// Immutable view of the settings with rules already parsed.
/// Installed wholesale; never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSnapshot {
    pub rules: RuleSet,
    pub highlight_color: Color,
    pub dead_npc_menu_color: Option<Color>,
    pub highlight_menu_names: bool,
    pub notify_on_spawn: bool,
}

impl ConfigSnapshot {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            rules: rules::parse(&settings.npc_to_highlight),
            highlight_color: settings.highlight_color,
            dead_npc_menu_color: settings.dead_npc_menu_color,
            highlight_menu_names: settings.highlight_menu_names,
            notify_on_spawn: settings.notify_on_spawn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r##"{"npcToHighlight": "goblin, *wyvern", "deadNpcMenuColor": "#ff0000", "highlightMenuNames": true}"##,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.npc_to_highlight, "goblin, *wyvern");
        assert_eq!(settings.dead_npc_menu_color, Some(Color::RED));
        assert!(settings.highlight_menu_names);
        // Missing keys fall back to defaults
        assert_eq!(settings.highlight_color, Color::CYAN);
        assert!(!settings.notify_on_spawn);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Settings::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, IndicatorError::FileRead { .. }));
    }

    #[test]
    fn test_bad_color_in_json() {
        let err = Settings::from_json(r#"{"highlightColor": "blue"}"#).unwrap_err();
        assert!(matches!(err, IndicatorError::Json(_)));
    }

    #[test]
    fn test_set_keys() {
        let mut settings = Settings::default();
        settings.set(KEY_NPC_TO_HIGHLIGHT, "zulrah").unwrap();
        settings.set(KEY_HIGHLIGHT_COLOR, "#0000ff").unwrap();
        settings.set(KEY_DEAD_NPC_MENU_COLOR, "ffff0000").unwrap();
        settings.set(KEY_HIGHLIGHT_MENU_NAMES, "true").unwrap();
        settings.set(KEY_NOTIFY_ON_SPAWN, " true ").unwrap();
        settings.set("drawMinimapNames", "true").unwrap();

        assert_eq!(settings.npc_to_highlight, "zulrah");
        assert_eq!(settings.highlight_color, Color::BLUE);
        assert_eq!(settings.dead_npc_menu_color, Some(Color::RED));
        assert!(settings.highlight_menu_names);
        assert!(settings.notify_on_spawn);

        settings.set(KEY_DEAD_NPC_MENU_COLOR, "").unwrap();
        assert_eq!(settings.dead_npc_menu_color, None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.set(KEY_HIGHLIGHT_MENU_NAMES, "yes"),
            Err(IndicatorError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.set(KEY_HIGHLIGHT_COLOR, "#12"),
            Err(IndicatorError::ColorParse(_))
        ));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_snapshot_parses_rules() {
        let settings = Settings {
            npc_to_highlight: "goblin, , zulrah   , *wyvern, ,".to_string(),
            ..Settings::default()
        };
        let snapshot = ConfigSnapshot::from_settings(&settings);
        assert_eq!(snapshot.rules.tokens(), vec!["goblin", "zulrah", "*wyvern"]);
        assert_eq!(snapshot.highlight_color, Color::CYAN);
    }

    #[test]
    fn test_group_relevance() {
        assert!(ConfigChanged::new(CONFIG_GROUP, KEY_NPC_TO_HIGHLIGHT).is_relevant());
        assert!(!ConfigChanged::new("grounditems", "highlightedItems").is_relevant());
    }
}
