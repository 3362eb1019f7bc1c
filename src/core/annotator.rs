//! Recolors context-menu targets for highlighted NPCs.

use super::color::Color;
use super::config::ConfigSnapshot;
use super::markup::{ColTagMarkup, MarkupScheme};
use super::model::{Classification, MenuEntry};
use super::tracker::EntityTracker;

pub struct MenuAnnotator<M: MarkupScheme = ColTagMarkup> {
    markup: M,
}

impl MenuAnnotator<ColTagMarkup> {
    pub fn new() -> Self {
        Self { markup: ColTagMarkup }
    }
}

impl Default for MenuAnnotator<ColTagMarkup> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MarkupScheme> MenuAnnotator<M> {
    pub fn with_markup(markup: M) -> Self {
        Self { markup }
    }

    /// Rewrite `entry.target` if it points at a highlighted NPC.
    /// Returns whether the entry was modified.
    pub fn annotate(&self, entry: &mut MenuEntry, tracker: &EntityTracker) -> bool {
        let Some(classification) = entry.npc_id().and_then(|id| tracker.classify(id)) else {
            return false;
        };
        let Some(color) = menu_color(classification, tracker.config()) else {
            return false;
        };

        let bare = self.markup.strip(&entry.target);
        entry.set_target(self.markup.wrap(color, &bare));
        true
    }
}

/// Dead coloring wins over the alive color and ignores the menu-names toggle.
/// With no dead color configured, a dead match is treated like a live one.
fn menu_color(classification: Classification, config: &ConfigSnapshot) -> Option<Color> {
    let alive = config
        .highlight_menu_names
        .then_some(config.highlight_color);

    match classification {
        Classification::Unmatched => None,
        Classification::MatchedAlive => alive,
        Classification::MatchedDead => config.dead_npc_menu_color.or(alive),
    }
}
