/// Host-assigned NPC index. Reused by the world after a despawn.
pub type NpcId = u32;
pub type NpcName = String;

/// Derived highlight state of a tracked NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Unmatched,
    MatchedAlive,
    MatchedDead,
}

impl Classification {
    pub fn derive(matched: bool, is_dead: bool) -> Self {
        match (matched, is_dead) {
            (false, _) => Self::Unmatched,
            (true, false) => Self::MatchedAlive,
            (true, true) => Self::MatchedDead,
        }
    }

    pub fn is_highlighted(self) -> bool {
        self != Self::Unmatched
    }
}

/// One currently spawned NPC and its derived classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedNpc {
    pub id: NpcId,
    pub name: NpcName,
    pub is_dead: bool,
    pub classification: Classification,
    /// Canonical token of the first rule that matched, for diagnostics.
    pub matched_rule: Option<String>,
}

/// Row handed to the overlay renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedNpc {
    pub id: NpcId,
    pub name: NpcName,
    pub classification: Classification,
}

impl From<&TrackedNpc> for HighlightedNpc {
    fn from(npc: &TrackedNpc) -> Self {
        Self {
            id: npc.id,
            name: npc.name.clone(),
            classification: npc.classification,
        }
    }
}

/// Opcodes are pushed up by this amount when the host deprioritizes an entry.
pub const MENU_ACTION_DEPRIORITIZE_OFFSET: i32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuOpcode {
    ItemUseOnNpc,
    SpellCastOnNpc,
    NpcFirstOption,
    NpcSecondOption,
    NpcThirdOption,
    NpcFourthOption,
    NpcFifthOption,
    Walk,
    ExamineObject,
    ExamineNpc,
}

impl MenuOpcode {
    pub fn id(self) -> i32 {
        match self {
            Self::ItemUseOnNpc => 7,
            Self::SpellCastOnNpc => 8,
            Self::NpcFirstOption => 9,
            Self::NpcSecondOption => 10,
            Self::NpcThirdOption => 11,
            Self::NpcFourthOption => 12,
            Self::NpcFifthOption => 13,
            Self::Walk => 23,
            Self::ExamineObject => 1002,
            Self::ExamineNpc => 1003,
        }
    }

    /// Resolve a raw opcode, undoing the deprioritize offset first.
    pub fn from_id(raw: i32) -> Option<Self> {
        let id = if raw >= MENU_ACTION_DEPRIORITIZE_OFFSET {
            raw - MENU_ACTION_DEPRIORITIZE_OFFSET
        } else {
            raw
        };
        Self::all().iter().copied().find(|opcode| opcode.id() == id)
    }

    pub fn all() -> &'static [MenuOpcode] {
        &[
            Self::ItemUseOnNpc,
            Self::SpellCastOnNpc,
            Self::NpcFirstOption,
            Self::NpcSecondOption,
            Self::NpcThirdOption,
            Self::NpcFourthOption,
            Self::NpcFifthOption,
            Self::Walk,
            Self::ExamineObject,
            Self::ExamineNpc,
        ]
    }

    /// Whether the entry's identifier is an NPC index and the target should be recolored.
    /// Examine is left plain.
    pub fn targets_npc(self) -> bool {
        !matches!(self, Self::Walk | Self::ExamineObject | Self::ExamineNpc)
    }
}

/// A context-menu entry as the host adds it. Annotation mutates `target` in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub option: String,
    pub target: String,
    /// Subject of the action; the NPC index for NPC opcodes, often -1 otherwise.
    pub identifier: i32,
    pub opcode: i32,
    modified: bool,
}

impl MenuEntry {
    pub fn new(
        option: impl Into<String>,
        target: impl Into<String>,
        identifier: i32,
        opcode: i32,
    ) -> Self {
        Self {
            option: option.into(),
            target: target.into(),
            identifier,
            opcode,
            modified: false,
        }
    }

    pub fn set_target(&mut self, target: String) {
        self.target = target;
        self.modified = true;
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// The NPC this entry acts on, if its opcode targets an NPC.
    pub fn npc_id(&self) -> Option<NpcId> {
        let targets_npc = MenuOpcode::from_id(self.opcode).is_some_and(MenuOpcode::targets_npc);
        if !targets_npc {
            return None;
        }
        NpcId::try_from(self.identifier).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_table() {
        assert_eq!(Classification::derive(false, false), Classification::Unmatched);
        assert_eq!(Classification::derive(false, true), Classification::Unmatched);
        assert_eq!(Classification::derive(true, false), Classification::MatchedAlive);
        assert_eq!(Classification::derive(true, true), Classification::MatchedDead);
        assert!(!Classification::Unmatched.is_highlighted());
        assert!(Classification::MatchedDead.is_highlighted());
    }

    #[test]
    fn test_opcode_lookup() {
        assert_eq!(MenuOpcode::from_id(9), Some(MenuOpcode::NpcFirstOption));
        assert_eq!(MenuOpcode::from_id(2009), Some(MenuOpcode::NpcFirstOption));
        assert_eq!(MenuOpcode::from_id(3003), Some(MenuOpcode::ExamineNpc));
        assert_eq!(MenuOpcode::from_id(-1), None);
        assert_eq!(MenuOpcode::from_id(999), None);
    }

    #[test]
    fn test_npc_targeting_opcodes() {
        for opcode in MenuOpcode::all() {
            assert_eq!(MenuOpcode::from_id(opcode.id()), Some(*opcode));
        }
        assert!(MenuOpcode::NpcFifthOption.targets_npc());
        assert!(MenuOpcode::SpellCastOnNpc.targets_npc());
        assert!(!MenuOpcode::Walk.targets_npc());
        assert!(!MenuOpcode::ExamineObject.targets_npc());
        assert!(!MenuOpcode::ExamineNpc.targets_npc());
    }

    #[test]
    fn test_npc_id_from_entry() {
        assert_eq!(MenuEntry::new("Attack", "Goblin", 4, 9).npc_id(), Some(4));
        assert_eq!(MenuEntry::new("Attack", "Goblin", 4, 2010).npc_id(), Some(4));
        assert_eq!(MenuEntry::new("Walk here", "", -1, 23).npc_id(), None);
        assert_eq!(MenuEntry::new("Examine", "Goblin", 4, 1003).npc_id(), None);
        // NPC opcode with a junk identifier
        assert_eq!(MenuEntry::new("Attack", "Goblin", -1, 9).npc_id(), None);
    }

    #[test]
    fn test_set_target_marks_modified() {
        let mut entry = MenuEntry::new("Attack", "Goblin", 0, 9);
        assert!(!entry.is_modified());
        entry.set_target("<col=ff0000>Goblin".to_string());
        assert!(entry.is_modified());
        assert_eq!(entry.target, "<col=ff0000>Goblin");
    }
}
