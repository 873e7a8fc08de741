//! Action menu and slot mapping

use serde::Serialize;

use crate::core::types::ClassKind;

/// Everything a character can be asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Attack,
    Heal,
    Defend,
    RestoreMana,
    RestoreBattery,
    ShieldThrow,
    Overload,
}

impl Action {
    /// Map a menu slot to an action for this archetype
    pub fn from_slot(kind: ClassKind, slot: u8) -> Option<Action> {
        match (slot, kind) {
            (1, _) => Some(Action::Attack),
            (2, _) => Some(Action::Heal),
            (3, ClassKind::Knight) => Some(Action::Defend),
            (3, ClassKind::Mage) => Some(Action::RestoreMana),
            (3, ClassKind::Robot) => Some(Action::RestoreBattery),
            (4, ClassKind::Knight) => Some(Action::ShieldThrow),
            (4, ClassKind::Robot) => Some(Action::Overload),
            _ => None,
        }
    }

    /// Only a basic attack asks the player for a target
    pub fn needs_target(self) -> bool {
        matches!(self, Action::Attack)
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Attack => "Attack",
            Action::Heal => "Heal",
            Action::Defend => "Defend",
            Action::RestoreMana => "Restore mana",
            Action::RestoreBattery => "Restore battery",
            Action::ShieldThrow => "Shield throw",
            Action::Overload => "Overload",
        }
    }
}

/// The menu shown to an archetype, in slot order
pub fn menu(kind: ClassKind) -> Vec<MenuEntry> {
    (1..=4)
        .filter_map(|slot| {
            Action::from_slot(kind, slot).map(|action| MenuEntry { slot, action })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub slot: u8,
    pub action: Action,
}

/// Raw action input, before it is matched against the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Blank, `0` or non-numeric: the turn passes with no effect
    Pass,
    Slot(u8),
    /// A number too large to be any slot
    OutOfRange,
}

impl Selection {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Selection::Pass;
        }
        match raw.parse::<u64>() {
            Ok(0) => Selection::Pass,
            Ok(n) => u8::try_from(n).map_or(Selection::OutOfRange, Selection::Slot),
            Err(_) => Selection::OutOfRange,
        }
    }
}
