//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a character in the roster (declaration order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub usize);

impl CharacterId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Round counter (starts at 1)
pub type Round = u32;

/// The three archetypes, in roster order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Knight,
    Mage,
    Robot,
}

impl ClassKind {
    /// Fixed roster declaration order
    pub const ROSTER_ORDER: [ClassKind; 3] = [ClassKind::Knight, ClassKind::Mage, ClassKind::Robot];
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ClassKind::Knight => "Knight",
            ClassKind::Mage => "Mage",
            ClassKind::Robot => "Robot",
        };
        f.write_str(label)
    }
}

/// Starting stat collected during setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Health,
    AttackPower,
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Health => f.write_str("health"),
            Stat::AttackPower => f.write_str("attack power"),
        }
    }
}

/// Health and attack entered for one character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingStats {
    pub health: u32,
    pub attack_power: u32,
}

impl StartingStats {
    pub fn new(health: u32, attack_power: u32) -> Self {
        Self { health, attack_power }
    }
}
