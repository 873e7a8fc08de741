//! Game rules configuration with documented constants
//!
//! Every number in the class rules table lives here. The defaults reproduce
//! the classic three-way match; a TOML file can override any section.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combat::roll::DamageRange;
use crate::core::error::{Result, SkirmishError};
use crate::core::types::{ClassKind, StartingStats};

/// Rules for the melee archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnightRules {
    /// Display name
    pub name: String,
    /// Bonus rolled on top of attack power for a basic attack
    pub attack_roll: DamageRange,
    /// Health restored by a heal (free)
    pub heal_amount: u32,
    /// Share of incoming damage the raised shield soaks up (floored)
    pub shield_absorb_percent: u32,
    /// Shield throw damage is `shield / shield_throw_divisor`
    pub shield_throw_divisor: u32,
}

impl Default for KnightRules {
    fn default() -> Self {
        Self {
            name: "Knight".to_string(),
            attack_roll: DamageRange::new(1, 4),
            heal_amount: 10,
            shield_absorb_percent: 30,
            shield_throw_divisor: 2,
        }
    }
}

/// Cost and bonus roll for one mage attack tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRules {
    pub cost: u32,
    pub roll: DamageRange,
}

/// Rules for the caster archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MageRules {
    pub name: String,
    /// Mana pool size; the mage starts full
    pub max_mana: u32,
    pub weak_attack: TierRules,
    pub strong_attack: TierRules,
    pub heal_cost: u32,
    pub heal_amount: u32,
    /// Mana regained at the end of every dispatched turn
    pub mana_regen: u32,
}

impl Default for MageRules {
    fn default() -> Self {
        Self {
            name: "Mage".to_string(),
            max_mana: 40,
            weak_attack: TierRules {
                cost: 10,
                roll: DamageRange::new(1, 4),
            },
            strong_attack: TierRules {
                cost: 20,
                roll: DamageRange::new(5, 14),
            },
            heal_cost: 35,
            heal_amount: 20,
            mana_regen: 5,
        }
    }
}

/// Rules for the mechanical archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotRules {
    pub name: String,
    /// Battery size; the robot starts full
    pub max_battery: u32,
    pub attack_cost: u32,
    pub attack_roll: DamageRange,
    pub heal_cost: u32,
    pub heal_amount: u32,
    /// Overload damage is `battery * overload_multiplier`
    pub overload_multiplier: u32,
}

impl Default for RobotRules {
    fn default() -> Self {
        Self {
            name: "Robot".to_string(),
            max_battery: 40,
            attack_cost: 5,
            attack_roll: DamageRange::new(1, 6),
            heal_cost: 10,
            heal_amount: 15,
            overload_multiplier: 2,
        }
    }
}

/// Optional preset starting stats. A class with no preset is prompted for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    pub knight: Option<StartingStats>,
    pub mage: Option<StartingStats>,
    pub robot: Option<StartingStats>,
}

impl SetupConfig {
    pub fn preset(&self, kind: ClassKind) -> Option<StartingStats> {
        match kind {
            ClassKind::Knight => self.knight,
            ClassKind::Mage => self.mage,
            ClassKind::Robot => self.robot,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub knight: KnightRules,
    #[serde(default)]
    pub mage: MageRules,
    #[serde(default)]
    pub robot: RobotRules,
    #[serde(default)]
    pub setup: SetupConfig,
}

impl GameConfig {
    /// Display name configured for a class
    pub fn name_of(&self, kind: ClassKind) -> &str {
        match kind {
            ClassKind::Knight => &self.knight.name,
            ClassKind::Mage => &self.mage.name,
            ClassKind::Robot => &self.robot.name,
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        let ranges = [
            ("knight.attack_roll", self.knight.attack_roll),
            ("mage.weak_attack.roll", self.mage.weak_attack.roll),
            ("mage.strong_attack.roll", self.mage.strong_attack.roll),
            ("robot.attack_roll", self.robot.attack_roll),
        ];
        for (label, range) in ranges {
            if !range.is_valid() {
                return Err(format!(
                    "{} has min ({}) greater than max ({})",
                    label, range.min, range.max
                ));
            }
        }

        if self.knight.shield_absorb_percent > 100 {
            return Err(format!(
                "knight.shield_absorb_percent ({}) must be <= 100",
                self.knight.shield_absorb_percent
            ));
        }
        if self.knight.shield_throw_divisor == 0 {
            return Err("knight.shield_throw_divisor must be non-zero".into());
        }

        let mana_costs = [
            ("mage.weak_attack.cost", self.mage.weak_attack.cost),
            ("mage.strong_attack.cost", self.mage.strong_attack.cost),
            ("mage.heal_cost", self.mage.heal_cost),
        ];
        for (label, cost) in mana_costs {
            if cost > self.mage.max_mana {
                return Err(format!(
                    "{} ({}) exceeds mage.max_mana ({})",
                    label, cost, self.mage.max_mana
                ));
            }
        }

        let battery_costs = [
            ("robot.attack_cost", self.robot.attack_cost),
            ("robot.heal_cost", self.robot.heal_cost),
        ];
        for (label, cost) in battery_costs {
            if cost > self.robot.max_battery {
                return Err(format!(
                    "{} ({}) exceeds robot.max_battery ({})",
                    label, cost, self.robot.max_battery
                ));
            }
        }

        for kind in ClassKind::ROSTER_ORDER {
            if let Some(stats) = self.setup.preset(kind) {
                if stats.health == 0 {
                    return Err(format!("setup preset for {} must have health >= 1", kind));
                }
            }
        }

        Ok(())
    }
}

/// Load and validate a game configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<GameConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    tracing::info!("Loaded game config from {:?}", path);
    Ok(config)
}

/// Parse and validate a game configuration from TOML text
pub fn parse_config(contents: &str) -> Result<GameConfig> {
    let config: GameConfig = toml::from_str(contents)?;
    config.validate().map_err(SkirmishError::InvalidConfig)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_values_match_classic_rules() {
        let config = GameConfig::default();
        assert_eq!(config.knight.attack_roll, DamageRange::new(1, 4));
        assert_eq!(config.knight.shield_absorb_percent, 30);
        assert_eq!(config.mage.max_mana, 40);
        assert_eq!(config.mage.strong_attack.roll, DamageRange::new(5, 14));
        assert_eq!(config.mage.heal_cost, 35);
        assert_eq!(config.robot.attack_roll, DamageRange::new(1, 6));
        assert_eq!(config.robot.overload_multiplier, 2);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = parse_config("").expect("empty config should parse");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_section_override() {
        let toml = r#"
            [mage]
            max_mana = 60
            mana_regen = 10

            [setup.knight]
            health = 50
            attack_power = 7
        "#;
        let config = parse_config(toml).expect("should parse");
        assert_eq!(config.mage.max_mana, 60);
        assert_eq!(config.mage.mana_regen, 10);
        assert_eq!(config.mage.heal_cost, 35);
        assert_eq!(config.setup.knight, Some(StartingStats::new(50, 7)));
        assert_eq!(config.setup.mage, None);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let toml = r#"
            [robot]
            attack_roll = { min = 6, max = 1 }
        "#;
        assert!(matches!(parse_config(toml), Err(SkirmishError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_cost_above_pool() {
        let mut config = GameConfig::default();
        config.robot.heal_cost = 41;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_health_preset() {
        let mut config = GameConfig::default();
        config.setup.robot = Some(StartingStats::new(0, 3));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_name_of() {
        let config = GameConfig::default();
        assert_eq!(config.name_of(ClassKind::Mage), "Mage");
    }
}
