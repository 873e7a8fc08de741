//! The shared character contract and dispatch over the three archetypes

use rand::Rng;

use crate::combat::knight::Knight;
use crate::combat::mage::{AttackTier, Mage};
use crate::combat::robot::Robot;
use crate::core::config::GameConfig;
use crate::core::error::ActionFailure;
use crate::core::types::{CharacterId, ClassKind, StartingStats};
use crate::engine::events::{EventLog, GameEvent, StatusReport};

/// Per-archetype state and rules
#[derive(Debug, Clone, PartialEq)]
pub enum Class {
    Knight(Knight),
    Mage(Mage),
    Robot(Robot),
}

impl Class {
    pub fn kind(&self) -> ClassKind {
        match self {
            Class::Knight(_) => ClassKind::Knight,
            Class::Mage(_) => ClassKind::Mage,
            Class::Robot(_) => ClassKind::Robot,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    id: CharacterId,
    name: String,
    health: u32,
    max_health: u32,
    attack_power: u32,
    class: Class,
}

impl Character {
    /// Build a character; `max_health` is the starting health
    pub fn new(id: CharacterId, name: impl Into<String>, stats: StartingStats, class: Class) -> Self {
        Self {
            id,
            name: name.into(),
            health: stats.health,
            max_health: stats.health,
            attack_power: stats.attack_power,
            class,
        }
    }

    /// Build the archetype `kind` with the rules from `config`
    pub fn from_config(id: CharacterId, kind: ClassKind, stats: StartingStats, config: &GameConfig) -> Self {
        let class = match kind {
            ClassKind::Knight => Class::Knight(Knight::new(stats.health, config.knight.clone())),
            ClassKind::Mage => Class::Mage(Mage::new(config.mage.clone())),
            ClassKind::Robot => Class::Robot(Robot::new(config.robot.clone())),
        };
        Self::new(id, config.name_of(kind), stats, class)
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn attack_power(&self) -> u32 {
        self.attack_power
    }

    pub fn kind(&self) -> ClassKind {
        self.class.kind()
    }

    pub fn class(&self) -> &Class {
        &self.class
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply a hit after any shield mitigation. Health floors at zero.
    pub fn receive_damage(&mut self, amount: u32, log: &mut EventLog) {
        let amount = match &mut self.class {
            Class::Knight(knight) => knight.absorb(&self.name, amount, log),
            Class::Mage(_) | Class::Robot(_) => amount,
        };

        let was_alive = self.is_alive();
        self.health = self.health.saturating_sub(amount);
        log.push(GameEvent::DamageTaken {
            actor: self.name.clone(),
            damage: amount,
            health: self.health,
        });

        if was_alive && !self.is_alive() {
            tracing::debug!("{} died", self.name);
            log.push(GameEvent::Died {
                actor: self.name.clone(),
            });
        }
    }

    /// Pay the attack cost and compute damage. A mage needs a tier;
    /// without one the attack is rejected.
    pub fn strike<R: Rng>(
        &mut self,
        tier: Option<AttackTier>,
        rng: &mut R,
    ) -> Result<u32, ActionFailure> {
        let bonus = match &mut self.class {
            Class::Knight(knight) => knight.attack_bonus(rng),
            Class::Mage(mage) => {
                let tier = tier
                    .ok_or_else(|| ActionFailure::InvalidSelection("no attack tier".to_string()))?;
                mage.cast(tier, rng)?
            }
            Class::Robot(robot) => robot.power_attack(rng)?,
        };
        Ok(self.attack_power.saturating_add(bonus))
    }

    /// Restore health up to max, paying the archetype's cost first
    pub fn heal(&mut self, log: &mut EventLog) -> Result<(), ActionFailure> {
        let amount = match &mut self.class {
            Class::Knight(knight) => knight.rules().heal_amount,
            Class::Mage(mage) => mage.pay_for_heal()?,
            Class::Robot(robot) => robot.pay_for_heal()?,
        };
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        log.push(GameEvent::Healed {
            actor: self.name.clone(),
            amount: self.health - before,
            health: self.health,
        });
        Ok(())
    }

    /// Slot-3 ability: defend, restore mana or restore battery
    pub fn support_action(&mut self, log: &mut EventLog) -> Result<(), ActionFailure> {
        match &mut self.class {
            Class::Knight(knight) => {
                knight.defend(&self.name, log);
                Ok(())
            }
            Class::Mage(mage) => {
                mage.restore_mana(&self.name, log);
                Ok(())
            }
            Class::Robot(robot) => {
                robot.restore_battery(&self.name, log);
                Ok(())
            }
        }
    }

    /// Slot-4 ability: commit the cost and return its damage. The caller has
    /// already found a living opponent.
    pub fn special_action(&mut self) -> Result<u32, ActionFailure> {
        match &mut self.class {
            Class::Knight(knight) => knight.throw_shield(),
            Class::Robot(robot) => Ok(robot.overload()),
            Class::Mage(_) => Err(ActionFailure::InvalidSelection("4".to_string())),
        }
    }

    /// Turn-start hook. Returns false if the character loses this turn.
    pub fn begin_turn(&mut self, log: &mut EventLog) -> bool {
        match &mut self.class {
            Class::Robot(robot) => !robot.wake(&self.name, log),
            Class::Knight(_) | Class::Mage(_) => true,
        }
    }

    /// End-of-turn passive, applied after every dispatched action
    pub fn end_turn(&mut self, log: &mut EventLog) {
        if let Class::Mage(mage) = &mut self.class {
            mage.regenerate(&self.name, log);
        }
    }

    pub fn status(&self) -> StatusReport {
        let resource = match &self.class {
            Class::Knight(knight) => knight.resource_status(),
            Class::Mage(mage) => mage.resource_status(),
            Class::Robot(robot) => robot.resource_status(),
        };
        StatusReport {
            name: self.name.clone(),
            health: self.health,
            max_health: self.max_health,
            resource,
        }
    }

    pub fn as_knight(&self) -> Option<&Knight> {
        match &self.class {
            Class::Knight(knight) => Some(knight),
            _ => None,
        }
    }

    pub fn as_mage(&self) -> Option<&Mage> {
        match &self.class {
            Class::Mage(mage) => Some(mage),
            _ => None,
        }
    }

    pub fn as_robot(&self) -> Option<&Robot> {
        match &self.class {
            Class::Robot(robot) => Some(robot),
            _ => None,
        }
    }
}
