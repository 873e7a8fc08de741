//! Melee archetype: free attacks and heals, a shield that soaks damage or
//! can be thrown.

use rand::Rng;

use crate::combat::pool::ResourcePool;
use crate::core::config::KnightRules;
use crate::core::error::ActionFailure;
use crate::engine::events::{EventLog, GameEvent, ResourceStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct Knight {
    shield: ResourcePool,
    shield_active: bool,
    rules: KnightRules,
}

impl Knight {
    /// Shield starts at half of max health
    pub fn new(max_health: u32, rules: KnightRules) -> Self {
        Self {
            shield: ResourcePool::full("shield", max_health / 2),
            shield_active: false,
            rules,
        }
    }

    pub fn shield(&self) -> u32 {
        self.shield.current()
    }

    pub fn shield_active(&self) -> bool {
        self.shield_active
    }

    pub fn rules(&self) -> &KnightRules {
        &self.rules
    }

    pub(crate) fn attack_bonus<R: Rng>(&self, rng: &mut R) -> u32 {
        self.rules.attack_roll.roll(rng)
    }

    /// Raise the shield so it soaks part of every hit until destroyed.
    /// Always allowed; an empty shield stays up but soaks nothing.
    pub(crate) fn defend(&mut self, name: &str, log: &mut EventLog) {
        self.shield_active = true;
        log.push(GameEvent::ShieldRaised {
            actor: name.to_string(),
        });
    }

    /// Throw the shield: it is gone afterwards. Returns the damage dealt.
    pub(crate) fn throw_shield(&mut self) -> Result<u32, ActionFailure> {
        if self.shield.is_empty() {
            return Err(self.no_shield());
        }
        let damage = self.shield.drain() / self.rules.shield_throw_divisor.max(1);
        self.shield_active = false;
        Ok(damage)
    }

    /// Split an incoming hit between shield and body. Returns the part that
    /// reaches health.
    pub(crate) fn absorb(&mut self, name: &str, damage: u32, log: &mut EventLog) -> u32 {
        if !self.shield_active || self.shield.is_empty() {
            return damage;
        }

        // Widened so huge hits cannot overflow before the division
        let share = u64::from(damage) * u64::from(self.rules.shield_absorb_percent) / 100;
        let share = u32::try_from(share).unwrap_or(u32::MAX);
        let absorbed = self.shield.take(share);
        log.push(GameEvent::ShieldAbsorbed {
            actor: name.to_string(),
            absorbed,
            shield_left: self.shield.current(),
        });

        if self.shield.is_empty() {
            self.shield_active = false;
            log.push(GameEvent::ShieldDestroyed {
                actor: name.to_string(),
            });
        }

        damage - absorbed
    }

    pub(crate) fn resource_status(&self) -> ResourceStatus {
        ResourceStatus::Shield {
            current: self.shield.current(),
            active: self.shield_active,
        }
    }

    fn no_shield(&self) -> ActionFailure {
        ActionFailure::InsufficientResource {
            resource: self.shield.label(),
            needed: 1,
            available: self.shield.current(),
        }
    }
}
