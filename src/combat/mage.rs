//! Caster archetype: two attack tiers paid in mana, passive regeneration.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::pool::ResourcePool;
use crate::core::config::{MageRules, TierRules};
use crate::core::error::ActionFailure;
use crate::engine::events::{EventLog, GameEvent, ResourceStatus};

/// Strength of a mage attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackTier {
    Weak,
    Strong,
}

impl AttackTier {
    /// `1` = weak, `2` = strong; anything else is rejected
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().parse::<u8>().ok()? {
            1 => Some(AttackTier::Weak),
            2 => Some(AttackTier::Strong),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mage {
    mana: ResourcePool,
    rules: MageRules,
}

impl Mage {
    /// Starts with a full mana pool
    pub fn new(rules: MageRules) -> Self {
        Self {
            mana: ResourcePool::full("mana", rules.max_mana),
            rules,
        }
    }

    /// Override the current mana (clamped to the pool size)
    pub fn with_mana(mut self, mana: u32) -> Self {
        self.mana = ResourcePool::with_current("mana", mana, self.rules.max_mana);
        self
    }

    pub fn mana(&self) -> u32 {
        self.mana.current()
    }

    pub fn max_mana(&self) -> u32 {
        self.mana.max()
    }

    pub fn rules(&self) -> &MageRules {
        &self.rules
    }

    pub fn tier(&self, tier: AttackTier) -> TierRules {
        match tier {
            AttackTier::Weak => self.rules.weak_attack,
            AttackTier::Strong => self.rules.strong_attack,
        }
    }

    /// Pay for the chosen tier and roll its bonus
    pub(crate) fn cast<R: Rng>(
        &mut self,
        tier: AttackTier,
        rng: &mut R,
    ) -> Result<u32, ActionFailure> {
        let rules = self.tier(tier);
        self.mana.spend(rules.cost)?;
        Ok(rules.roll.roll(rng))
    }

    pub(crate) fn pay_for_heal(&mut self) -> Result<u32, ActionFailure> {
        self.mana.spend(self.rules.heal_cost)?;
        Ok(self.rules.heal_amount)
    }

    pub(crate) fn restore_mana(&mut self, name: &str, log: &mut EventLog) {
        self.mana.refill();
        log.push(GameEvent::ManaRestored {
            actor: name.to_string(),
            mana: self.mana.current(),
        });
    }

    /// End-of-turn passive
    pub(crate) fn regenerate(&mut self, name: &str, log: &mut EventLog) {
        let gained = self.mana.restore(self.rules.mana_regen);
        log.push(GameEvent::ManaRegenerated {
            actor: name.to_string(),
            gained,
            mana: self.mana.current(),
        });
    }

    pub(crate) fn resource_status(&self) -> ResourceStatus {
        ResourceStatus::Mana {
            current: self.mana.current(),
            max: self.mana.max(),
        }
    }
}
