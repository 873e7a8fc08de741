//! Mechanical archetype: everything runs on battery, overload puts it to sleep.

use rand::Rng;

use crate::combat::pool::ResourcePool;
use crate::core::config::RobotRules;
use crate::core::error::ActionFailure;
use crate::engine::events::{EventLog, GameEvent, ResourceStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct Robot {
    battery: ResourcePool,
    sleeping: bool,
    rules: RobotRules,
}

impl Robot {
    /// Starts with a full battery, awake
    pub fn new(rules: RobotRules) -> Self {
        Self {
            battery: ResourcePool::full("battery", rules.max_battery),
            sleeping: false,
            rules,
        }
    }

    /// Override the current charge (clamped to the battery size)
    pub fn with_battery(mut self, battery: u32) -> Self {
        self.battery = ResourcePool::with_current("battery", battery, self.rules.max_battery);
        self
    }

    pub fn battery(&self) -> u32 {
        self.battery.current()
    }

    pub fn max_battery(&self) -> u32 {
        self.battery.max()
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    pub fn rules(&self) -> &RobotRules {
        &self.rules
    }

    pub(crate) fn power_attack<R: Rng>(&mut self, rng: &mut R) -> Result<u32, ActionFailure> {
        self.battery.spend(self.rules.attack_cost)?;
        Ok(self.rules.attack_roll.roll(rng))
    }

    pub(crate) fn pay_for_heal(&mut self) -> Result<u32, ActionFailure> {
        self.battery.spend(self.rules.heal_cost)?;
        Ok(self.rules.heal_amount)
    }

    pub(crate) fn restore_battery(&mut self, name: &str, log: &mut EventLog) {
        self.battery.refill();
        log.push(GameEvent::BatteryRestored {
            actor: name.to_string(),
            battery: self.battery.current(),
        });
    }

    /// Dump the whole battery into one hit and fall asleep
    pub(crate) fn overload(&mut self) -> u32 {
        let damage = self
            .battery
            .drain()
            .saturating_mul(self.rules.overload_multiplier);
        self.sleeping = true;
        damage
    }

    /// Called at turn start. Returns true when this turn is lost to sleep.
    pub(crate) fn wake(&mut self, name: &str, log: &mut EventLog) -> bool {
        if !self.sleeping {
            return false;
        }
        self.sleeping = false;
        log.push(GameEvent::SleptThroughTurn {
            actor: name.to_string(),
        });
        true
    }

    pub(crate) fn resource_status(&self) -> ResourceStatus {
        ResourceStatus::Battery {
            current: self.battery.current(),
            max: self.battery.max(),
            sleeping: self.sleeping,
        }
    }
}
