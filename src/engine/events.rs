//! Structured events emitted by the core for the presentation layer

use serde::Serialize;

use crate::core::types::Round;

/// Secondary gauge shown in a status block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceStatus {
    Shield { current: u32, active: bool },
    Mana { current: u32, max: u32 },
    Battery { current: u32, max: u32, sleeping: bool },
}

/// Snapshot of one character at the start of its turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub resource: ResourceStatus,
}

/// One line of the final ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub place: usize,
    pub name: String,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        roster: Vec<String>,
    },
    RoundStarted {
        round: Round,
    },
    Status(StatusReport),
    TurnSkipped {
        actor: String,
    },
    SleptThroughTurn {
        actor: String,
    },
    InputRejected {
        input: String,
    },
    Attacked {
        actor: String,
        target: String,
        damage: u32,
    },
    ShieldAbsorbed {
        actor: String,
        absorbed: u32,
        shield_left: u32,
    },
    DamageTaken {
        actor: String,
        damage: u32,
        health: u32,
    },
    ShieldDestroyed {
        actor: String,
    },
    Died {
        actor: String,
    },
    Healed {
        actor: String,
        amount: u32,
        health: u32,
    },
    ShieldRaised {
        actor: String,
    },
    ManaRestored {
        actor: String,
        mana: u32,
    },
    ManaRegenerated {
        actor: String,
        gained: u32,
        mana: u32,
    },
    BatteryRestored {
        actor: String,
        battery: u32,
    },
    ShieldThrown {
        actor: String,
        target: String,
        damage: u32,
    },
    Overloaded {
        actor: String,
        target: String,
        damage: u32,
    },
    ActionFailed {
        actor: String,
        reason: String,
    },
    GameOver {
        rounds: Round,
        ranking: Vec<Standing>,
    },
}

/// Events produced during a single turn, flushed to the presenter afterwards
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameEvent> {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_drain_empties() {
        let mut log = EventLog::new();
        log.push(GameEvent::RoundStarted { round: 1 });
        log.push(GameEvent::Died {
            actor: "Mage".into(),
        });
        assert_eq!(log.len(), 2);
        let drained: Vec<_> = log.drain().collect();
        assert_eq!(drained.len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn test_events_serialize_with_tag() {
        let json = serde_json::to_string(&GameEvent::Attacked {
            actor: "Knight".into(),
            target: "Robot".into(),
            damage: 9,
        })
        .expect("serializes");
        assert_eq!(
            json,
            r#"{"event":"attacked","actor":"Knight","target":"Robot","damage":9}"#
        );
    }
}
