//! Turn engine
//!
//! Setup -> RoundLoop -> GameOver. Each round every living character, in
//! roster order, gets one action opportunity.

use rand::Rng;

use crate::combat::{AttackTier, Character};
use crate::core::config::GameConfig;
use crate::core::error::{ActionFailure, Result, SkirmishError};
use crate::core::types::{CharacterId, ClassKind, Round, StartingStats, Stat};
use crate::engine::action::{menu, Action, Selection};
use crate::engine::events::{EventLog, GameEvent, Standing};
use crate::engine::roster::{Roster, ROSTER_SIZE};
use crate::ui::{Presenter, Prompt, TargetOption};

/// Outcome of one dispatched action
pub type Resolution = std::result::Result<(), ActionFailure>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Setup,
    RoundLoop,
    GameOver,
}

/// What one character's turn came to
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Dead characters are skipped
    Dead,
    /// Lost to the robot's sleep state
    Asleep,
    /// Blank or unparseable choice: nothing happened
    Passed,
    /// A slot was chosen. `action` is `None` when the slot means nothing
    /// for this archetype.
    Acted {
        action: Option<Action>,
        resolution: Resolution,
    },
}

#[derive(Debug)]
pub struct Game<R: Rng> {
    config: GameConfig,
    roster: Roster,
    round: Round,
    phase: GamePhase,
    rng: R,
}

impl<R: Rng> Game<R> {
    /// Collect starting stats (presets first, prompts otherwise) and build the
    /// roster.
    pub fn setup<P: Presenter + ?Sized>(config: GameConfig, rng: R, presenter: &mut P) -> Result<Self> {
        let mut characters = Vec::with_capacity(ROSTER_SIZE);
        for (index, kind) in ClassKind::ROSTER_ORDER.into_iter().enumerate() {
            let stats = match config.setup.preset(kind) {
                Some(stats) => stats,
                None => prompt_stats(kind, config.name_of(kind), presenter)?,
            };
            tracing::debug!(
                "{} enters with {} health, {} attack",
                kind,
                stats.health,
                stats.attack_power
            );
            characters.push(Character::from_config(CharacterId::new(index), kind, stats, &config));
        }

        let roster = Roster::new(characters);
        presenter.show(&GameEvent::GameStarted {
            roster: roster.iter().map(|c| c.name().to_string()).collect(),
        })?;
        Ok(Self::with_roster(config, roster, rng))
    }

    /// Start from an already built roster
    pub fn with_roster(config: GameConfig, roster: Roster, rng: R) -> Self {
        let phase = if roster.living_count() > 1 {
            GamePhase::RoundLoop
        } else {
            GamePhase::GameOver
        };
        Self {
            config,
            roster,
            round: 1,
            phase,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Current round (the next one to be played once the game is running)
    pub fn round(&self) -> Round {
        self.round
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn ranking(&self) -> Vec<Standing> {
        self.roster.ranking()
    }

    /// Play rounds until at most one character is alive
    pub fn run<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Result<Vec<Standing>> {
        tracing::info!("Game started");
        while self.phase == GamePhase::RoundLoop {
            self.play_round(presenter)?;
        }
        if self.round == 1 {
            // Over before any round was played; still report the result
            self.finish(presenter)?;
        }
        Ok(self.ranking())
    }

    /// One pass over the roster
    pub fn play_round<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Result<()> {
        if self.phase != GamePhase::RoundLoop {
            return Ok(());
        }

        tracing::debug!("Round {} begins", self.round);
        presenter.show(&GameEvent::RoundStarted { round: self.round })?;

        for id in self.roster.ids() {
            self.take_turn(id, presenter)?;
        }

        self.round += 1;
        if self.roster.living_count() <= 1 {
            self.finish(presenter)?;
        }
        Ok(())
    }

    /// Give one character its action opportunity
    pub fn take_turn<P: Presenter + ?Sized>(
        &mut self,
        id: CharacterId,
        presenter: &mut P,
    ) -> Result<TurnOutcome> {
        if !self.roster[id].is_alive() {
            return Ok(TurnOutcome::Dead);
        }

        let mut log = EventLog::new();
        presenter.show(&GameEvent::Status(self.roster[id].status()))?;

        if !self.roster[id].begin_turn(&mut log) {
            tracing::debug!("{} sleeps through the turn", self.roster[id].name());
            flush(&mut log, presenter)?;
            return Ok(TurnOutcome::Asleep);
        }

        let name = self.roster[id].name().to_string();
        let kind = self.roster[id].kind();
        let raw = presenter.ask(&Prompt::Action {
            actor: name.clone(),
            menu: menu(kind),
        })?;

        let action = match Selection::parse(&raw) {
            Selection::Pass => {
                log.push(GameEvent::TurnSkipped { actor: name });
                flush(&mut log, presenter)?;
                return Ok(TurnOutcome::Passed);
            }
            Selection::Slot(slot) => Action::from_slot(kind, slot),
            Selection::OutOfRange => None,
        };

        let resolution = match action {
            Some(action) => {
                tracing::debug!("{} chooses {:?}", name, action);
                self.dispatch(id, action, presenter, &mut log)?
            }
            None => Err(ActionFailure::InvalidSelection(raw.trim().to_string())),
        };

        if let Err(failure) = &resolution {
            tracing::debug!("{}'s action failed: {}", name, failure);
            log.push(GameEvent::ActionFailed {
                actor: name,
                reason: failure.to_string(),
            });
        }

        self.roster[id].end_turn(&mut log);
        flush(&mut log, presenter)?;

        Ok(TurnOutcome::Acted { action, resolution })
    }

    fn dispatch<P: Presenter + ?Sized>(
        &mut self,
        id: CharacterId,
        action: Action,
        presenter: &mut P,
        log: &mut EventLog,
    ) -> Result<Resolution> {
        let resolution = match action {
            _ if action.needs_target() => return self.attack(id, presenter, log),
            Action::Heal => self.roster[id].heal(log),
            Action::Defend | Action::RestoreMana | Action::RestoreBattery => {
                self.roster[id].support_action(log)
            }
            _ => self.special(id, action, log),
        };
        Ok(resolution)
    }

    /// Basic attack: pick a target from the living opponents, then strike
    fn attack<P: Presenter + ?Sized>(
        &mut self,
        id: CharacterId,
        presenter: &mut P,
        log: &mut EventLog,
    ) -> Result<Resolution> {
        let opponents = self.roster.living_opponents(id);
        if opponents.is_empty() {
            return Ok(Err(ActionFailure::NoLegalTarget));
        }

        let actor = self.roster[id].name().to_string();
        let options = opponents
            .iter()
            .enumerate()
            .map(|(i, &other)| TargetOption {
                number: i + 1,
                name: self.roster[other].name().to_string(),
                health: self.roster[other].health(),
            })
            .collect();
        let raw = presenter.ask(&Prompt::Target {
            actor: actor.clone(),
            options,
        })?;
        let Some(target) = parse_choice(&raw, opponents.len()).map(|i| opponents[i]) else {
            tracing::warn!("Rejected target choice {:?}", raw);
            return Ok(Err(ActionFailure::InvalidSelection(raw.trim().to_string())));
        };

        let tier = match self.roster[id].as_mage() {
            Some(mage) => {
                let prompt = Prompt::AttackTier {
                    actor: actor.clone(),
                    weak_cost: mage.tier(AttackTier::Weak).cost,
                    strong_cost: mage.tier(AttackTier::Strong).cost,
                };
                let raw = presenter.ask(&prompt)?;
                match AttackTier::parse(&raw) {
                    Some(tier) => Some(tier),
                    None => {
                        tracing::warn!("Rejected attack tier {:?}", raw);
                        return Ok(Err(ActionFailure::InvalidSelection(raw.trim().to_string())));
                    }
                }
            }
            None => None,
        };

        let damage = match self.roster[id].strike(tier, &mut self.rng) {
            Ok(damage) => damage,
            Err(failure) => return Ok(Err(failure)),
        };
        log.push(GameEvent::Attacked {
            actor,
            target: self.roster[target].name().to_string(),
            damage,
        });
        self.roster[target].receive_damage(damage, log);
        Ok(Ok(()))
    }

    /// Shield throw or overload at a random living opponent
    fn special(&mut self, id: CharacterId, action: Action, log: &mut EventLog) -> Resolution {
        let target = self
            .roster
            .pick_random_opponent(id, &mut self.rng)
            .ok_or(ActionFailure::NoLegalTarget)?;
        let damage = self.roster[id].special_action()?;

        let actor = self.roster[id].name().to_string();
        let target_name = self.roster[target].name().to_string();
        log.push(match action {
            Action::ShieldThrow => GameEvent::ShieldThrown {
                actor,
                target: target_name,
                damage,
            },
            _ => GameEvent::Overloaded {
                actor,
                target: target_name,
                damage,
            },
        });
        self.roster[target].receive_damage(damage, log);
        Ok(())
    }

    fn finish<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Result<()> {
        self.phase = GamePhase::GameOver;
        let ranking = self.ranking();
        let rounds = self.round.saturating_sub(1);
        if let Some(winner) = ranking.first().filter(|s| s.alive) {
            tracing::info!("Game over after {} rounds, {} wins", rounds, winner.name);
        } else {
            tracing::info!("Game over after {} rounds, nobody survived", rounds);
        }
        presenter.show(&GameEvent::GameOver { rounds, ranking })
    }
}

fn flush<P: Presenter + ?Sized>(log: &mut EventLog, presenter: &mut P) -> Result<()> {
    for event in log.drain() {
        presenter.show(&event)?;
    }
    Ok(())
}

/// 1-based menu index -> 0-based position, `None` if out of range or garbage
fn parse_choice(raw: &str, len: usize) -> Option<usize> {
    let choice = raw.trim().parse::<usize>().ok()?;
    (1..=len).contains(&choice).then(|| choice - 1)
}

/// Ask for health and attack power until both parse
fn prompt_stats<P: Presenter + ?Sized>(
    kind: ClassKind,
    name: &str,
    presenter: &mut P,
) -> Result<StartingStats> {
    let health = prompt_value(kind, name, Stat::Health, 1, presenter)?;
    let attack_power = prompt_value(kind, name, Stat::AttackPower, 0, presenter)?;
    Ok(StartingStats::new(health, attack_power))
}

fn prompt_value<P: Presenter + ?Sized>(
    kind: ClassKind,
    name: &str,
    stat: Stat,
    min: u32,
    presenter: &mut P,
) -> Result<u32> {
    let prompt = Prompt::Stat {
        class: kind,
        name: name.to_string(),
        stat,
    };
    loop {
        let raw = presenter.ask(&prompt)?;
        match raw.trim().parse::<u32>() {
            Ok(value) if value >= min => return Ok(value),
            _ => {
                tracing::warn!("Rejected {} for {}: {:?}", stat, name, raw);
                presenter.show(&GameEvent::InputRejected { input: raw })?;
            }
        }
    }
}

/// Play a full game: setup, rounds, ranking
pub fn play<R: Rng, P: Presenter + ?Sized>(
    config: GameConfig,
    rng: R,
    presenter: &mut P,
) -> Result<Vec<Standing>> {
    let mut game = Game::setup(config, rng, presenter)?;
    match game.run(presenter) {
        Err(SkirmishError::InputClosed) => {
            tracing::warn!("Input closed in round {}", game.round());
            Err(SkirmishError::InputClosed)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{Class, Mage, Robot};
    use crate::core::config::{MageRules, RobotRules};
    use crate::ui::ScriptedConsole;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn standard_roster(health: u32) -> Roster {
        let config = GameConfig::default();
        Roster::new(
            ClassKind::ROSTER_ORDER
                .into_iter()
                .enumerate()
                .map(|(i, kind)| {
                    Character::from_config(CharacterId(i), kind, StartingStats::new(health, 5), &config)
                })
                .collect(),
        )
    }

    #[test]
    fn test_setup_prompts_six_stats() {
        let mut console = ScriptedConsole::new(["30", "5", "25", "6", "40", "4"]);
        let game = Game::setup(GameConfig::default(), rng(), &mut console).expect("setup");
        assert_eq!(game.phase(), GamePhase::RoundLoop);
        assert_eq!(game.round(), 1);
        let knight = &game.roster()[CharacterId(0)];
        assert_eq!(knight.max_health(), 30);
        assert_eq!(knight.attack_power(), 5);
        assert_eq!(game.roster()[CharacterId(2)].health(), 40);
        assert_eq!(console.remaining(), 0);
    }

    #[test]
    fn test_setup_reprompts_bad_stats() {
        let mut console = ScriptedConsole::new(["abc", "0", "30", "5", "25", "6", "40", "4"]);
        let game = Game::setup(GameConfig::default(), rng(), &mut console).expect("setup");
        assert_eq!(game.roster()[CharacterId(0)].health(), 30);
        let rejected = console
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::InputRejected { .. }))
            .count();
        assert_eq!(rejected, 2);
    }

    #[test]
    fn test_setup_uses_presets() {
        let mut config = GameConfig::default();
        config.setup.knight = Some(StartingStats::new(50, 5));
        config.setup.mage = Some(StartingStats::new(50, 5));
        let mut console = ScriptedConsole::new(["20", "3"]);
        let game = Game::setup(config, rng(), &mut console).expect("setup");
        assert_eq!(console.prompts.len(), 2);
        assert_eq!(game.roster()[CharacterId(2)].health(), 20);
    }

    #[test]
    fn test_blank_choice_passes_without_regen() {
        let config = GameConfig::default();
        let mage = Character::new(
            CharacterId(1),
            "Mage",
            StartingStats::new(30, 5),
            Class::Mage(Mage::new(MageRules::default()).with_mana(15)),
        );
        let mut roster = standard_roster(30);
        roster[CharacterId(1)] = mage;
        let mut game = Game::with_roster(config, roster, rng());
        let mut console = ScriptedConsole::new([""]);
        let outcome = game.take_turn(CharacterId(1), &mut console).expect("turn");
        assert_eq!(outcome, TurnOutcome::Passed);
        assert_eq!(game.roster()[CharacterId(1)].as_mage().map(Mage::mana), Some(15));
    }

    #[test]
    fn test_unknown_slot_consumes_turn_and_still_regens() {
        let mut roster = standard_roster(30);
        roster[CharacterId(1)] = Character::new(
            CharacterId(1),
            "Mage",
            StartingStats::new(30, 5),
            Class::Mage(Mage::new(MageRules::default()).with_mana(15)),
        );
        let mut game = Game::with_roster(GameConfig::default(), roster, rng());
        let mut console = ScriptedConsole::new(["4"]);
        let outcome = game.take_turn(CharacterId(1), &mut console).expect("turn");
        assert!(matches!(
            outcome,
            TurnOutcome::Acted {
                action: None,
                resolution: Err(ActionFailure::InvalidSelection(_))
            }
        ));
        assert_eq!(game.roster()[CharacterId(1)].as_mage().map(Mage::mana), Some(20));
    }

    #[test]
    fn test_bad_target_index_aborts_attack() {
        let mut game = Game::with_roster(GameConfig::default(), standard_roster(30), rng());
        let mut console = ScriptedConsole::new(["1", "7"]);
        let outcome = game.take_turn(CharacterId(0), &mut console).expect("turn");
        assert!(matches!(
            outcome,
            TurnOutcome::Acted {
                resolution: Err(ActionFailure::InvalidSelection(_)),
                ..
            }
        ));
        assert_eq!(game.roster()[CharacterId(1)].health(), 30);
        assert_eq!(game.roster()[CharacterId(2)].health(), 30);
    }

    #[test]
    fn test_target_menu_lists_living_opponents() {
        let mut game = Game::with_roster(GameConfig::default(), standard_roster(30), rng());
        let mut console = ScriptedConsole::new(["1", "2"]);
        game.take_turn(CharacterId(0), &mut console).expect("turn");
        let Some(Prompt::Target { options, .. }) = console.prompts.get(1) else {
            panic!("expected a target prompt, got {:?}", console.prompts);
        };
        let names: Vec<_> = options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Mage", "Robot"]);
        // Option 2 is the robot
        assert!(game.roster()[CharacterId(2)].health() < 30);
        assert_eq!(game.roster()[CharacterId(1)].health(), 30);
    }

    #[test]
    fn test_sleeping_robot_is_not_prompted() {
        let mut roster = standard_roster(30);
        roster[CharacterId(2)] = Character::new(
            CharacterId(2),
            "Robot",
            StartingStats::new(30, 5),
            Class::Robot(Robot::new(RobotRules::default()).with_battery(12)),
        );
        let mut game = Game::with_roster(GameConfig::default(), roster, rng());
        let mut console = ScriptedConsole::new(["4", "1", "2", "1"]);

        game.take_turn(CharacterId(2), &mut console).expect("overload turn");
        let after_overload: u32 = [CharacterId(0), CharacterId(1)]
            .iter()
            .map(|&id| game.roster()[id].health())
            .sum();
        assert_eq!(after_overload, 60 - 24);

        let outcome = game.take_turn(CharacterId(2), &mut console).expect("sleep turn");
        assert_eq!(outcome, TurnOutcome::Asleep);
        assert_eq!(console.prompts.len(), 1);

        let outcome = game.take_turn(CharacterId(2), &mut console).expect("awake turn");
        assert!(matches!(
            outcome,
            TurnOutcome::Acted {
                action: Some(Action::Attack),
                resolution: Err(ActionFailure::InsufficientResource { .. })
            }
        ));
    }

    /// Everyone but `survivor` is dead, as after a kill earlier in the round
    fn last_one_standing(survivor: CharacterId, replacement: Option<Character>) -> Game<ChaCha8Rng> {
        let mut roster = standard_roster(30);
        if let Some(character) = replacement {
            roster[survivor] = character;
        }
        let mut log = EventLog::new();
        for id in roster.ids() {
            if id != survivor {
                roster[id].receive_damage(100, &mut log);
            }
        }
        Game::with_roster(GameConfig::default(), roster, rng())
    }

    fn no_target(outcome: &TurnOutcome) -> bool {
        matches!(
            outcome,
            TurnOutcome::Acted {
                resolution: Err(ActionFailure::NoLegalTarget),
                ..
            }
        )
    }

    #[test]
    fn test_knight_without_opponents_spends_nothing() {
        let mut game = last_one_standing(CharacterId(0), None);
        let mut console = ScriptedConsole::new(["1", "4"]);

        let attack = game.take_turn(CharacterId(0), &mut console).expect("attack turn");
        assert!(no_target(&attack));
        let special = game.take_turn(CharacterId(0), &mut console).expect("throw turn");
        assert!(no_target(&special));

        // Only the two action prompts; no target menu was offered
        assert_eq!(console.prompts.len(), 2);
        let knight = game.roster()[CharacterId(0)].as_knight().expect("knight");
        assert_eq!(knight.shield(), 15);
        assert!(console
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::ActionFailed { .. })));
    }

    #[test]
    fn test_mage_without_opponents_still_regenerates() {
        let mage = Character::new(
            CharacterId(1),
            "Mage",
            StartingStats::new(30, 5),
            Class::Mage(Mage::new(MageRules::default()).with_mana(15)),
        );
        let mut game = last_one_standing(CharacterId(1), Some(mage));
        let mut console = ScriptedConsole::new(["1"]);

        let outcome = game.take_turn(CharacterId(1), &mut console).expect("turn");
        assert!(no_target(&outcome));
        assert_eq!(console.prompts.len(), 1);
        assert_eq!(game.roster()[CharacterId(1)].as_mage().map(Mage::mana), Some(20));
    }

    #[test]
    fn test_robot_without_opponents_keeps_battery_and_stays_awake() {
        let mut game = last_one_standing(CharacterId(2), None);
        let mut console = ScriptedConsole::new(["4", "1"]);

        let special = game.take_turn(CharacterId(2), &mut console).expect("overload turn");
        assert!(no_target(&special));
        let attack = game.take_turn(CharacterId(2), &mut console).expect("attack turn");
        assert!(no_target(&attack));

        let robot = game.roster()[CharacterId(2)].as_robot().expect("robot");
        assert_eq!(robot.battery(), 40);
        assert!(!robot.is_sleeping());
    }

    #[test]
    fn test_game_with_one_survivor_is_already_over() {
        let mut roster = standard_roster(30);
        let mut log = EventLog::new();
        roster[CharacterId(0)].receive_damage(100, &mut log);
        roster[CharacterId(1)].receive_damage(100, &mut log);
        let mut game = Game::with_roster(GameConfig::default(), roster, rng());
        assert!(game.is_over());
        let mut console = ScriptedConsole::default();
        let ranking = game.run(&mut console).expect("nothing to ask");
        assert_eq!(ranking[0].name, "Robot");
        assert!(matches!(
            console.events.last(),
            Some(GameEvent::GameOver { rounds: 0, .. })
        ));
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1", 2), Some(0));
        assert_eq!(parse_choice(" 2 ", 2), Some(1));
        assert_eq!(parse_choice("0", 2), None);
        assert_eq!(parse_choice("3", 2), None);
        assert_eq!(parse_choice("x", 2), None);
    }
}
