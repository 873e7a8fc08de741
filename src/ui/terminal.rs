//! Line-based console: box-drawn status blocks and plain narration

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use crate::core::error::{Result, SkirmishError};
use crate::engine::events::{GameEvent, ResourceStatus, StatusReport};
use crate::ui::{Presenter, Prompt};

const BANNER: &str = "═════════════════════════════════════";
const BOX_WIDTH: usize = 48;

pub struct TerminalConsole<R, W> {
    input: R,
    output: W,
    /// Echo each answer after its prompt (useful when answers come from a file)
    echo: bool,
}

impl TerminalConsole<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            echo: false,
        }
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn write_prompt(&mut self, prompt: &Prompt) -> io::Result<()> {
        match prompt {
            Prompt::Stat { name, stat, .. } => {
                write!(self.output, "Enter {} for {}: ", stat, name)
            }
            Prompt::Action { actor, menu } => {
                let options: Vec<String> = menu
                    .iter()
                    .map(|entry| format!("{} - {}", entry.slot, entry.action.label()))
                    .collect();
                write!(self.output, "Choose an action for {}: {}: ", actor, options.join(", "))
            }
            Prompt::Target { options, .. } => {
                writeln!(self.output, "Choose a target:")?;
                for option in options {
                    writeln!(
                        self.output,
                        "{}. {} (Health: {})",
                        option.number, option.name, option.health
                    )?;
                }
                write!(self.output, "Your choice: ")
            }
            Prompt::AttackTier {
                actor,
                weak_cost,
                strong_cost,
            } => write!(
                self.output,
                "Choose strike power for {}: 1 - Weak ({} mana), 2 - Strong ({} mana): ",
                actor, weak_cost, strong_cost
            ),
        }
    }

    fn write_status(&mut self, status: &StatusReport) -> io::Result<()> {
        let rule = "═".repeat(BOX_WIDTH);
        writeln!(self.output, "╔{}╗", rule)?;
        writeln!(
            self.output,
            "║ {} (Health: {}/{})",
            status.name, status.health, status.max_health
        )?;
        match &status.resource {
            ResourceStatus::Shield { current, active } => {
                let state = if *active { " [raised]" } else { "" };
                writeln!(self.output, "║ Shield: {}{}", current, state)?;
            }
            ResourceStatus::Mana { current, max } => {
                writeln!(self.output, "║ Mana: {}/{}", current, max)?;
            }
            ResourceStatus::Battery {
                current,
                max,
                sleeping,
            } => {
                let state = if *sleeping { " [asleep]" } else { "" };
                writeln!(self.output, "║ Battery: {}/{}{}", current, max, state)?;
            }
        }
        writeln!(self.output, "╚{}╝", rule)
    }

    fn write_event(&mut self, event: &GameEvent) -> io::Result<()> {
        match event {
            GameEvent::GameStarted { roster } => {
                writeln!(self.output, "Fighters: {}", roster.join(", "))
            }
            GameEvent::RoundStarted { round } => {
                writeln!(self.output, "{}", BANNER)?;
                writeln!(self.output, "           Round {}", round)?;
                writeln!(self.output, "{}", BANNER)
            }
            GameEvent::Status(status) => self.write_status(status),
            GameEvent::TurnSkipped { actor } => writeln!(self.output, "║ {} passes.", actor),
            GameEvent::SleptThroughTurn { actor } => {
                writeln!(self.output, "║ {} is asleep and skips the turn!", actor)
            }
            GameEvent::InputRejected { input } => {
                writeln!(self.output, "Not a valid value: {:?}", input)
            }
            GameEvent::Attacked {
                actor,
                target,
                damage,
            } => writeln!(
                self.output,
                "║ {} attacks {} for {} damage!",
                actor, target, damage
            ),
            GameEvent::ShieldAbsorbed {
                absorbed,
                shield_left,
                ..
            } => writeln!(
                self.output,
                "║ The shield absorbs {} damage. Shield left: {}",
                absorbed, shield_left
            ),
            GameEvent::DamageTaken {
                actor,
                damage,
                health,
            } => writeln!(
                self.output,
                "║ {} takes {} damage. Health left: {}",
                actor, damage, health
            ),
            GameEvent::ShieldDestroyed { actor } => {
                writeln!(self.output, "║ {}'s shield is destroyed!", actor)
            }
            GameEvent::Died { actor } => writeln!(self.output, "║ {} has fallen!", actor),
            GameEvent::Healed {
                actor,
                amount,
                health,
            } => writeln!(
                self.output,
                "║ {} restores {} health. Current health: {}",
                actor, amount, health
            ),
            GameEvent::ShieldRaised { actor } => {
                writeln!(self.output, "║ {} raises the shield!", actor)
            }
            GameEvent::ManaRestored { actor, mana } => writeln!(
                self.output,
                "║ {} restores mana to the maximum ({})!",
                actor, mana
            ),
            GameEvent::ManaRegenerated {
                actor,
                gained,
                mana,
            } => writeln!(
                self.output,
                "║ {} regains {} mana. Current mana: {}",
                actor, gained, mana
            ),
            GameEvent::BatteryRestored { actor, battery } => writeln!(
                self.output,
                "║ {} recharges the battery to the maximum ({})!",
                actor, battery
            ),
            GameEvent::ShieldThrown {
                actor,
                target,
                damage,
            } => writeln!(
                self.output,
                "║ {} hurls the shield at {} for {} damage!",
                actor, target, damage
            ),
            GameEvent::Overloaded {
                actor,
                target,
                damage,
            } => writeln!(
                self.output,
                "║ {} overloads into {} for {} damage and shuts down to sleep.",
                actor, target, damage
            ),
            GameEvent::ActionFailed { actor, reason } => {
                writeln!(self.output, "║ {} fails: {}", actor, reason)
            }
            GameEvent::GameOver { rounds, ranking } => {
                writeln!(self.output, "{}", BANNER)?;
                writeln!(self.output, "           Game over after {} rounds", rounds)?;
                writeln!(self.output, "{}", BANNER)?;
                for standing in ranking {
                    let state = if standing.alive { "alive" } else { "dead" };
                    writeln!(self.output, "{}. {} ({})", standing.place, standing.name, state)?;
                }
                Ok(())
            }
        }
    }
}

impl<R: BufRead, W: Write> Presenter for TerminalConsole<R, W> {
    fn ask(&mut self, prompt: &Prompt) -> Result<String> {
        self.write_prompt(prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SkirmishError::InputClosed);
        }
        let answer = line.trim_end_matches(['\r', '\n']).to_string();
        if self.echo {
            writeln!(self.output, "{}", answer)?;
        }
        Ok(answer)
    }

    fn show(&mut self, event: &GameEvent) -> Result<()> {
        self.write_event(event)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ClassKind, Stat};
    use crate::engine::events::Standing;
    use std::io::Cursor;

    fn console(input: &str) -> TerminalConsole<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn rendered(console: TerminalConsole<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).expect("utf8 output")
    }

    #[test]
    fn test_ask_strips_newline() {
        let mut console = console("42\r\n");
        let prompt = Prompt::Stat {
            class: ClassKind::Robot,
            name: "Robot".into(),
            stat: Stat::Health,
        };
        assert_eq!(console.ask(&prompt).expect("line available"), "42");
        assert!(rendered(console).contains("Enter health for Robot"));
    }

    #[test]
    fn test_eof_is_input_closed() {
        let mut console = console("");
        let prompt = Prompt::AttackTier {
            actor: "Mage".into(),
            weak_cost: 10,
            strong_cost: 20,
        };
        assert!(matches!(console.ask(&prompt), Err(SkirmishError::InputClosed)));
    }

    #[test]
    fn test_status_block_shows_resource() {
        let mut console = console("");
        console
            .show(&GameEvent::Status(StatusReport {
                name: "Mage".into(),
                health: 12,
                max_health: 30,
                resource: ResourceStatus::Mana { current: 15, max: 40 },
            }))
            .expect("write to vec");
        let text = rendered(console);
        assert!(text.contains("Mage (Health: 12/30)"));
        assert!(text.contains("Mana: 15/40"));
        assert!(text.starts_with('╔'));
    }

    #[test]
    fn test_game_over_lists_ranking() {
        let mut console = console("");
        console
            .show(&GameEvent::GameOver {
                rounds: 4,
                ranking: vec![
                    Standing {
                        place: 1,
                        name: "Robot".into(),
                        alive: true,
                    },
                    Standing {
                        place: 2,
                        name: "Knight".into(),
                        alive: false,
                    },
                ],
            })
            .expect("write to vec");
        let text = rendered(console);
        assert!(text.contains("1. Robot (alive)"));
        assert!(text.contains("2. Knight (dead)"));
    }
}
