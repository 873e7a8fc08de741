//! Presentation boundary: prompts out, raw answers in, events rendered

pub mod script;
pub mod terminal;
pub mod transcript;

use serde::Serialize;

use crate::core::error::Result;
use crate::core::types::{ClassKind, Stat};
use crate::engine::action::MenuEntry;
use crate::engine::events::GameEvent;

pub use script::ScriptedConsole;
pub use terminal::TerminalConsole;
pub use transcript::Transcript;

/// A live opponent offered as an attack target (1-based)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetOption {
    pub number: usize,
    pub name: String,
    pub health: u32,
}

/// A question the engine needs a raw answer to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "prompt", rename_all = "snake_case")]
pub enum Prompt {
    Stat {
        class: ClassKind,
        name: String,
        stat: Stat,
    },
    Action {
        actor: String,
        menu: Vec<MenuEntry>,
    },
    Target {
        actor: String,
        options: Vec<TargetOption>,
    },
    AttackTier {
        actor: String,
        weak_cost: u32,
        strong_cost: u32,
    },
}

/// The collaborator the engine talks to. Answers are returned raw; the engine
/// decides what they mean.
pub trait Presenter {
    /// Block until an answer line is available. End of input is
    /// `SkirmishError::InputClosed`.
    fn ask(&mut self, prompt: &Prompt) -> Result<String>;

    fn show(&mut self, event: &GameEvent) -> Result<()>;
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn ask(&mut self, prompt: &Prompt) -> Result<String> {
        (**self).ask(prompt)
    }

    fn show(&mut self, event: &GameEvent) -> Result<()> {
        (**self).show(event)
    }
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn ask(&mut self, prompt: &Prompt) -> Result<String> {
        (**self).ask(prompt)
    }

    fn show(&mut self, event: &GameEvent) -> Result<()> {
        (**self).show(event)
    }
}
