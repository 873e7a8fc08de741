//! Presenter fed from a fixed list of answers; records everything it sees

use std::collections::VecDeque;

use crate::core::error::{Result, SkirmishError};
use crate::engine::events::GameEvent;
use crate::ui::{Presenter, Prompt};

#[derive(Debug, Clone, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub prompts: Vec<Prompt>,
    pub events: Vec<GameEvent>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Presenter for ScriptedConsole {
    fn ask(&mut self, prompt: &Prompt) -> Result<String> {
        self.prompts.push(prompt.clone());
        self.answers.pop_front().ok_or(SkirmishError::InputClosed)
    }

    fn show(&mut self, event: &GameEvent) -> Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}
