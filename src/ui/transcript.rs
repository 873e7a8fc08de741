//! Presenter decorator that records every event as one JSON line

use std::io::Write;

use crate::core::error::Result;
use crate::engine::events::GameEvent;
use crate::ui::{Presenter, Prompt};

pub struct Transcript<P, W> {
    inner: P,
    sink: W,
}

impl<P: Presenter, W: Write> Transcript<P, W> {
    pub fn new(inner: P, sink: W) -> Self {
        Self { inner, sink }
    }

    pub fn into_parts(self) -> (P, W) {
        (self.inner, self.sink)
    }
}

impl<P: Presenter, W: Write> Presenter for Transcript<P, W> {
    fn ask(&mut self, prompt: &Prompt) -> Result<String> {
        self.inner.ask(prompt)
    }

    fn show(&mut self, event: &GameEvent) -> Result<()> {
        serde_json::to_writer(&mut self.sink, event)?;
        self.sink.write_all(b"\n")?;
        self.inner.show(event)
    }
}
