//! Skirmish - three-way turn-based console battle

pub mod combat;
pub mod core;
pub mod engine;
pub mod ui;
