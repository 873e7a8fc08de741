pub mod action;
pub mod events;
pub mod game;
pub mod roster;

pub use action::{menu, Action, MenuEntry, Selection};
pub use events::{EventLog, GameEvent, ResourceStatus, Standing, StatusReport};
pub use game::{play, Game, GamePhase, Resolution, TurnOutcome};
pub use roster::{Roster, ROSTER_SIZE};
