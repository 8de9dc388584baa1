//! Classic Snake for the terminal.
//!
//! The gameplay core (`game`) has no I/O: it is stepped by a [`ticker::Ticker`]
//! through a [`session::Session`], fed normalized [`input::InputEvent`]s, and
//! drawn from read-only [`game::Snapshot`]s by the terminal renderer.

pub mod app;
pub mod config;
pub mod game;
pub mod input;
pub mod score;
pub mod session;
pub mod snake;
pub mod term;
pub mod ticker;

pub type TermInt = u16;
pub type Coords = (u16, u16);

pub use config::GameConfig;
pub use game::{Advance, Collision, Game, GameStatus, Snapshot};
pub use input::{InputAdapter, InputEvent};
pub use score::{FileScoreStore, MemoryScoreStore, ScoreStore};
pub use session::Session;
pub use snake::{Direction, Position, Snake};
