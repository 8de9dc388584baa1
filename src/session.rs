use std::time::Instant;

use rand::Rng;

use crate::config::GameConfig;
use crate::game::{Advance, Game, GameStatus};
use crate::input::InputEvent;
use crate::score::ScoreStore;
use crate::ticker::Ticker;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A play session: the game plus the clock that drives it. The ticker only
/// runs while the game does, and follows the game's speed.
pub struct Session<S, R> {
    game: Game<S, R>,
    ticker: Ticker,
}

impl<S: ScoreStore, R: Rng> Session<S, R> {
    pub fn new(game: Game<S, R>) -> Self {
        let ticker = Ticker::new(GameConfig::tick_interval(game.speed()));
        Session { game, ticker }
    }

    pub fn game(&self) -> &Game<S, R> {
        &self.game
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Flow {
        match event {
            InputEvent::Move(dir) => {
                // Steering a stopped game starts or resumes it
                match self.game.status() {
                    GameStatus::Idle | GameStatus::Over => self.game.start(),
                    GameStatus::Paused => self.game.resume(),
                    GameStatus::Running => {}
                }
                self.game.set_direction(dir);
            }
            InputEvent::TogglePause => self.game.toggle_pause(),
            InputEvent::Start => self.game.start(),
            InputEvent::Reset => self.game.reset(),
            InputEvent::Quit => return Flow::Quit,
        }

        self.sync_ticker(now);
        Flow::Continue
    }

    /// Advances the game if a step is due. Returns what the step did.
    pub fn tick(&mut self, now: Instant) -> Option<Advance> {
        if !self.ticker.poll(now) {
            return None;
        }

        let outcome = self.game.advance();
        self.sync_ticker(now);
        Some(outcome)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn sync_ticker(&mut self, now: Instant) {
        if self.game.status() == GameStatus::Running {
            self.ticker.set_interval(GameConfig::tick_interval(self.game.speed()));
            self.ticker.start(now);
        } else {
            self.ticker.stop();
        }
    }
}
