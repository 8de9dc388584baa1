use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::score::ScoreStore;
use crate::snake::{Direction, Position, Snake};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameStatus {
    Idle,
    Running,
    Paused,
    Over,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

/// What a single call to [`Game::advance`] did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The game is not running; nothing changed.
    Skipped,
    /// No heading yet, the snake holds its position.
    Held,
    Moved { ate: bool },
    Crashed(Collision),
    /// The snake ate the last free cell.
    Cleared,
}

/// Read-only view handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub snake: &'a Snake,
    pub food: Option<Position>,
    pub heading: Option<Direction>,
    pub score: u32,
    pub high_score: u32,
    pub status: GameStatus,
    pub speed: u32,
    pub won: bool,
    pub grid_dimension: i32,
}

pub struct Game<S, R = StdRng> {
    config: GameConfig,
    store: S,
    rng: R,
    snake: Snake,
    tail_length: usize,
    heading: Option<Direction>,
    pending: Option<Direction>,
    food: Option<Position>,
    score: u32,
    high_score: u32,
    speed: u32,
    status: GameStatus,
    won: bool,
}

impl<S: ScoreStore> Game<S, StdRng> {
    /// Seeds food placement from `seed`, or from OS entropy when absent.
    pub fn seeded(config: GameConfig, store: S, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Game::new(config, store, rng)
    }
}

impl<S: ScoreStore, R: Rng> Game<S, R> {
    pub fn new(config: GameConfig, store: S, rng: R) -> Self {
        let high_score = store.get();
        let mut game = Game {
            snake: Snake::new(config.start),
            tail_length: config.initial_tail_length,
            heading: None,
            pending: None,
            food: None,
            score: 0,
            high_score,
            speed: config.base_speed,
            status: GameStatus::Idle,
            won: false,
            config,
            store,
            rng,
        };
        game.init();
        game
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    pub fn tail_length(&self) -> usize {
        self.tail_length
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: &self.snake,
            food: self.food,
            heading: self.heading,
            score: self.score,
            high_score: self.high_score,
            status: self.status,
            speed: self.speed,
            won: self.won,
            grid_dimension: self.config.grid_dimension(),
        }
    }

    /// Idle or Over -> Running. A finished game is replaced by a fresh one.
    pub fn start(&mut self) {
        match self.status {
            GameStatus::Over => {
                self.init();
                self.status = GameStatus::Running;
            }
            GameStatus::Idle => self.status = GameStatus::Running,
            GameStatus::Running | GameStatus::Paused => return,
        }
        info!(high_score = self.high_score, "game started");
    }

    pub fn pause(&mut self) {
        if self.status == GameStatus::Running {
            self.status = GameStatus::Paused;
            debug!("paused");
        }
    }

    pub fn resume(&mut self) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Running;
            debug!("resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.status {
            GameStatus::Running => self.pause(),
            GameStatus::Paused => self.resume(),
            GameStatus::Idle | GameStatus::Over => self.start(),
        }
    }

    /// Throws away the current game, whatever its state, and waits for a start.
    pub fn reset(&mut self) {
        self.init();
        self.status = GameStatus::Idle;
        debug!("reset");
    }

    /// Queues a turn for the next step. Reversals and turns outside a running
    /// game are ignored.
    pub fn set_direction(&mut self, dir: Direction) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }

        if self.heading.map_or(false, |cur| cur.opposite() == dir) {
            return false;
        }

        if self.pending != Some(dir) {
            debug!(?dir, "direction queued");
        }
        self.pending = Some(dir);
        true
    }

    /// One tick of the simulation.
    pub fn advance(&mut self) -> Advance {
        if self.status != GameStatus::Running {
            return Advance::Skipped;
        }

        if let Some(dir) = self.pending.take() {
            self.heading = Some(dir);
        }

        let dir = match self.heading {
            Some(dir) => dir,
            None => return Advance::Held,
        };

        let head = self.snake.move_step(dir, self.tail_length);
        let mut ate = false;

        if self.food == Some(head) {
            ate = true;
            self.eat();

            if self.food.is_none() {
                self.won = true;
                self.finish();
                return Advance::Cleared;
            }
        }

        if !head.within(self.config.grid_dimension()) {
            self.finish();
            return Advance::Crashed(Collision::Wall);
        }

        if self.snake.bites_itself() {
            self.finish();
            return Advance::Crashed(Collision::Body);
        }

        Advance::Moved { ate }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn init(&mut self) {
        self.snake = Snake::new(self.config.start);
        self.tail_length = self.config.initial_tail_length;
        self.heading = None;
        self.pending = None;
        self.score = 0;
        self.speed = self.config.base_speed;
        self.won = false;
        self.food = self.place_food();
    }

    fn eat(&mut self) {
        self.tail_length += 1;
        self.score += self.config.score_increment;
        self.food = self.place_food();
        debug!(score = self.score, food = ?self.food, "food eaten");

        if self.score % self.config.speed_up_every == 0 {
            self.speed += self.config.speed_step;
            debug!(speed = self.speed, "speed up");
        }
    }

    fn finish(&mut self) {
        self.status = GameStatus::Over;
        info!(score = self.score, won = self.won, "game over");

        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.set(self.score);
            info!(high_score = self.high_score, "new high score");
        }
    }

    /// Uniform over free cells: random draws first, then a scan once the
    /// board is crowded enough that draws keep missing.
    fn place_food(&mut self) -> Option<Position> {
        let dim = self.config.grid_dimension();

        for _ in 0..self.config.food_attempts {
            let pos = Position::new(self.rng.gen_range(0..dim), self.rng.gen_range(0..dim));
            if !self.snake.contains(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..dim)
            .flat_map(|y| (0..dim).map(move |x| Position::new(x, y)))
            .filter(|pos| !self.snake.contains(*pos))
            .collect();

        free.choose(&mut self.rng).copied()
    }
}
