use std::time::Duration;

use crate::snake::Position;

/// Fixed rules of the game. The board size is derived from the surface and
/// cell sizes and is not meant to be changed by players.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Side length of the square drawing surface, in surface units
    pub surface_size: u32,
    /// Side length of one cell, in surface units
    pub cell_size: u32,
    pub start: Position,
    pub initial_tail_length: usize,
    pub score_increment: u32,
    /// Speed goes up each time the score reaches a multiple of this
    pub speed_up_every: u32,
    /// Steps per second at the start of a game
    pub base_speed: u32,
    pub speed_step: u32,
    /// Minimum gesture displacement, in surface units, that counts as a swipe
    pub swipe_threshold: f64,
    /// Random draws tried before food placement falls back to scanning free cells
    pub food_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_size: 400,
            cell_size: 20,
            start: Position::new(10, 10),
            initial_tail_length: 2,
            score_increment: 10,
            speed_up_every: 50,
            base_speed: 7,
            speed_step: 1,
            swipe_threshold: 30.0,
            food_attempts: 64,
        }
    }
}

impl GameConfig {
    pub fn grid_dimension(&self) -> i32 {
        (self.surface_size / self.cell_size) as i32
    }

    pub fn cell_count(&self) -> usize {
        let dim = self.grid_dimension() as usize;
        dim * dim
    }

    pub fn tick_interval(speed: u32) -> Duration {
        Duration::from_secs_f64(1.0 / speed.max(1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let config = GameConfig::default();
        assert_eq!(config.grid_dimension(), 20);
        assert_eq!(config.cell_count(), 400);
        assert!(config.start.within(config.grid_dimension()));
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(GameConfig::tick_interval(8), Duration::from_millis(125));
        assert_eq!(GameConfig::tick_interval(0), Duration::from_secs(1));
    }
}
