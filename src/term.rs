use crate::{Coords, TermInt};
use crate::game::{GameStatus, Snapshot};
use crate::snake::{Position, Snake};

use std::io::{Stdout, Write, stdout};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';
const EMPTY_CHAR: char = '·';

/// Draws snapshots to the terminal. Frames are composed off-screen and only
/// the cells that changed since the previous frame are printed.
pub struct TermRenderer {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<char>,
}

impl TermRenderer {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermRenderer { width, height, stdout: stdout(), screen })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
            .context("Error hiding cursor")?;
        self.clear()
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error unsetting raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, DisableMouseCapture, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }

    /// Fails early when the board cannot fit, rather than drawing a clipped board.
    pub fn check_fits(&self, grid_dimension: i32) -> Result<()> {
        let (need_w, need_h) = required_size(grid_dimension);
        if self.width < need_w || self.height < need_h {
            bail!(
                "terminal is {}x{}, the board needs at least {}x{}",
                self.width, self.height, need_w, need_h
            );
        }
        Ok(())
    }

    pub fn resize(&mut self, width: TermInt, height: TermInt) -> Result<()> {
        self.width = width;
        self.height = height;
        self.clear()
    }

    pub fn draw(&mut self, snap: &Snapshot) -> Result<()> {
        let frame = compose(snap, self.width, self.height);

        for (i, (&new, old)) in frame.iter().zip(self.screen.iter_mut()).enumerate() {
            if new != *old {
                let pos = ((i % self.width as usize) as TermInt, (i / self.width as usize) as TermInt);
                queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(new))
                    .context("Error queueing cell")?;
                *old = new;
            }
        }

        self.stdout.flush().context("Error flushing")
    }

    ///////////////////////////////////////////////////////////////////////////

    fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        Ok(())
    }
}

/// Status line, bordered board, help line.
pub fn required_size(grid_dimension: i32) -> Coords {
    let dim = grid_dimension.max(0) as TermInt;
    (dim * 2 + 2, dim + 4)
}

/// Renders a snapshot into a `width * height` character buffer.
pub fn compose(snap: &Snapshot, width: TermInt, height: TermInt) -> Vec<char> {
    let mut frame = Frame::new(width, height);
    let dim = snap.grid_dimension;
    let (board_w, _) = required_size(dim);
    let left = width.saturating_sub(board_w) / 2;
    let top: TermInt = 1;

    let status = format!("Score: {}   High score: {}   Speed: {}", snap.score, snap.high_score, snap.speed);
    frame.text_centered(0, &status);
    frame.draw_borders(left, top, board_w, dim as TermInt + 2);

    let cell_at = |pos: Position| -> Option<Coords> {
        if !pos.within(dim) {
            return None;
        }
        Some((left + 1 + pos.x as TermInt * 2, top + 1 + pos.y as TermInt))
    };

    for y in 0..dim {
        for x in 0..dim {
            if let Some(at) = cell_at(Position::new(x, y)) {
                frame.put(at, EMPTY_CHAR);
            }
        }
    }

    if let Some(at) = snap.food.and_then(cell_at) {
        frame.put(at, FOOD_CHAR);
    }

    let dead = snap.status == GameStatus::Over && !snap.won;
    let body = snap.snake.body();

    // Tail first, so the head wins when the two overlap on a crash
    for (i, pos) in body.iter().enumerate().rev() {
        let ch = if dead {
            DEAD_SNAKE_CHAR
        } else if i == 0 {
            Snake::head_char(snap.heading)
        } else {
            SNAKE_BODY_CHAR
        };

        if let Some(at) = cell_at(*pos) {
            frame.put(at, ch);
            if ch == SNAKE_BODY_CHAR {
                frame.put((at.0 + 1, at.1), SNAKE_BODY_CHAR);
            }
        }
    }

    frame.text_centered(top + dim as TermInt + 2, "Arrows/WASD/swipe: move   Space: pause   R: reset   Q: quit");

    let score_line = format!("Score: {}", snap.score);
    let message: Option<Vec<&str>> = match snap.status {
        GameStatus::Idle => Some(vec!["Snake", "", "Press an arrow key or Enter"]),
        GameStatus::Paused => Some(vec!["Paused", "Press Space to resume"]),
        GameStatus::Over => Some(vec![
            if snap.won { "You won!" } else { "Game Over!" },
            score_line.as_str(),
            "",
            "Press Enter or an arrow key to play again",
        ]),
        GameStatus::Running => None,
    };

    if let Some(lines) = message {
        frame.message_box(&lines);
    }

    frame.cells
}

struct Frame {
    width: TermInt,
    height: TermInt,
    cells: Vec<char>,
}

impl Frame {
    fn new(width: TermInt, height: TermInt) -> Self {
        Frame { width, height, cells: vec![' '; width as usize * height as usize] }
    }

    fn put(&mut self, pos: Coords, ch: char) {
        if pos.0 < self.width && pos.1 < self.height {
            self.cells[self.width as usize * pos.1 as usize + pos.0 as usize] = ch;
        }
    }

    fn text_at(&mut self, pos: Coords, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.put((pos.0.saturating_add(i as TermInt), pos.1), ch);
        }
    }

    fn text_centered(&mut self, y: TermInt, text: &str) {
        let len = text.chars().count() as TermInt;
        self.text_at((self.width.saturating_sub(len) / 2, y), text);
    }

    fn draw_borders(&mut self, left: TermInt, top: TermInt, width: TermInt, height: TermInt) {
        let end_x = left + width - 1;
        let end_y = top + height - 1;

        for x in left..=end_x {
            let ch = if x == left || x == end_x {'+'} else {'-'};
            self.put((x, top), ch);
            self.put((x, end_y), ch);
        }

        for y in top + 1..end_y {
            self.put((left, y), '|');
            self.put((end_x, y), '|');
        }
    }

    fn message_box(&mut self, lines: &[&str]) {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        for y in [top_left.1, top_left.1 + msg_height - 1] {
            for x_diff in 0..msg_width {
                self.put((top_left.0 + x_diff, y), ' ');
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            self.text_at((top_left.0, y), &padded_line);
        }
    }
}
