use std::collections::VecDeque;

use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// A cell on the board. Signed, so a head that left the board is still representable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Position { x: self.x + dx, y: self.y + dy }
    }

    pub fn within(self, dim: i32) -> bool {
        (0..dim).contains(&self.x) && (0..dim).contains(&self.y)
    }
}

/// Head-first body. Growth is driven by the caller's tail length, not by the snake itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    pub fn new(head: Position) -> Self {
        Snake { body: VecDeque::from(vec![head]) }
    }

    pub fn from_segments<I: IntoIterator<Item = Position>>(segments: I) -> Self {
        let body: VecDeque<Position> = segments.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least a head");
        Snake { body }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Moves the head one cell and trims the tail down to `tail_length`.
    /// Returns the new head.
    pub fn move_step(&mut self, dir: Direction, tail_length: usize) -> Position {
        let new_head = self.head().step(dir);
        self.body.push_front(new_head);

        while self.body.len() > tail_length {
            self.body.pop_back();
        }

        new_head
    }

    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|seg| *seg == head)
    }

    pub fn head_char(dir: Option<Direction>) -> char {
        match dir {
            Some(Up) => '^',
            Some(Down) => 'v',
            Some(Left) => '<',
            Some(Right) => '>',
            None => '@',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        assert_eq!(Up.opposite(), Down);
        assert_eq!(Left.opposite(), Right);
        assert_ne!(Up.opposite(), Left);
    }

    #[test]
    fn test_fresh_snake_stretches_to_tail_length() {
        let mut snake = Snake::new(Position::new(10, 10));
        assert_eq!(snake.len(), 1);

        snake.move_step(Right, 2);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(11, 10));

        snake.move_step(Right, 2);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.body()[1], Position::new(11, 10));
    }

    #[test]
    fn test_move_preserves_shape() {
        let mut snake = Snake::from_segments(vec![
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(4, 6),
        ]);

        snake.move_step(Up, 3);
        let body: Vec<_> = snake.body().iter().copied().collect();
        assert_eq!(body, vec![Position::new(5, 4), Position::new(5, 5), Position::new(5, 6)]);
    }

    #[test]
    fn test_tail_cell_is_free_to_enter() {
        // 2x2 loop: the head moves into the cell the tail leaves on the same step
        let mut snake = Snake::from_segments(vec![
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(0, 1),
            Position::new(0, 0),
        ]);

        snake.move_step(Left, 4);
        assert!(!snake.bites_itself());
    }

    #[test]
    fn test_bites_itself() {
        let mut snake = Snake::from_segments(vec![
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 6),
            Position::new(5, 6),
            Position::new(4, 6),
        ]);

        snake.move_step(Down, 5);
        assert!(snake.bites_itself());
    }

    #[test]
    fn test_within() {
        assert!(Position::new(0, 0).within(20));
        assert!(Position::new(19, 19).within(20));
        assert!(!Position::new(20, 10).within(20));
        assert!(!Position::new(-1, 3).within(20));
    }
}
