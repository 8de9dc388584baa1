use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::config::GameConfig;
use crate::snake::Direction::{self, *};

/// Normalized player intent. Everything downstream of the adapter works on these only.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Move(Direction),
    TogglePause,
    Start,
    Reset,
    Quit,
}

/// Turns raw terminal events (keys and mouse swipes) into [`InputEvent`]s.
pub struct InputAdapter {
    swipe: SwipeTracker,
    /// Surface units per terminal column and row
    unit_scale: (f64, f64),
}

impl InputAdapter {
    pub fn new(config: &GameConfig) -> Self {
        // A grid cell is drawn two columns wide and one row tall
        let cell = config.cell_size as f64;
        InputAdapter {
            swipe: SwipeTracker::new(config.swipe_threshold),
            unit_scale: (cell / 2.0, cell),
        }
    }

    pub fn translate(&mut self, event: &Event) -> Option<InputEvent> {
        match event {
            Event::Key(key) => translate_key(key),
            Event::Mouse(mouse) => self.translate_mouse(mouse),
            _ => None,
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn translate_mouse(&mut self, mouse: &MouseEvent) -> Option<InputEvent> {
        let x = mouse.column as f64 * self.unit_scale.0;
        let y = mouse.row as f64 * self.unit_scale.1;

        match mouse.kind {
            MouseEventKind::Down(_) => {
                self.swipe.press(x, y);
                None
            }
            MouseEventKind::Drag(_) => self.swipe.drag(x, y).map(InputEvent::Move),
            MouseEventKind::Up(_) => {
                let dir = self.swipe.drag(x, y);
                self.swipe.release();
                dir.map(InputEvent::Move)
            }
            _ => None,
        }
    }
}

pub fn translate_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if is_ctrl_c(key) {
        return Some(InputEvent::Quit);
    }

    let ev = match key.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => InputEvent::Move(Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => InputEvent::Move(Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => InputEvent::Move(Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => InputEvent::Move(Right),
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => InputEvent::TogglePause,
        KeyCode::Enter => InputEvent::Start,
        KeyCode::Char('r') | KeyCode::Char('R') => InputEvent::Reset,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputEvent::Quit,
        _ => return None,
    };

    Some(ev)
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// Recognizes one swipe per press: the first time the pointer gets further
/// than `threshold` from where it went down, the dominant axis picks the
/// direction. Later movement is ignored until release.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f64,
    origin: Option<(f64, f64)>,
    fired: bool,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        SwipeTracker { threshold, origin: None, fired: false }
    }

    pub fn press(&mut self, x: f64, y: f64) {
        self.origin = Some((x, y));
        self.fired = false;
    }

    pub fn drag(&mut self, x: f64, y: f64) -> Option<Direction> {
        if self.fired {
            return None;
        }

        let (ox, oy) = self.origin?;
        let (dx, dy) = (x - ox, y - oy);

        if dx.abs().max(dy.abs()) <= self.threshold {
            return None;
        }

        self.fired = true;
        let dir = if dx.abs() > dy.abs() {
            if dx > 0.0 { Right } else { Left }
        } else if dy > 0.0 {
            Down
        } else {
            Up
        };
        Some(dir)
    }

    pub fn release(&mut self) {
        self.origin = None;
        self.fired = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseButton};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE })
    }

    #[test]
    fn test_arrow_keys_and_wasd() {
        let mut input = InputAdapter::new(&GameConfig::default());
        assert_eq!(input.translate(&key(KeyCode::Left)), Some(InputEvent::Move(Left)));
        assert_eq!(input.translate(&key(KeyCode::Up)), Some(InputEvent::Move(Up)));
        assert_eq!(input.translate(&key(KeyCode::Char('d'))), Some(InputEvent::Move(Right)));
        assert_eq!(input.translate(&key(KeyCode::Char('S'))), Some(InputEvent::Move(Down)));
    }

    #[test]
    fn test_control_keys() {
        let mut input = InputAdapter::new(&GameConfig::default());
        assert_eq!(input.translate(&key(KeyCode::Char(' '))), Some(InputEvent::TogglePause));
        assert_eq!(input.translate(&key(KeyCode::Enter)), Some(InputEvent::Start));
        assert_eq!(input.translate(&key(KeyCode::Char('r'))), Some(InputEvent::Reset));
        assert_eq!(input.translate(&key(KeyCode::Esc)), Some(InputEvent::Quit));
        assert_eq!(input.translate(&key(KeyCode::Char('x'))), None);

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(input.translate(&ctrl_c), Some(InputEvent::Quit));
    }

    #[test]
    fn test_key_release_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(translate_key(&release), None);
    }

    #[test]
    fn test_short_drag_is_not_a_swipe() {
        let mut swipe = SwipeTracker::new(30.0);
        swipe.press(100.0, 100.0);
        assert_eq!(swipe.drag(125.0, 110.0), None);
        assert_eq!(swipe.drag(130.0, 100.0), None);
    }

    #[test]
    fn test_dominant_axis_wins() {
        let mut swipe = SwipeTracker::new(30.0);
        swipe.press(0.0, 0.0);
        assert_eq!(swipe.drag(-40.0, 20.0), Some(Left));

        swipe.press(0.0, 0.0);
        assert_eq!(swipe.drag(10.0, -35.0), Some(Up));
    }

    #[test]
    fn test_one_event_per_gesture() {
        let mut swipe = SwipeTracker::new(30.0);
        swipe.press(0.0, 0.0);
        assert_eq!(swipe.drag(0.0, 40.0), Some(Down));
        assert_eq!(swipe.drag(0.0, 90.0), None);
        assert_eq!(swipe.drag(80.0, 90.0), None);
        swipe.release();

        assert_eq!(swipe.drag(200.0, 0.0), None);
    }

    #[test]
    fn test_mouse_swipe_in_terminal_cells() {
        let mut input = InputAdapter::new(&GameConfig::default());
        let left = MouseButton::Left;

        assert_eq!(input.translate(&mouse(MouseEventKind::Down(left), 10, 5)), None);
        // 3 columns = 30 units, not past the threshold
        assert_eq!(input.translate(&mouse(MouseEventKind::Drag(left), 13, 5)), None);
        assert_eq!(
            input.translate(&mouse(MouseEventKind::Drag(left), 14, 5)),
            Some(InputEvent::Move(Right))
        );
        assert_eq!(input.translate(&mouse(MouseEventKind::Drag(left), 20, 5)), None);
        assert_eq!(input.translate(&mouse(MouseEventKind::Up(left), 20, 5)), None);

        // 2 rows = 40 units
        input.translate(&mouse(MouseEventKind::Down(left), 10, 5));
        assert_eq!(
            input.translate(&mouse(MouseEventKind::Up(left), 10, 3)),
            Some(InputEvent::Move(Up))
        );
    }
}
