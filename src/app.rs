use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use rand::Rng;
use tracing::{debug, info};

use crate::game::Game;
use crate::input::InputAdapter;
use crate::score::ScoreStore;
use crate::session::{Flow, Session};
use crate::term::TermRenderer;

/// Upper bound on how long we block waiting for input while no step is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Runs the game in the current terminal until the player quits. The
/// terminal is restored even when the loop fails.
pub fn run<S: ScoreStore, R: Rng>(game: Game<S, R>) -> Result<()> {
    let mut term = TermRenderer::new()?;
    term.check_fits(game.config().grid_dimension())?;

    let mut input = InputAdapter::new(game.config());
    let mut session = Session::new(game);

    term.setup()?;
    info!("terminal ready");
    let result = game_loop(&mut term, &mut input, &mut session);
    term.restore()?;

    result
}

fn game_loop<S: ScoreStore, R: Rng>(
    term: &mut TermRenderer,
    input: &mut InputAdapter,
    session: &mut Session<S, R>,
) -> Result<()> {
    term.draw(&session.game().snapshot())?;

    loop {
        let timeout = session
            .ticker()
            .until_next(Instant::now())
            .unwrap_or(IDLE_POLL);

        let mut dirty = false;

        if event::poll(timeout).context("Error polling events")? {
            // Drain everything that is queued so a burst of keys costs one redraw
            loop {
                let ev = event::read().context("Error reading event")?;

                if let Event::Resize(w, h) = ev {
                    debug!(w, h, "terminal resized");
                    term.resize(w, h)?;
                    dirty = true;
                } else if let Some(action) = input.translate(&ev) {
                    if session.handle(action, Instant::now()) == Flow::Quit {
                        info!("quit");
                        return Ok(());
                    }
                    dirty = true;
                }

                if !event::poll(Duration::ZERO).context("Error polling events")? {
                    break;
                }
            }
        }

        if session.tick(Instant::now()).is_some() {
            dirty = true;
        }

        if dirty {
            term.draw(&session.game().snapshot())?;
        }
    }
}
