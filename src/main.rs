//! Blockfall terminal runner (default binary).
//!
//! Hosts the event loop: a fixed gravity timer and key polling feed the
//! controller, and the frame is redrawn after anything changes.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::config::GameConfig;
use blockfall::core::Controller;
use blockfall::input::{handle_key_event, should_quit};
use blockfall::session_log::SessionLog;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    if let Err(err) = config.validate() {
        eprintln!("[blockfall] invalid configuration: {:#}", err);
        std::process::exit(2);
    }

    let mut log = SessionLog::open(config.log_path.as_deref());
    if let (Some(path), false) = (&config.log_path, log.is_enabled()) {
        eprintln!("[blockfall] cannot open log file {}, continuing without it", path);
    }
    log.note(&format!(
        "start seed={} board={}x{} tick_ms={}",
        config.seed, config.rows, config.cols, config.tick_ms
    ));

    let mut game = Controller::seeded(config.rows as usize, config.cols as usize, config.seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &mut game, &mut log);

    // Always try to restore terminal state.
    let _ = term.exit();

    log.note(&format!("quit score={}", game.score()));
    log.flush();
    eprintln!("[blockfall] final score: {}", game.score());
    result
}

fn run(
    term: &mut TerminalRenderer,
    config: &GameConfig,
    game: &mut Controller,
    log: &mut SessionLog<impl std::io::Write>,
) -> Result<()> {
    let view = GameView::new(config.cell_width(), 1);
    let mut fb = FrameBuffer::new(0, 0);
    let tick_duration = config.tick_interval();
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(game.state(), Viewport::new(w, h), &mut fb);
            term.present(&fb)?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        dirty |= game.apply_action(action);
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            dirty |= game.tick();
        }

        for ev in game.take_events() {
            log.record(&ev);
        }
    }
}
