//! Terminal front end: a human against the background negamax engine.
//!
//! Reads commands from stdin. Moves are coordinates like `b2` (columns
//! a-c, rows 1-3 from the top); `help` lists the rest.

mod config;

use anyhow::{Context, Result};
use config::Config;
use negamax_engine::NegamaxEngine;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing::debug;
use ttt_core::{coord_to_pos, GameState, Player};
use ttt_session::{GameSession, Worker};

fn main() -> Result<()> {
    init_tracing();

    let path = std::env::args().nth(1).unwrap_or_else(|| "ttt.toml".into());
    let config = Config::load_or_default(&path)
        .with_context(|| format!("could not load config from {path}"))?;
    debug!(?config, "starting session");

    let worker = Worker::spawn(Box::new(NegamaxEngine::new()));
    let mut session = GameSession::new(
        worker.dispatcher(),
        Box::new(NegamaxEngine::new()),
        config.depth,
        config.first_player,
    );
    if let Some(scheme) = &config.color_scheme {
        session.set_color_scheme(serde_json::to_value(scheme)?);
    }
    if let Some(size) = &config.window_size {
        session.set_window_size(serde_json::to_value(size)?);
    }
    let watchdog = Duration::from_millis(config.watchdog_ms);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "tic-tac-toe — you are {}", config.engine_side.other())?;
    show(&mut stdout, &session)?;
    engine_turn_if_due(&mut session, config.engine_side, watchdog, &mut stdout)?;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let parts: Vec<&str> = line.trim().split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "quit" | "exit" => break,
            "help" => {
                writeln!(stdout, "  b2        play the cell at column b, row 2")?;
                writeln!(stdout, "  board     show the board")?;
                writeln!(stdout, "  new       start a fresh game")?;
                writeln!(stdout, "  quit      leave")?;
            }
            "board" => show(&mut stdout, &session)?,
            "new" => {
                session.reset();
                show(&mut stdout, &session)?;
                engine_turn_if_due(&mut session, config.engine_side, watchdog, &mut stdout)?;
            }
            coord => {
                let Some(position) = coord_to_pos(coord) else {
                    writeln!(stdout, "unrecognized command '{coord}' (try 'help')")?;
                    continue;
                };
                human_turn(&mut session, config.engine_side, position, &mut stdout)?;
                engine_turn_if_due(&mut session, config.engine_side, watchdog, &mut stdout)?;
            }
        }
        stdout.flush()?;
    }

    Ok(())
}

fn human_turn(
    session: &mut GameSession,
    engine_side: Player,
    position: ttt_core::Position,
    stdout: &mut io::Stdout,
) -> Result<()> {
    let human = engine_side.other();
    if session.state().active_player() != Some(human) {
        writeln!(stdout, "it is not your turn ({})", session.state())?;
        return Ok(());
    }
    if let Err(err) = session.play(human, position) {
        writeln!(stdout, "move rejected: {err}")?;
        // Invalid moves roll back to the same turn with the board intact.
        if session.recover().is_err() {
            writeln!(stdout, "could not recover; state: {}", session.state())?;
        }
        return Ok(());
    }
    show(stdout, session)?;
    Ok(())
}

/// Runs the engine's move when it is the engine's turn, recovering with a
/// synchronous fallback search if the background one misses the watchdog.
fn engine_turn_if_due(
    session: &mut GameSession,
    engine_side: Player,
    watchdog: Duration,
    stdout: &mut io::Stdout,
) -> Result<()> {
    if session.state().active_player() != Some(engine_side) {
        return Ok(());
    }

    if let Err(err) = session.request_engine_move() {
        writeln!(stdout, "engine error: {err}")?;
        return recover_and_show(session, stdout);
    }

    loop {
        match session.poll_engine(watchdog) {
            Ok(Some(position)) => {
                writeln!(stdout, "engine plays {position}")?;
                show(stdout, session)?;
                return Ok(());
            }
            // Passthrough traffic or a drained stale answer; keep waiting.
            Ok(None) => continue,
            Err(err) => {
                writeln!(stdout, "engine error: {err}")?;
                return recover_and_show(session, stdout);
            }
        }
    }
}

fn recover_and_show(session: &mut GameSession, stdout: &mut io::Stdout) -> Result<()> {
    match session.recover() {
        Ok(()) => show(stdout, session),
        Err(err) => {
            writeln!(stdout, "recovery failed: {err}; state: {}", session.state())?;
            Ok(())
        }
    }
}

fn show(stdout: &mut io::Stdout, session: &GameSession) -> Result<()> {
    write!(stdout, "{}", session.board())?;
    match session.state() {
        GameState::Winner { player } => writeln!(stdout, "game over: {player} wins")?,
        GameState::Draw => writeln!(stdout, "game over: draw")?,
        state => writeln!(stdout, "{state}")?,
    }
    stdout.flush()?;
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .try_init();
}
