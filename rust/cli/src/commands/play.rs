//! Interactive play command: drive a solver session from the terminal.
//!
//! The loop alternates between pumping the session for solver events and
//! prompting for an option id. Stdout carries only the game display;
//! solver diagnostics go through tracing to stderr.

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_hand, format_option, format_turn};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{parse_selection, Selection};
use doukit_core::hand::Party;
use doukit_core::session::{Session, SessionNotice, SessionState};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

/// How long one pump of the session blocks before the loop re-checks
/// for user-visible work.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

pub fn handle_play_command(
    solver: Option<PathBuf>,
    input: Option<PathBuf>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let mut cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    if let Some(path) = solver {
        cfg.executable = path;
    }
    if let Some(path) = input {
        cfg.startup_file = path;
    }

    let mut session = Session::new(cfg);
    session.start()?;
    writeln!(out, "solver started, analyzing ...")?;

    let outcome = run_loop(&mut session, out, err, stdin);
    session.stop();
    outcome
}

fn run_loop(
    session: &mut Session,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    // A move has been sent (or the session just started) and the solver
    // has not answered yet; suppress the prompt until it does.
    let mut awaiting_solver = true;

    loop {
        let mut repaint = false;
        let mut crashed = None;
        for notice in session.wait(POLL_INTERVAL) {
            match notice {
                SessionNotice::State(_) => {
                    repaint = true;
                    awaiting_solver = false;
                }
                SessionNotice::Crashed { reason } => crashed = Some(reason),
            }
        }
        if let Some(reason) = crashed {
            ui::write_error(err, &reason)?;
            return Err(CliError::Solver(reason));
        }
        if repaint {
            render_state(out, session.state())?;
        }

        let (over, offered) = {
            let state = session.state();
            (
                state.is_over(),
                state.options.iter().map(|o| o.id).collect::<Vec<_>>(),
            )
        };
        if over {
            return Ok(());
        }
        if awaiting_solver || offered.is_empty() {
            continue;
        }

        writeln!(out, "option id ('q' to quit):")?;
        let Some(line) = read_stdin_line(stdin) else {
            return Ok(());
        };
        if line.is_empty() {
            continue;
        }
        match parse_selection(&line) {
            Selection::Quit => return Ok(()),
            Selection::Move(id) if offered.contains(&id) => {
                if let Err(e) = session.select_move(id) {
                    let reason = e.to_string();
                    ui::write_error(err, &reason)?;
                    return Err(CliError::Solver(reason));
                }
                awaiting_solver = true;
            }
            Selection::Move(_) => ui::write_error(err, "not one of the offered ids")?,
            Selection::Invalid => ui::write_error(err, "enter an option id or 'q'")?,
        }
    }
}

fn render_state(out: &mut dyn Write, state: &SessionState) -> Result<(), CliError> {
    writeln!(out)?;
    writeln!(out, "opponent: {}", format_hand(&state.hand_theirs))?;
    writeln!(out, "us:       {}", format_hand(&state.hand_ours))?;
    match state.winner {
        Some(Party::Us) => writeln!(out, "game over: we win")?,
        Some(Party::Opponent) => writeln!(out, "game over: opponent wins")?,
        None => writeln!(out, "status: {}", format_turn(state.turn))?,
    }
    for option in &state.options {
        writeln!(out, "{}", format_option(option))?;
    }
    Ok(())
}
