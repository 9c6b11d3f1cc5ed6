//! # Doukit CLI Library
//!
//! Command-line front end for the dou dizhu endgame solver. The solver
//! itself is an external executable; this crate drives it through
//! [`doukit_core`] and renders the session in the terminal.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses
//! command-line arguments and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["doukit", "cfg"];
//! let code = doukit_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Drive an interactive solver session
//! - `edit`: Edit the starting hands and save them to the startup file
//! - `cfg`: Display the resolved configuration
//! - `doctor`: Run environment diagnostics

use std::io::Write;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use clap::Parser;
use cli::{Commands, DoukitCli};
use commands::{
    handle_cfg_command, handle_doctor_command, handle_edit_command, handle_play_command,
};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate
/// subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "edit", "cfg", "doctor"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = DoukitCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    if writeln!(err, "{}", e).is_err()
                        || writeln!(err).is_err()
                        || writeln!(err, "Doukit solver front end").is_err()
                        || writeln!(err, "Usage: doukit <command> [options]\n").is_err()
                        || writeln!(err, "Commands:").is_err()
                    {
                        return exit_code::ERROR;
                    }
                    for c in COMMANDS {
                        if writeln!(err, "  {}", c).is_err() {
                            return exit_code::ERROR;
                        }
                    }
                    if writeln!(err, "\nFor full help, run: doukit --help").is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            }
        }
        Ok(cli) => match cli.cmd {
            Commands::Play { solver, input } => {
                let stdin = std::io::stdin();
                let mut stdin_lock = stdin.lock();
                match handle_play_command(solver, input, out, err, &mut stdin_lock) {
                    Ok(()) => exit_code::SUCCESS,
                    Err(e) => {
                        if writeln!(err, "Error: {}", e).is_err() {
                            return exit_code::ERROR;
                        }
                        exit_code::ERROR
                    }
                }
            }
            Commands::Edit { input } => {
                let stdin = std::io::stdin();
                let mut stdin_lock = stdin.lock();
                match handle_edit_command(input, out, err, &mut stdin_lock) {
                    Ok(()) => exit_code::SUCCESS,
                    Err(e) => {
                        if writeln!(err, "Error: {}", e).is_err() {
                            return exit_code::ERROR;
                        }
                        exit_code::ERROR
                    }
                }
            }
            Commands::Cfg => match handle_cfg_command(out, err) {
                Ok(()) => exit_code::SUCCESS,
                Err(e) => {
                    if writeln!(err, "Error: {}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            },
            Commands::Doctor => match handle_doctor_command(out, err) {
                Ok(()) => exit_code::SUCCESS,
                Err(_) => exit_code::ERROR,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_all_four_subcommands() {
        let commands = vec![
            vec!["doukit", "play"],
            vec!["doukit", "play", "--solver", "bin/dou_solver"],
            vec!["doukit", "edit", "--input", "hands.txt"],
            vec!["doukit", "cfg"],
            vec!["doukit", "doctor"],
        ];
        for cmd_args in commands {
            let result = DoukitCli::try_parse_from(&cmd_args);
            assert!(result.is_ok(), "Failed to parse: {:?}", cmd_args);
        }
    }

    #[test]
    fn unknown_command_exits_2_and_lists_commands() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(vec!["doukit", "frobnicate"], &mut out, &mut err);
        assert_eq!(code, exit_code::ERROR);

        let text = String::from_utf8(err).unwrap();
        assert!(text.contains("Commands:"));
        assert!(text.contains("play"));
        assert!(text.contains("doctor"));
    }

    #[test]
    fn help_goes_to_stdout_with_exit_0() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(vec!["doukit", "--help"], &mut out, &mut err);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(!out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn version_goes_to_stdout_with_exit_0() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(vec!["doukit", "--version"], &mut out, &mut err);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(String::from_utf8(out).unwrap().contains("doukit"));
    }
}
