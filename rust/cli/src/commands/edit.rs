//! Interactive starting-hand editor.
//!
//! Hands are edited against the combined 54-card pool, so a rank stops
//! being addable once all copies are placed. Edits touch only the in-memory
//! editor until `save` writes the startup file.

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_hand, format_pool};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::parse_rank;
use doukit_core::editor::HandEditor;
use doukit_core::hand::Party;
use doukit_core::persist;
use std::io::{BufRead, Write};
use std::path::PathBuf;

const EDIT_HELP: &str = "\
commands:
  a <rank>   add a card to our hand
  o <rank>   add a card to the opponent's hand
  r <rank>   remove a card from our hand
  x <rank>   remove a card from the opponent's hand
  clear      empty both hands
  show       redisplay hands and pool
  save       write the hands to the startup file
  quit       leave without saving further changes
ranks: 3-10 J Q K A 2 SJ BJ (or the numbers 3-17)";

pub fn handle_edit_command(
    input: Option<PathBuf>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let mut cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    if let Some(path) = input {
        cfg.startup_file = path;
    }

    let (ours, theirs) = persist::load_startup(&cfg.startup_file);
    let mut editor = HandEditor::new(ours, theirs);

    writeln!(out, "{}", EDIT_HELP)?;
    render(out, &editor)?;

    while let Some(line) = read_stdin_line(stdin) {
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else { continue };
        let arg = parts.next();

        match (cmd, arg) {
            ("a" | "o" | "r" | "x", Some(token)) => {
                let Some(rank) = parse_rank(token) else {
                    ui::write_error(err, &format!("unknown rank '{}'", token))?;
                    continue;
                };
                let party = match cmd {
                    "a" | "r" => Party::Us,
                    _ => Party::Opponent,
                };
                match cmd {
                    "a" | "o" => {
                        if !editor.add_card(rank, party) {
                            ui::display_warning(
                                err,
                                &format!("no copies of {} left in the pool", rank),
                            )?;
                            continue;
                        }
                    }
                    _ => {
                        if let Err(e) = editor.remove_card(rank, party) {
                            ui::write_error(err, &e.to_string())?;
                            continue;
                        }
                    }
                }
                render(out, &editor)?;
            }
            ("clear", None) => {
                editor.clear();
                render(out, &editor)?;
            }
            ("show", None) => render(out, &editor)?,
            ("save", None) => {
                let (ours, theirs) = editor.commit();
                persist::save_startup(&cfg.startup_file, &ours, &theirs)?;
                writeln!(out, "saved to {}", cfg.startup_file.display())?;
            }
            ("quit" | "q", None) => break,
            ("help", None) => writeln!(out, "{}", EDIT_HELP)?,
            _ => ui::write_error(err, "unrecognized command (try 'help')")?,
        }
    }
    Ok(())
}

fn render(out: &mut dyn Write, editor: &HandEditor) -> Result<(), CliError> {
    writeln!(out, "opponent: {}", format_hand(editor.hand(Party::Opponent)))?;
    writeln!(out, "us:       {}", format_hand(editor.hand(Party::Us)))?;
    writeln!(out, "pool:     {}", format_pool(editor))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_editor(path: &std::path::Path, script: &str) -> (Vec<u8>, Vec<u8>) {
        let mut stdin = Cursor::new(script.to_string());
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_edit_command(
            Some(path.to_path_buf()),
            &mut out,
            &mut err,
            &mut stdin,
        )
        .unwrap();
        (out, err)
    }

    #[test]
    fn edits_and_saves_the_startup_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");

        let (_out, err) = run_editor(&path, "clear\na 3\na 3\no bj\nsave\nquit\n");

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "3 3 0\n17 0\n");
        assert!(err.is_empty());
    }

    #[test]
    fn quitting_without_save_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");

        run_editor(&path, "clear\na k\nquit\n");

        assert!(!path.exists());
    }

    #[test]
    fn bad_input_reports_and_keeps_going() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");

        let (_out, err) = run_editor(&path, "clear\nr k\na zz\nfrob\nquit\n");

        let text = String::from_utf8(err).unwrap();
        assert!(text.contains("Error: no K in the Us hand to remove"));
        assert!(text.contains("unknown rank 'zz'"));
        assert!(text.contains("unrecognized command"));
    }

    #[test]
    fn exhausted_rank_warns_instead_of_adding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");

        let (_out, err) = run_editor(&path, "clear\na sj\no sj\nsave\nquit\n");

        let text = String::from_utf8(err).unwrap();
        assert!(text.contains("WARNING"));
        let saved = std::fs::read_to_string(&path).unwrap();
        assert_eq!(saved, "16 0\n0\n");
    }

    #[test]
    fn eof_behaves_like_quit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");

        run_editor(&path, "clear\n");

        assert!(!path.exists());
    }
}
