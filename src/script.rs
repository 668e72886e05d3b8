//! Line-oriented command scripts for driving an editor session headlessly.
//!
//! One command per line; blank lines and `#` comments are skipped. Pointer
//! commands take cell coordinates and are translated to surface pixels
//! through the session's cell metrics, so scripts behave exactly like a
//! pointer hitting the cell centers.
//!
//! ```text
//! mode line
//! drag 0 0 3 3
//! flip-h
//! commit
//! ```

use crate::grid::ColorIndex;
use crate::input::{Dispatch, ERASER_BUTTON, EditorState, InputMode, PRIMARY_BUTTON, PointerEvent};
use log::debug;
use std::str::FromStr;
use thiserror::Error;

/// Parse failure for a single script line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

/// One scripted editor operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Mode(InputMode),
    Color(ColorIndex),
    /// Press at a cell; `erase` uses the eraser button mask
    Down { x: usize, y: usize, erase: bool },
    Move { x: usize, y: usize },
    Up { x: usize, y: usize },
    Cancel,
    Enter,
    Leave,
    Tap { x: usize, y: usize },
    /// Press, move and release in one step
    Drag { from: (usize, usize), to: (usize, usize) },
    FlipHorizontal,
    FlipVertical,
    Translate { dx: i32, dy: i32 },
    Rotate { counter_clockwise: bool },
    Invert,
    Undo,
    Redo,
    Clear,
    /// Flush pending edits into history
    Commit,
    Resize { width: usize, height: usize },
}

fn arg<T: FromStr>(args: &[&str], index: usize, what: &str) -> Result<T, String> {
    let raw = args
        .get(index)
        .ok_or_else(|| format!("missing {what}"))?;
    raw.parse()
        .map_err(|_| format!("invalid {what} '{raw}'"))
}

fn expect_args(name: &str, args: &[&str], count: usize) -> Result<(), String> {
    if args.len() != count {
        return Err(format!(
            "'{name}' takes {count} argument(s), got {}",
            args.len()
        ));
    }
    Ok(())
}

impl FromStr for ScriptCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or("empty command")?;
        let args: Vec<&str> = words.collect();

        let command = match name {
            "mode" => {
                expect_args(name, &args, 1)?;
                ScriptCommand::Mode(args[0].parse()?)
            }
            "color" => {
                expect_args(name, &args, 1)?;
                ScriptCommand::Color(arg(&args, 0, "color index")?)
            }
            "down" => {
                let erase = match args.get(2) {
                    None => false,
                    Some(&"erase") => true,
                    Some(other) => return Err(format!("unexpected '{other}' after down")),
                };
                if args.len() > 3 {
                    return Err("'down' takes at most 3 arguments".to_string());
                }
                ScriptCommand::Down {
                    x: arg(&args, 0, "x")?,
                    y: arg(&args, 1, "y")?,
                    erase,
                }
            }
            "move" | "up" | "tap" => {
                expect_args(name, &args, 2)?;
                let x = arg(&args, 0, "x")?;
                let y = arg(&args, 1, "y")?;
                match name {
                    "move" => ScriptCommand::Move { x, y },
                    "up" => ScriptCommand::Up { x, y },
                    _ => ScriptCommand::Tap { x, y },
                }
            }
            "drag" => {
                expect_args(name, &args, 4)?;
                ScriptCommand::Drag {
                    from: (arg(&args, 0, "x")?, arg(&args, 1, "y")?),
                    to: (arg(&args, 2, "x")?, arg(&args, 3, "y")?),
                }
            }
            "translate" => {
                expect_args(name, &args, 2)?;
                ScriptCommand::Translate {
                    dx: arg(&args, 0, "dx")?,
                    dy: arg(&args, 1, "dy")?,
                }
            }
            "rotate" => {
                let counter_clockwise = match args.as_slice() {
                    [] | ["cw"] => false,
                    ["ccw"] => true,
                    _ => return Err("'rotate' takes 'cw' or 'ccw'".to_string()),
                };
                ScriptCommand::Rotate { counter_clockwise }
            }
            "resize" => {
                expect_args(name, &args, 2)?;
                ScriptCommand::Resize {
                    width: arg(&args, 0, "width")?,
                    height: arg(&args, 1, "height")?,
                }
            }
            _ => {
                let command = match name {
                    "cancel" => ScriptCommand::Cancel,
                    "enter" => ScriptCommand::Enter,
                    "leave" => ScriptCommand::Leave,
                    "flip-h" => ScriptCommand::FlipHorizontal,
                    "flip-v" => ScriptCommand::FlipVertical,
                    "invert" => ScriptCommand::Invert,
                    "undo" => ScriptCommand::Undo,
                    "redo" => ScriptCommand::Redo,
                    "clear" => ScriptCommand::Clear,
                    "commit" => ScriptCommand::Commit,
                    _ => return Err(format!("unknown command '{name}'")),
                };
                expect_args(name, &args, 0)?;
                command
            }
        };
        Ok(command)
    }
}

/// Parses a whole script, skipping blank lines and `#` comments.
pub fn parse_script(source: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let text = raw.split('#').next().unwrap_or_default().trim();
            (!text.is_empty()).then_some((index + 1, text))
        })
        .map(|(line, text)| {
            text.parse::<ScriptCommand>()
                .map_err(|message| ScriptError { line, message })
        })
        .collect()
}

/// Applies one command to the session.
///
/// # Errors
/// Fails when the editor rejects the operation (unknown color, zero resize).
pub fn apply(editor: &mut EditorState, command: &ScriptCommand) -> anyhow::Result<()> {
    let metrics = editor.metrics();
    let primary = |x, y| PointerEvent::at_cell(metrics, x, y, PRIMARY_BUTTON);

    let dispatch = match *command {
        ScriptCommand::Mode(mode) => {
            editor.set_input_mode(mode);
            None
        }
        ScriptCommand::Color(index) => {
            editor.set_color(index)?;
            None
        }
        ScriptCommand::Down { x, y, erase } => {
            let buttons = if erase { ERASER_BUTTON } else { PRIMARY_BUTTON };
            Some(editor.pointer_down(&PointerEvent::at_cell(metrics, x, y, buttons)))
        }
        ScriptCommand::Move { x, y } => Some(editor.pointer_move(&primary(x, y))),
        ScriptCommand::Up { x, y } => Some(editor.pointer_up(&primary(x, y))),
        ScriptCommand::Cancel => {
            editor.pointer_cancel();
            None
        }
        ScriptCommand::Enter => {
            editor.pointer_enter();
            None
        }
        ScriptCommand::Leave => {
            editor.pointer_leave();
            None
        }
        ScriptCommand::Tap { x, y } => {
            editor.pointer_down(&primary(x, y));
            Some(editor.pointer_up(&primary(x, y)))
        }
        ScriptCommand::Drag { from, to } => {
            editor.pointer_down(&primary(from.0, from.1));
            editor.pointer_move(&primary(to.0, to.1));
            Some(editor.pointer_up(&primary(to.0, to.1)))
        }
        ScriptCommand::FlipHorizontal => {
            editor.flip_horizontal();
            None
        }
        ScriptCommand::FlipVertical => {
            editor.flip_vertical();
            None
        }
        ScriptCommand::Translate { dx, dy } => {
            editor.translate(dx, dy);
            None
        }
        ScriptCommand::Rotate { counter_clockwise } => {
            editor.rotate(counter_clockwise);
            None
        }
        ScriptCommand::Invert => {
            editor.invert();
            None
        }
        ScriptCommand::Undo => {
            editor.undo();
            None
        }
        ScriptCommand::Redo => {
            editor.redo();
            None
        }
        ScriptCommand::Clear => {
            editor.clear();
            None
        }
        ScriptCommand::Commit => {
            editor.flush_history();
            None
        }
        ScriptCommand::Resize { width, height } => {
            editor.resize(width, height)?;
            None
        }
    };

    if let Some(Dispatch::Suppressed) = dispatch {
        debug!("{:?} suppressed", command);
    }
    Ok(())
}

/// Renders the grid as text, one row per line. Background is `.`, other
/// indices print as base-36 digits.
pub fn render_rows(editor: &EditorState) -> String {
    let mut out = String::new();
    for row in editor.grid().to_rows() {
        let line: String = row
            .iter()
            .map(|&color| match color {
                0 => '.',
                other => char::from_digit(other, 36).unwrap_or('?'),
            })
            .collect();
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::EditorOptions;

    fn editor(width: usize, height: usize) -> EditorState {
        EditorState::new(EditorOptions {
            width,
            height,
            ..EditorOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn parses_commands_and_skips_comments() {
        let commands = parse_script(
            "# setup\nmode rectangle-outline\n\ndrag 0 0 2 2  # box\nrotate ccw\ndown 1 1 erase\n",
        )
        .unwrap();
        assert_eq!(
            commands,
            vec![
                ScriptCommand::Mode(InputMode::RectangleOutline),
                ScriptCommand::Drag {
                    from: (0, 0),
                    to: (2, 2)
                },
                ScriptCommand::Rotate {
                    counter_clockwise: true
                },
                ScriptCommand::Down {
                    x: 1,
                    y: 1,
                    erase: true
                },
            ]
        );
    }

    #[test]
    fn reports_line_numbers_for_bad_input() {
        let err = parse_script("tap 1 1\n\ntap 1\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.to_string().starts_with("line 3:"));

        let err = parse_script("paint 1 1").unwrap_err();
        assert!(err.message.contains("unknown command"));
        assert!(parse_script("mode lasso").is_err());
        assert!(parse_script("translate 1 x").is_err());
    }

    #[test]
    fn unknown_commands_are_named_before_arity_is_checked() {
        assert_eq!(
            "paint 1 1".parse::<ScriptCommand>(),
            Err("unknown command 'paint'".to_string())
        );
        assert_eq!(
            "fill".parse::<ScriptCommand>(),
            Err("unknown command 'fill'".to_string())
        );
        assert_eq!(
            "undo 2".parse::<ScriptCommand>(),
            Err("'undo' takes 0 argument(s), got 1".to_string())
        );
        assert_eq!("redo".parse::<ScriptCommand>(), Ok(ScriptCommand::Redo));
    }

    #[test]
    fn applies_rectangle_and_renders_rows() {
        let mut session = editor(5, 5);
        for command in parse_script("mode rectangle\ndrag 1 1 2 3").unwrap() {
            apply(&mut session, &command).unwrap();
        }
        assert_eq!(render_rows(&session), ".....\n.11..\n.11..\n.11..\n.....\n");
    }

    #[test]
    fn editor_errors_propagate() {
        let mut session = editor(3, 3);
        assert!(apply(&mut session, &ScriptCommand::Color(7)).is_err());
        assert!(
            apply(
                &mut session,
                &ScriptCommand::Resize {
                    width: 0,
                    height: 2
                }
            )
            .is_err()
        );
    }
}
