//! Line-oriented operator console driving an annotation session
//!
//! Each input line is one operator action. After every action the console
//! reports notices, reprints the image status when the image changes, and
//! rewrites the preview PNG when one is configured.

use crate::io::error::{DatasetError, Result};
use crate::io::image::save_image;
use crate::session::controller::SessionController;
use crate::session::region::CanvasPoint;
use crate::session::state::{Notice, SessionEvent};
use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;

const USAGE: &str = "\
commands:
  down X Y | drag X Y | up X Y   pointer events on the 640x640 canvas
  box X1 Y1 X2 Y2                draw a whole box in one step
  label TEXT                     set the label text (\\n for a line break)
  save                           save the drawn box with the label
  undo                           remove the last saved box
  next                           write this image's boxes and move on
  show                           print the current image again
  help                           print this message
  quit                           stop without writing the current image";

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Session events to apply in order
    Events(Vec<SessionEvent>),
    /// Reprint the current status
    Show,
    /// Print the command list
    Help,
    /// End the session
    Quit,
}

/// A console line that could not be understood
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    /// Why the line was rejected
    pub reason: String,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (type 'help' for commands)", self.reason)
    }
}

fn command_error(reason: impl Into<String>) -> CommandError {
    CommandError {
        reason: reason.into(),
    }
}

/// Parse one console line
///
/// Blank lines parse to an empty event list.
///
/// # Errors
///
/// Returns a [`CommandError`] for unknown commands or malformed coordinates
pub fn parse_command(line: &str) -> std::result::Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    let (keyword, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));

    match keyword {
        "" => Ok(Command::Events(Vec::new())),
        "down" => Ok(Command::Events(vec![SessionEvent::PointerDown(point(rest)?)])),
        "drag" => Ok(Command::Events(vec![SessionEvent::PointerDrag(point(rest)?)])),
        "up" => Ok(Command::Events(vec![SessionEvent::PointerUp(point(rest)?)])),
        "box" => {
            let [x1, y1, x2, y2] = coordinates::<4>(rest)?;
            let end = CanvasPoint::new(x2, y2);
            Ok(Command::Events(vec![
                SessionEvent::PointerDown(CanvasPoint::new(x1, y1)),
                SessionEvent::PointerDrag(end),
                SessionEvent::PointerUp(end),
            ]))
        }
        "label" => Ok(Command::Events(vec![SessionEvent::EditLabel(
            rest.replace("\\n", "\n"),
        )])),
        "save" => bare(rest, Command::Events(vec![SessionEvent::SaveRegion])),
        "undo" => bare(rest, Command::Events(vec![SessionEvent::UndoRegion])),
        "next" => bare(rest, Command::Events(vec![SessionEvent::Advance])),
        "show" => bare(rest, Command::Show),
        "help" => bare(rest, Command::Help),
        "quit" | "exit" => bare(rest, Command::Quit),
        other => Err(command_error(format!("unknown command '{other}'"))),
    }
}

fn bare(rest: &str, command: Command) -> std::result::Result<Command, CommandError> {
    if rest.trim().is_empty() {
        Ok(command)
    } else {
        Err(command_error(format!("unexpected arguments '{}'", rest.trim())))
    }
}

fn point(rest: &str) -> std::result::Result<CanvasPoint, CommandError> {
    let [x, y] = coordinates::<2>(rest)?;
    Ok(CanvasPoint::new(x, y))
}

fn coordinates<const N: usize>(rest: &str) -> std::result::Result<[i32; N], CommandError> {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    if parts.len() != N {
        return Err(command_error(format!(
            "expected {N} coordinates, got {}",
            parts.len()
        )));
    }

    let mut values = [0; N];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|err| command_error(format!("'{part}' is not a pixel coordinate: {err}")))?;
    }
    Ok(values)
}

/// How an operator session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Every queued image was handled
    Completed,
    /// The operator quit or input ended first
    Interrupted,
}

/// Outcome of a console run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Why the loop stopped
    pub end: SessionEnd,
    /// Images written to disk during the run
    pub persisted_images: usize,
}

/// Reads operator commands and reports session state
pub struct OperatorConsole<R, W> {
    input: R,
    output: W,
    preview: Option<PathBuf>,
}

impl<R: BufRead, W: Write> OperatorConsole<R, W> {
    /// Create a console over an input and output stream
    ///
    /// When `preview` is set, the outlined canvas is written there after
    /// every action.
    pub const fn new(input: R, output: W, preview: Option<PathBuf>) -> Self {
        Self {
            input,
            output,
            preview,
        }
    }

    /// Consume the console, returning the output stream
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the session until the queue is exhausted, the operator quits, or
    /// input ends
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails, an image cannot be loaded, or
    /// the console streams fail; the session halts
    pub fn run(&mut self, controller: &mut SessionController) -> Result<SessionSummary> {
        let notice = controller.start()?;
        self.report(notice)?;
        if controller.session().is_finished() {
            return Ok(Self::summary(SessionEnd::Completed, controller));
        }
        self.show(controller)?;
        self.write_preview(controller)?;

        let mut line = String::new();
        loop {
            self.prompt()?;
            line.clear();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|source| DatasetError::Console { source })?;
            if read == 0 {
                log::info!("Operator input closed");
                return Ok(Self::summary(SessionEnd::Interrupted, controller));
            }

            let events = match parse_command(&line) {
                Ok(Command::Events(events)) => events,
                Ok(Command::Show) => {
                    self.show(controller)?;
                    continue;
                }
                Ok(Command::Help) => {
                    self.say(format_args!("{USAGE}"))?;
                    continue;
                }
                Ok(Command::Quit) => {
                    if !controller.session().regions().is_empty() {
                        self.say(format_args!(
                            "info: {} unsaved box(es) on this image were discarded",
                            controller.session().regions().len()
                        ))?;
                    }
                    return Ok(Self::summary(SessionEnd::Interrupted, controller));
                }
                Err(err) => {
                    self.say(format_args!("warning: {err}"))?;
                    continue;
                }
            };
            if events.is_empty() {
                continue;
            }

            let before = controller.session().current_index();
            for event in events {
                let notice = controller.dispatch(event)?;
                self.report(notice)?;
            }

            if controller.session().is_finished() {
                return Ok(Self::summary(SessionEnd::Completed, controller));
            }
            if controller.session().current_index() != before {
                self.show(controller)?;
            }
            self.write_preview(controller)?;
        }
    }

    fn summary(end: SessionEnd, controller: &SessionController) -> SessionSummary {
        SessionSummary {
            end,
            persisted_images: controller.persisted_images(),
        }
    }

    fn report(&mut self, notice: Option<Notice>) -> Result<()> {
        match notice {
            Some(Notice::Rejected(error)) => self.say(format_args!("warning: {error}")),
            Some(Notice::Complete) => self.say(format_args!("done: All images have been annotated!")),
            None => Ok(()),
        }
    }

    fn show(&mut self, controller: &SessionController) -> Result<()> {
        let Some(status) = controller.status() else {
            return Ok(());
        };
        self.say(format_args!(
            "Current Image: {} | {} images left",
            status.file_name, status.remaining
        ))?;
        self.say(format_args!("Prescription: {}", status.prescription))
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.output, "> ")
            .and_then(|()| self.output.flush())
            .map_err(|source| DatasetError::Console { source })
    }

    fn say(&mut self, message: fmt::Arguments<'_>) -> Result<()> {
        writeln!(self.output, "{message}").map_err(|source| DatasetError::Console { source })
    }

    fn write_preview(&self, controller: &SessionController) -> Result<()> {
        let (Some(path), Some(preview)) = (&self.preview, controller.preview()) else {
            return Ok(());
        };
        save_image(&preview, path)
    }
}
