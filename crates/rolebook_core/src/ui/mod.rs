//! Console UI handlers.
//!
//! # Responsibility
//! - Prompt the operator for fields in a fixed order.
//! - Delegate to one service operation and print a confirmation.
//!
//! # Invariants
//! - Handlers never recover from service errors; they return them to the
//!   caller of `handle`.
//! - `relinquish_control` is a static per-handler answer.

use crate::model::EntityId;
use crate::service::ServiceError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

pub mod menu;
pub mod person;
pub mod role;
pub mod user;

pub use menu::{ExitUiHandler, MenuUiHandler};

pub type UiResult<T> = Result<T, UiError>;

#[derive(Debug)]
pub enum UiError {
    Io(io::Error),
    /// Input stream reached end of file.
    InputClosed,
    InvalidInput(String),
    Service(ServiceError),
}

impl Display for UiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "console i/o failed: {err}"),
            Self::InputClosed => write!(f, "input closed"),
            Self::InvalidInput(message) => write!(f, "{message}"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Service(err) => Some(err),
            Self::InputClosed | Self::InvalidInput(_) => None,
        }
    }
}

impl From<io::Error> for UiError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ServiceError> for UiError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

/// Line-oriented operator console.
pub trait Console {
    /// Prints `prompt` without a newline and reads one line of input.
    fn read_line(&mut self, prompt: &str) -> UiResult<String>;
    fn write_line(&mut self, line: &str) -> UiResult<()>;
}

/// `Console` over any buffered reader and writer.
pub struct StdConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> UiResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(UiError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn write_line(&mut self, line: &str) -> UiResult<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }
}

/// One operator action reachable from a menu.
pub trait UiHandler {
    /// Label shown in the enclosing menu.
    fn operation_name(&self) -> &str;

    /// Runs the action against `console`.
    fn handle(&self, console: &mut dyn Console) -> UiResult<()>;

    /// Whether the enclosing menu keeps running after this handler completes.
    fn relinquish_control(&self) -> bool;
}

pub(crate) fn read_id(console: &mut dyn Console, prompt: &str) -> UiResult<EntityId> {
    let raw = console.read_line(prompt)?;
    raw.trim()
        .parse::<EntityId>()
        .map_err(|_| UiError::InvalidInput(format!("\"{}\" is not a valid ID.", raw.trim())))
}

/// Splits a comma separated list, dropping blank entries.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
