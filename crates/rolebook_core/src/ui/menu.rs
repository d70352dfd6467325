//! Numbered menus and the exit action.

use super::{Console, UiError, UiHandler, UiResult};
use log::{error, info};

const CHOICE_PROMPT: &str = "Please enter your choice: ";

/// Menu that dispatches to child handlers until one declines control.
///
/// Child failures are reported to the operator and the menu keeps running;
/// closed input ends every enclosing menu.
pub struct MenuUiHandler<'a> {
    operation_name: String,
    options: Vec<Box<dyn UiHandler + 'a>>,
}

impl<'a> MenuUiHandler<'a> {
    pub fn new(operation_name: impl Into<String>) -> Self {
        Self {
            operation_name: operation_name.into(),
            options: Vec::new(),
        }
    }

    pub fn with(mut self, handler: impl UiHandler + 'a) -> Self {
        self.options.push(Box::new(handler));
        self
    }

    fn print_options(&self, console: &mut dyn Console) -> UiResult<()> {
        console.write_line("")?;
        console.write_line(&format!("== {} ==", self.operation_name))?;
        for (index, option) in self.options.iter().enumerate() {
            console.write_line(&format!("{}. {}", index + 1, option.operation_name()))?;
        }
        Ok(())
    }

    fn select(&self, choice: &str) -> Option<&(dyn UiHandler + 'a)> {
        let index = choice.trim().parse::<usize>().ok()?.checked_sub(1)?;
        self.options.get(index).map(|option| &**option)
    }
}

impl UiHandler for MenuUiHandler<'_> {
    fn operation_name(&self) -> &str {
        &self.operation_name
    }

    fn handle(&self, console: &mut dyn Console) -> UiResult<()> {
        loop {
            self.print_options(console)?;
            let choice = console.read_line(CHOICE_PROMPT)?;
            let Some(handler) = self.select(&choice) else {
                console.write_line(&format!("Invalid choice \"{}\".", choice.trim()))?;
                continue;
            };

            info!(
                "event=ui_dispatch module=ui status=start menu={} operation={}",
                self.operation_name,
                handler.operation_name()
            );
            match handler.handle(console) {
                Ok(()) => {
                    if !handler.relinquish_control() {
                        return Ok(());
                    }
                }
                Err(UiError::InputClosed) => return Err(UiError::InputClosed),
                Err(err) => {
                    error!(
                        "event=ui_dispatch module=ui status=error operation={} error={}",
                        handler.operation_name(),
                        err
                    );
                    console.write_line(&format!("Error: {err}"))?;
                }
            }
        }
    }

    fn relinquish_control(&self) -> bool {
        true
    }
}

/// Leaves the enclosing menu.
pub struct ExitUiHandler {
    operation_name: String,
}

impl ExitUiHandler {
    pub fn new(operation_name: impl Into<String>) -> Self {
        Self {
            operation_name: operation_name.into(),
        }
    }
}

impl UiHandler for ExitUiHandler {
    fn operation_name(&self) -> &str {
        &self.operation_name
    }

    fn handle(&self, _console: &mut dyn Console) -> UiResult<()> {
        Ok(())
    }

    fn relinquish_control(&self) -> bool {
        false
    }
}
