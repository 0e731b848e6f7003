//! Terminal host for the record forms.
//!
//! [`TerminalWindow`] is the window a form runs in: closing it ends the
//! edit loop, alerts are printed. [`Prompter`] asks for field values with
//! dialoguer when the `interactive` feature is built and both ends are a TTY.

use std::cell::Cell;

use tracing::warn;

use salesdesk_core::forms::{Alert, AlertKind, ErrorLabel, FormWindow, TextField};

use crate::{cli::GlobalArgs, error::CliResult, output::OutputManager};

/// A form window drawn on the terminal.
pub struct TerminalWindow<'a> {
    output: &'a OutputManager,
    closed: Cell<bool>,
}

impl<'a> TerminalWindow<'a> {
    pub fn new(output: &'a OutputManager) -> Self {
        Self {
            output,
            closed: Cell::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

impl FormWindow for TerminalWindow<'_> {
    fn close(&self) {
        self.closed.set(true);
    }

    fn show_alert(&self, alert: &Alert) {
        let mut lines = vec![alert.title.clone()];
        lines.extend(alert.header.clone());
        lines.push(format!("  {}", alert.content));

        for line in &lines {
            let written = match alert.kind {
                AlertKind::Error => self.output.error(line),
                AlertKind::Warning => self.output.warning(line),
                AlertKind::Information => self.output.info(line),
            };
            if let Err(e) = written {
                warn!(error = %e, "Failed to print alert");
            }
        }
    }
}

/// Print every non-empty error label as `label: message` and return the
/// same lines.
pub fn report_labels(output: &OutputManager, labels: &[(&str, &ErrorLabel)]) -> CliResult<Vec<String>> {
    let mut problems = Vec::new();
    for (name, label) in labels {
        if label.is_empty() {
            continue;
        }
        let line = format!("{}: {}", name, label.text());
        output.error(&line)?;
        problems.push(line);
    }
    Ok(problems)
}

/// Asks the user for form values.
#[derive(Debug, Clone, Copy)]
pub struct Prompter {
    enabled: bool,
}

impl Prompter {
    /// Prompting is on with the `interactive` feature, a TTY on stdin and
    /// stdout, and no `--no-input`.
    pub fn new(global: &GlobalArgs) -> Self {
        Self {
            enabled: cfg!(feature = "interactive") && !global.no_input && Self::has_tty(),
        }
    }

    /// A prompter that never asks.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn has_tty() -> bool {
        use std::io::IsTerminal as _;
        std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
    }

    /// Ask for a text value, offering `current` for editing.  Returns
    /// `current` unchanged when prompting is off.
    pub fn text(&self, label: &str, current: &str) -> CliResult<String> {
        if !self.enabled {
            return Ok(current.to_owned());
        }
        self.ask_text(label, current)
    }

    /// Ask the user to pick one of `items`.  Returns `current` unchanged
    /// when prompting is off or there is nothing to pick from.
    pub fn choose(&self, label: &str, items: &[String], current: Option<usize>) -> CliResult<Option<usize>> {
        if !self.enabled || items.is_empty() {
            return Ok(current);
        }
        self.ask_choice(label, items, current).map(Some)
    }

    /// Prompt until `field` accepts the answer.
    pub fn edit_field(&self, output: &OutputManager, label: &str, field: &mut TextField) -> CliResult<()> {
        loop {
            let answer = self.text(label, field.text())?;
            if field.set_text(answer) {
                return Ok(());
            }
            output.warning(&format!("{label}: value not accepted"))?;
        }
    }

    #[cfg(feature = "interactive")]
    fn ask_text(&self, label: &str, current: &str) -> CliResult<String> {
        use crate::error::IntoCli as _;

        dialoguer::Input::<String>::new()
            .with_prompt(label)
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()
            .with_cli_context(|| format!("Failed to read {label}"))
    }

    #[cfg(not(feature = "interactive"))]
    fn ask_text(&self, _label: &str, current: &str) -> CliResult<String> {
        Ok(current.to_owned())
    }

    #[cfg(feature = "interactive")]
    fn ask_choice(&self, label: &str, items: &[String], current: Option<usize>) -> CliResult<usize> {
        use crate::error::IntoCli as _;

        dialoguer::Select::new()
            .with_prompt(label)
            .items(items)
            .default(current.unwrap_or(0))
            .interact()
            .with_cli_context(|| format!("Failed to read {label}"))
    }

    #[cfg(not(feature = "interactive"))]
    fn ask_choice(&self, _label: &str, _items: &[String], current: Option<usize>) -> CliResult<usize> {
        Ok(current.unwrap_or(0))
    }
}
