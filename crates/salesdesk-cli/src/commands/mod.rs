//! Command handlers.  One module per top-level subcommand.

pub mod completions;
pub mod config;
pub mod department;
pub mod init;
pub mod seller;

use serde::Serialize;

use salesdesk_core::error::SalesdeskError;

pub use crate::cli::ListFormat;
use crate::{
    cli::{ListArgs, OutputFormat},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// `--format` if given, else JSON under `--output-format json`, else a table.
fn list_format(args: &ListArgs, output: &OutputManager) -> ListFormat {
    match (args.format, output.format()) {
        (Some(format), _) => format,
        (None, OutputFormat::Json) => ListFormat::Json,
        (None, _) => ListFormat::Table,
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        CliError::Core(SalesdeskError::Internal {
            message: format!("failed to encode JSON: {e}"),
        })
    })
}

/// Quote a CSV field when it contains a separator, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}
