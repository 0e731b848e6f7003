//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "salesdesk",
    bin_name = "salesdesk",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Department and seller records from the terminal",
    long_about = "SalesDesk keeps the departments and sales staff of a store. \
                  Records are created and edited through validated forms.",
    after_help = "EXAMPLES:\n\
        \x20 salesdesk department add --name Books\n\
        \x20 salesdesk seller add --name 'Maria Green' --email maria@gmail.com --department 1\n\
        \x20 salesdesk seller list --format csv\n\
        \x20 salesdesk completions bash > /usr/share/bash-completion/completions/salesdesk",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create, edit, list and remove departments.
    #[command(
        visible_alias = "dep",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 salesdesk department add --name Books\n\
            \x20 salesdesk department edit 3 --name Comics\n\
            \x20 salesdesk department list --format json"
    )]
    Department(DepartmentCommands),

    /// Create, edit, list and remove sellers.
    #[command(
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 salesdesk seller add --name 'Bob Brown' --email bob@gmail.com \\\n\
            \x20     --birth-date 21/04/1998 --base-salary 1000 --department 2\n\
            \x20 salesdesk seller edit 1 --base-salary 1250.50\n\
            \x20 salesdesk seller remove 1"
    )]
    Seller(SellerCommands),

    /// Initialise a SalesDesk configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 salesdesk init                      # default location\n\
            \x20 salesdesk init --path ./salesdesk.toml\n\
            \x20 salesdesk init --force              # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 salesdesk completions bash > ~/.local/share/bash-completion/completions/salesdesk\n\
            \x20 salesdesk completions zsh  > ~/.zfunc/_salesdesk\n\
            \x20 salesdesk completions fish > ~/.config/fish/completions/salesdesk.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the SalesDesk configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 salesdesk config get storage.path\n\
            \x20 salesdesk config list"
    )]
    Config(ConfigCommands),
}

// ── department ────────────────────────────────────────────────────────────────

/// Subcommands for `salesdesk department`.
#[derive(Debug, Subcommand)]
pub enum DepartmentCommands {
    /// Create a department.
    #[command(visible_alias = "new")]
    Add(DepartmentFields),

    /// Edit an existing department.
    Edit {
        /// Id of the department to edit.
        #[arg(value_name = "ID")]
        id: i32,

        #[command(flatten)]
        fields: DepartmentFields,
    },

    /// List departments by name.
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Remove a department that has no sellers.
    #[command(visible_alias = "rm")]
    Remove {
        #[arg(value_name = "ID")]
        id: i32,
    },
}

/// Department form inputs.  Omitted values keep what the form shows.
#[derive(Debug, Default, Args)]
pub struct DepartmentFields {
    /// Department name.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Department name")]
    pub name: Option<String>,
}

// ── seller ────────────────────────────────────────────────────────────────────

/// Subcommands for `salesdesk seller`.
#[derive(Debug, Subcommand)]
pub enum SellerCommands {
    /// Create a seller.
    #[command(visible_alias = "new")]
    Add(SellerFields),

    /// Edit an existing seller.
    Edit {
        /// Id of the seller to edit.
        #[arg(value_name = "ID")]
        id: i32,

        #[command(flatten)]
        fields: SellerFields,
    },

    /// List sellers by name.
    #[command(visible_alias = "ls")]
    List(SellerListArgs),

    /// Remove a seller.
    #[command(visible_alias = "rm")]
    Remove {
        #[arg(value_name = "ID")]
        id: i32,
    },
}

/// Seller form inputs.  Omitted values keep what the form shows.
#[derive(Debug, Default, Args)]
pub struct SellerFields {
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Seller name")]
    pub name: Option<String>,

    #[arg(short = 'e', long = "email", value_name = "EMAIL", help = "E-mail address")]
    pub email: Option<String>,

    /// Birth date in the configured pattern (default `dd/mm/yyyy`).
    #[arg(
        short = 'b',
        long = "birth-date",
        value_name = "DATE",
        help = "Birth date, e.g. 21/04/1998"
    )]
    pub birth_date: Option<String>,

    #[arg(
        short = 's',
        long = "base-salary",
        value_name = "AMOUNT",
        help = "Base salary, e.g. 1250.50"
    )]
    pub base_salary: Option<String>,

    /// Id of the department to assign.
    #[arg(
        short = 'd',
        long = "department",
        value_name = "ID",
        help = "Department id (default: first department by name)"
    )]
    pub department: Option<i32>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for the `list` subcommands.
#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Output format.  Defaults to JSON under `--output-format json`,
    /// a table otherwise.
    #[arg(long = "format", value_enum, help = "Output format")]
    pub format: Option<ListFormat>,
}

/// Arguments for `salesdesk seller list`.
#[derive(Debug, Default, Args)]
pub struct SellerListArgs {
    /// Only sellers of this department.
    #[arg(
        short = 'd',
        long = "department",
        value_name = "ID",
        help = "Filter by department id"
    )]
    pub department: Option<i32>,

    #[command(flatten)]
    pub list: ListArgs,
}

/// Output format for the `list` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `salesdesk init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write the file here instead of the platform config directory.
    #[arg(long = "path", value_name = "FILE", help = "Where to write the config file")]
    pub path: Option<PathBuf>,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `salesdesk completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `salesdesk config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `storage.path`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
