//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

use fedhub_core::domain::{Collection, View};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "fedhub",
    bin_name = "fedhub",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Federation data from the terminal",
    long_about = "fedhub reads and writes the federation's teams, games, news \
                  and the rest of its collections through the same cached, \
                  normalizing data layer the site uses.",
    after_help = "EXAMPLES:\n\
        \x20 fedhub --data-dir ./data list teams\n\
        \x20 fedhub create games --set home_team_id=t1 --set away_team_id=t2\n\
        \x20 fedhub update games g1 --set home_score=78 --set away_score=65 --set status=finalizado\n\
        \x20 fedhub status --view home",
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
    /// List the records of a collection.
    #[command(
        visible_alias = "ls",
        about = "List the records of a collection",
        after_help = "EXAMPLES:\n\
            \x20 fedhub list teams\n\
            \x20 fedhub list jogos --format json\n\
            \x20 fedhub list regional-associations --format ids"
    )]
    List(ListArgs),

    /// Create a record.
    #[command(
        visible_alias = "add",
        about = "Create a record",
        after_help = "EXAMPLES:\n\
            \x20 fedhub create teams --set name=\"CD Travadores\" --set island=Santiago\n\
            \x20 fedhub create news --json '{\"title\": \"Final Four\", \"status\": \"draft\"}'\n\
            \x20 fedhub create players --json @player.json"
    )]
    Create(CreateArgs),

    /// Update fields of a record.
    #[command(
        about = "Update fields of a record",
        after_help = "EXAMPLES:\n\
            \x20 fedhub update games g1 --set home_score=78 --set away_score=65 --set status=finalizado"
    )]
    Update(UpdateArgs),

    /// Delete a record.
    #[command(visible_alias = "rm", about = "Delete a record")]
    Delete(DeleteArgs),

    /// Show cache state per collection.
    #[command(
        about = "Load collections and show their state",
        after_help = "EXAMPLES:\n\
            \x20 fedhub status\n\
            \x20 fedhub status --view games\n\
            \x20 fedhub status teams news"
    )]
    Status(StatusArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 fedhub completions bash > ~/.local/share/bash-completion/completions/fedhub\n\
            \x20 fedhub completions zsh  > ~/.zfunc/_fedhub\n\
            \x20 fedhub completions fish > ~/.config/fish/completions/fedhub.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the fedhub configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 fedhub config get data.dir\n\
            \x20 fedhub config list\n\
            \x20 fedhub config path"
    )]
    Config(ConfigCommands),
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `fedhub list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Collection to list.
    #[arg(value_name = "COLLECTION", value_parser = parse_collection)]
    pub collection: Collection,

    /// Show at most this many records.
    #[arg(short = 'n', long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    Ids,
    /// JSON array of canonical records.
    Json,
}

// ── create / update / delete ──────────────────────────────────────────────────

/// Record fields given on the command line.
#[derive(Debug, Args)]
pub struct FieldArgs {
    /// Set one field (repeatable). Values are read as JSON when they parse,
    /// otherwise as text: `home_score=78`, `featured=true`, `name=Derby`.
    #[arg(
        short = 's',
        long = "set",
        value_name = "FIELD=VALUE",
        value_parser = parse_assignment,
        conflicts_with = "json"
    )]
    pub set: Vec<(String, String)>,

    /// The whole record as a JSON object, or `@path` to read it from a file.
    #[arg(long = "json", value_name = "JSON")]
    pub json: Option<String>,
}

/// Arguments for `fedhub create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(value_name = "COLLECTION", value_parser = parse_collection)]
    pub collection: Collection,

    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Arguments for `fedhub update`.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[arg(value_name = "COLLECTION", value_parser = parse_collection)]
    pub collection: Collection,

    /// Id of the record to update.
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Arguments for `fedhub delete`.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    #[arg(value_name = "COLLECTION", value_parser = parse_collection)]
    pub collection: Collection,

    /// Id of the record to delete.
    #[arg(value_name = "ID")]
    pub id: String,
}

// ── status ────────────────────────────────────────────────────────────────────

/// Arguments for `fedhub status`.
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Load the collections a view needs.
    #[arg(long = "view", value_name = "VIEW", value_parser = parse_view, conflicts_with = "collections")]
    pub view: Option<View>,

    /// Collections to load (all when omitted).
    #[arg(value_name = "COLLECTION", value_parser = parse_collection)]
    pub collections: Vec<Collection>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `fedhub completions`.
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

/// Subcommands for `fedhub config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `cache.short_secs`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── value parsers ─────────────────────────────────────────────────────────────

fn parse_collection(s: &str) -> Result<Collection, String> {
    s.parse::<Collection>().map_err(|e| e.to_string())
}

fn parse_view(s: &str) -> Result<View, String> {
    s.parse::<View>().map_err(|e| e.to_string())
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got '{s}'")),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
