//! Terminal output: record listings, cache summaries and outcome lines.
//!
//! Listings go to stdout and are dropped by `--quiet`, except JSON which
//! scripts depend on. Outcome lines from the data layer go to stderr.

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use console::Term;
use owo_colors::OwoColorize;

use fedhub_core::application::ports::{Notifier, Outcome, Severity};
use fedhub_core::prelude::{CollectionSummary, DataSource};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    no_color: bool,
    stdout: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // --output-format beats output.format from the config; Auto is then
        // settled by whether stdout is a terminal.
        let chosen = match args.output_format {
            OutputFormat::Auto => {
                OutputFormat::from_str(&config.output.format, true).unwrap_or(OutputFormat::Auto)
            }
            explicit => explicit,
        };
        let format = match chosen {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || format == OutputFormat::Plain,
            stdout: Term::stdout(),
        }
    }

    /// Never [`OutputFormat::Auto`].
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn print(&self, line: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout.write_line(line)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.no_color {
            self.print(text)
        } else {
            self.print(&text.cyan().bold().to_string())
        }
    }

    pub fn warning(&self, text: &str) -> io::Result<()> {
        if self.no_color {
            self.print(&format!("! {text}"))
        } else {
            self.print(&format!("{} {}", "!".yellow().bold(), text.yellow()))
        }
    }

    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.stdout.write_line(&text)
    }

    /// Outcome reporter sharing this manager's quiet and color settings.
    pub fn notifier(&self) -> ConsoleNotifier {
        ConsoleNotifier {
            quiet: self.quiet,
            no_color: self.no_color,
            stderr: Term::stderr(),
        }
    }

    /// One aligned row per collection; fallback rows are highlighted.
    pub fn summary_table(&self, summaries: &[CollectionSummary]) -> io::Result<()> {
        let width = summaries
            .iter()
            .map(|s| s.collection.as_str().len())
            .max()
            .unwrap_or(0);

        for s in summaries {
            let mut row = format!(
                "{:<width$}  {:>4}  {:<7} {:<7} {}",
                s.collection.as_str(),
                s.count,
                s.status.as_str(),
                s.freshness.as_str(),
                s.source.as_str(),
            );
            if let Some(error) = &s.error {
                row.push_str(&format!("  ({error})"));
            }
            if s.source == DataSource::Fallback && !self.no_color {
                row = row.yellow().to_string();
            }
            self.print(&row)?;
        }
        Ok(())
    }
}

pub fn summary_json(summary: &CollectionSummary) -> serde_json::Value {
    serde_json::json!({
        "collection": summary.collection.as_str(),
        "status": summary.status.as_str(),
        "freshness": summary.freshness.as_str(),
        "source": summary.source.as_str(),
        "count": summary.count,
        "error": summary.error,
    })
}

/// Writes each mutation outcome as one line on stderr.
///
/// Quiet mode drops successes only; a failed write must stay visible.
pub struct ConsoleNotifier {
    quiet: bool,
    no_color: bool,
    stderr: Term,
}

impl ConsoleNotifier {
    fn render(&self, outcome: &Outcome) -> String {
        let mark = match outcome.severity {
            Severity::Success => "\u{2713}",
            Severity::Destructive => "\u{2717}",
        };
        let head = format!("{mark} {}:", outcome.title);
        if self.no_color {
            return format!("{head} {}", outcome.description);
        }
        let head = match outcome.severity {
            Severity::Success => head.green().bold().to_string(),
            Severity::Destructive => head.red().bold().to_string(),
        };
        format!("{head} {}", outcome.description)
    }
}

impl Notifier for ConsoleNotifier {
    fn report(&self, outcome: Outcome) {
        tracing::debug!(title = %outcome.title, severity = ?outcome.severity, "outcome");
        if self.quiet && outcome.severity == Severity::Success {
            return;
        }
        let _ = self.stderr.write_line(&self.render(&outcome));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fedhub_core::prelude::{CacheStatus, Collection, Freshness};

    fn manager(quiet: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color: false,
            config: None,
            data_dir: None,
            output_format: format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn plain_format_turns_color_off() {
        let out = manager(false, OutputFormat::Plain);
        assert_eq!(out.format(), OutputFormat::Plain);
        assert!(out.no_color);
    }

    #[test]
    fn explicit_format_beats_config() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            data_dir: None,
            output_format: OutputFormat::Json,
        };
        let mut config = AppConfig::default();
        config.output.format = "plain".into();

        assert_eq!(OutputManager::new(&args, &config).format(), OutputFormat::Json);
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            data_dir: None,
            output_format: OutputFormat::Auto,
        };
        let mut config = AppConfig::default();
        config.output.format = "json".into();

        assert_eq!(OutputManager::new(&args, &config).format(), OutputFormat::Json);
    }

    #[test]
    fn quiet_print_is_a_no_op() {
        assert!(manager(true, OutputFormat::Plain).print("hidden").is_ok());
    }

    #[test]
    fn plain_outcome_line() {
        let notifier = manager(false, OutputFormat::Plain).notifier();
        let line = notifier.render(&Outcome::destructive("Erro", "duplicate key"));
        assert_eq!(line, "\u{2717} Erro: duplicate key");
    }

    #[test]
    fn summary_json_uses_lowercase_names() {
        let summary = CollectionSummary {
            collection: Collection::RegionalAssociations,
            status: CacheStatus::Ready,
            freshness: Freshness::Stale,
            source: DataSource::Fallback,
            count: 2,
            error: Some("offline".into()),
        };
        let value = summary_json(&summary);
        assert_eq!(value["collection"], "regional_associations");
        assert_eq!(value["source"], "fallback");
        assert_eq!(value["count"], 2);
    }
}
