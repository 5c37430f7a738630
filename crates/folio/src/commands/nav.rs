//! `folio nav` command implementation.

use std::io::{self, Write};

use clap::Args;
use folio_site::{NavEntry, format_date};

use super::{CommonArgs, load_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Mark the entry for this URL as current.
    #[arg(long)]
    current: Option<String>,

    /// Print the list as JSON.
    #[arg(long)]
    json: bool,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or loading fails, or stdout cannot
    /// be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config(None)?;
        let (site, _) = load_site(&config, &output)?;

        let entries = site.navigation(self.current.as_deref().unwrap_or_default());
        if entries.is_empty() {
            output.info(&format!("No articles under {}", site.nav_prefix()));
        }

        let mut stdout = io::stdout().lock();
        if self.json {
            serde_json::to_writer_pretty(&mut stdout, &entries)?;
            writeln!(stdout)?;
        } else {
            for entry in &entries {
                writeln!(stdout, "{}", format_entry(entry))?;
            }
        }
        Ok(())
    }
}

/// One plain-text line: marker, date column, title and URL.
fn format_entry(entry: &NavEntry) -> String {
    let marker = if entry.is_current { '*' } else { ' ' };
    let date = entry.date.map(format_date).unwrap_or_default();
    format!("{marker} {date:<20} {} ({})", entry.title, entry.url)
}

#[cfg(test)]
mod tests {
    use folio_site::parse_date;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_format_entry() {
        let entry = NavEntry {
            url: "/articles/hello".to_owned(),
            title: "Hello".to_owned(),
            date: parse_date("2025-06-15"),
            description: None,
            is_current: true,
        };
        assert_eq!(
            format_entry(&entry),
            "* June 15, 2025        Hello (/articles/hello)"
        );
    }

    #[test]
    fn test_format_undated_entry() {
        let entry = NavEntry {
            url: "/articles/x".to_owned(),
            title: "X".to_owned(),
            date: None,
            description: None,
            is_current: false,
        };
        assert_eq!(format_entry(&entry), format!("  {:<20} X (/articles/x)", ""));
    }
}
