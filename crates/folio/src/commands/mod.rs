//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod nav;

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_site::{Site, SiteInfo, load_articles};

use crate::error::CliError;
use crate::output::Output;

pub(crate) use build::BuildArgs;
pub(crate) use nav::NavArgs;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Absolute site origin for social card URLs (overrides config).
    #[arg(long, env = "FOLIO_BASE_URL")]
    base_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load configuration with these arguments applied on top.
    pub(crate) fn load_config(&self, output_dir: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            output_dir,
            base_url: self.base_url.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Site settings taken from the `[site]` config section.
pub(crate) fn site_info(config: &Config) -> SiteInfo {
    SiteInfo {
        title: config.site.title.clone(),
        base_url: config.site.base_url.clone(),
        language: config.site.language.clone(),
    }
}

/// Load articles from the configured source directory into a site.
///
/// Files that fail to load are reported as warnings. Returns the site and
/// the number of failed files.
pub(crate) fn load_site(config: &Config, output: &Output) -> Result<(Site, usize), CliError> {
    let loaded = load_articles(&config.docs_resolved.source_dir)?;
    for error in &loaded.errors {
        output.warning(&format!("Warning: {error}"));
    }

    let site = Site::with_nav_prefix(
        loaded.articles,
        site_info(config),
        &config.navigation.prefix,
    );
    Ok((site, loaded.errors.len()))
}
