//! `folio build` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use super::{CommonArgs, load_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output directory for rendered pages (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or loading fails, or if any page
    /// could not be rendered or written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.common.load_config(self.output_dir)?;
        let output_dir = &config.docs_resolved.output_dir;

        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!("Output: {}", output_dir.display()));

        let (site, mut failed) = load_site(&config, &output)?;
        let mut written = 0usize;

        for result in site.render_all() {
            let page = match result {
                Ok(page) => page,
                Err(e) => {
                    output.error(&format!("Error: {e}"));
                    failed += 1;
                    continue;
                }
            };

            for warning in &page.warnings {
                output.warning(&format!("Warning: {warning}"));
            }

            let path = page_output_path(output_dir, &page.url);
            if let Err(e) = write_page(&path, &page.html) {
                output.error(&format!("Error: failed to write {}: {e}", path.display()));
                failed += 1;
                continue;
            }
            tracing::info!(url = %page.url, path = %path.display(), "Wrote page");
            written += 1;
        }

        if failed > 0 {
            return Err(CliError::Build(format!(
                "{failed} page(s) failed, {written} written"
            )));
        }

        output.success(&format!("Built {written} page(s)"));
        Ok(())
    }
}

/// Output file for the page at `url`: `<output_dir>/<url>/index.html`.
fn page_output_path(output_dir: &Path, url: &str) -> PathBuf {
    let mut path = output_dir.to_path_buf();
    for segment in url.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.join("index.html")
}

fn write_page(path: &Path, html: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)
}
