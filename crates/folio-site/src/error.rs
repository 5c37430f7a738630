//! Error and warning types for page rendering and article loading.

use std::path::PathBuf;

/// Fatal error for a single page.
///
/// A failing page never stops other pages from rendering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// No title, no outline heading and no name to fall back on.
    #[error("Cannot resolve a title for {url}: no title export, no heading and no name")]
    UnresolvableTitle { url: String },
    /// Page not found in the site.
    #[error("Page not found: {0}")]
    PageNotFound(String),
}

/// Non-fatal diagnostic produced while rendering a page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Warning {
    /// `date` export present but not a `YYYY-MM-DD` calendar date.
    #[error("Malformed date {value:?} in {url}; the date is omitted")]
    MalformedDate { url: String, value: String },
}

/// Error loading articles from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// I/O error reading a source file.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Front matter is not valid YAML for the export fields.
    #[error("Invalid front matter in {}: {source}", path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
