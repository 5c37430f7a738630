//! Article metadata, navigation and page composition for Folio.
//!
//! This crate provides:
//! - [`load_articles`]: discover and parse markdown articles on disk
//! - [`PageMetadata`]: title, date and description with fallbacks
//! - [`build_navigation`]: the date-ordered article list
//! - [`compose`]: head tags, date decoration and code highlighting
//! - [`Site`]: rendering pages into complete HTML documents
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use folio_site::{Site, SiteInfo, load_articles};
//!
//! let loaded = load_articles(Path::new("content"))?;
//! let site = Site::new(loaded.articles, SiteInfo::default());
//!
//! for page in site.render_all() {
//!     let page = page?;
//!     println!("{} ({} bytes)", page.url, page.html.len());
//! }
//! # Ok(())
//! # }
//! ```

mod document;
mod error;
mod layout;
mod loader;
mod markdown;
mod metadata;
mod navigation;
mod shell;
mod site;
mod tree;

pub use document::{Document, Exports, OutlineEntry};
pub use error::{LoadError, RenderError, Warning};
pub use layout::{ComposedPage, HeadTag, SiteInfo, compose};
pub use loader::{Loaded, load_articles};
pub use markdown::{parse_article, slugify};
pub use metadata::{DATE_FORMAT, PageMetadata, Resolved, format_date, parse_date};
pub use navigation::{DEFAULT_PREFIX, NavEntry, build_navigation, is_under_prefix};
pub use shell::{render_nodes, render_page};
pub use site::{Article, RenderedPage, Site};
pub use tree::Node;
