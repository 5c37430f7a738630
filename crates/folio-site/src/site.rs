//! Site assembly and page rendering.
//!
//! A [`Site`] owns every parsed [`Article`] and renders each one into a full
//! HTML page:
//!
//! 1. metadata is resolved from the article's exports and outline;
//! 2. the body is composed (head tags, date decoration, highlighting);
//! 3. the composed page is wrapped in the HTML shell with the navigation
//!    list for that page.
//!
//! The navigation listing is computed once when the site is built, so title
//! and date diagnostics for listed documents are not repeated per page.
//!
//! # Example
//!
//! ```
//! use folio_site::{Site, SiteInfo, parse_article};
//!
//! let article = parse_article("# Hello\n\nWorld\n", "/articles/hello", "hello").unwrap();
//! let site = Site::new(vec![article], SiteInfo::default());
//!
//! let page = site.render("/articles/hello").unwrap();
//! assert_eq!(page.metadata.title, "Hello");
//! assert!(page.html.contains("aria-current=\"page\""));
//! ```

use rayon::prelude::*;

use crate::document::Document;
use crate::error::{RenderError, Warning};
use crate::layout::{SiteInfo, compose};
use crate::metadata::PageMetadata;
use crate::navigation::{self, DEFAULT_PREFIX, NavEntry};
use crate::shell::render_page;
use crate::tree::Node;

/// A parsed article: its document record plus body tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Article {
    pub document: Document,
    pub body: Vec<Node>,
}

/// Result of rendering one page.
#[derive(Clone, Debug)]
pub struct RenderedPage {
    /// URL path of the page.
    pub url: String,
    /// Complete HTML document.
    pub html: String,
    /// Metadata the page was rendered with.
    pub metadata: PageMetadata,
    /// Non-fatal diagnostics (e.g. a malformed date).
    pub warnings: Vec<Warning>,
}

/// A collection of articles rendered with shared site settings.
#[derive(Debug)]
pub struct Site {
    articles: Vec<Article>,
    info: SiteInfo,
    nav_prefix: String,
    listing: Vec<NavEntry>,
}

impl Site {
    /// Build a site using the default navigation prefix.
    #[must_use]
    pub fn new(articles: Vec<Article>, info: SiteInfo) -> Self {
        Self::with_nav_prefix(articles, info, DEFAULT_PREFIX)
    }

    /// Build a site listing documents under `prefix` in its navigation.
    #[must_use]
    pub fn with_nav_prefix(articles: Vec<Article>, info: SiteInfo, prefix: &str) -> Self {
        let listing = navigation::listing(articles.iter().map(|a| &a.document), prefix);
        tracing::debug!(
            articles = articles.len(),
            listed = listing.len(),
            prefix,
            "Built site"
        );
        Self {
            articles,
            info,
            nav_prefix: prefix.to_owned(),
            listing,
        }
    }

    #[must_use]
    pub fn info(&self) -> &SiteInfo {
        &self.info
    }

    #[must_use]
    pub fn nav_prefix(&self) -> &str {
        &self.nav_prefix
    }

    #[must_use]
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Look up an article by URL.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.document.url == url)
    }

    /// Navigation list with the entry for `current_url` marked current.
    #[must_use]
    pub fn navigation(&self, current_url: &str) -> Vec<NavEntry> {
        let mut entries = self.listing.clone();
        navigation::mark_current(&mut entries, current_url);
        entries
    }

    /// Render the page at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::PageNotFound`] if no article has that URL, or
    /// [`RenderError::UnresolvableTitle`] if the article has no usable title.
    pub fn render(&self, url: &str) -> Result<RenderedPage, RenderError> {
        let article = self
            .get(url)
            .ok_or_else(|| RenderError::PageNotFound(url.to_owned()))?;
        self.render_article(article)
    }

    /// Render every article in parallel.
    ///
    /// Each result is independent: a page that fails does not affect the
    /// others. Results follow article order.
    #[must_use]
    pub fn render_all(&self) -> Vec<Result<RenderedPage, RenderError>> {
        self.articles
            .par_iter()
            .map(|article| self.render_article(article))
            .collect()
    }

    fn render_article(&self, article: &Article) -> Result<RenderedPage, RenderError> {
        let resolved = PageMetadata::resolve(&article.document)?;
        let page = compose(article.body.clone(), &resolved.metadata, &self.info);
        let navigation = self.navigation(&article.document.url);
        let html = render_page(&page, &navigation, &self.info);

        Ok(RenderedPage {
            url: article.document.url.clone(),
            html,
            metadata: resolved.metadata,
            warnings: resolved.warnings,
        })
    }
}
