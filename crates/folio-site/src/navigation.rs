//! Navigation list construction.
//!
//! The navigation panel lists every document under a collection prefix,
//! most recent first. Documents without a usable date sort after all dated
//! ones. Ties are broken by URL so the order is total and deterministic.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::document::Document;
use crate::metadata::PageMetadata;

/// Default collection prefix for article navigation.
pub const DEFAULT_PREFIX: &str = "/articles";

/// One row in the navigation list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_current: bool,
}

impl NavEntry {
    fn from_metadata(metadata: PageMetadata) -> Self {
        Self {
            url: metadata.url,
            title: metadata.title,
            date: metadata.date,
            description: metadata.description,
            is_current: false,
        }
    }
}

/// Build the navigation list for `current`.
///
/// Only documents strictly under `prefix` are listed. Documents whose title
/// cannot be resolved are skipped with a warning.
pub fn build_navigation<'a, I>(documents: I, current: &Document, prefix: &str) -> Vec<NavEntry>
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut entries = listing(documents, prefix);
    mark_current(&mut entries, &current.url);
    entries
}

/// Sorted navigation entries with no current entry marked.
pub fn listing<'a, I>(documents: I, prefix: &str) -> Vec<NavEntry>
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut entries: Vec<NavEntry> = documents
        .into_iter()
        .filter(|doc| is_under_prefix(&doc.url, prefix))
        .filter_map(|doc| match PageMetadata::derive(doc) {
            Ok(resolved) => Some(NavEntry::from_metadata(resolved.metadata)),
            Err(e) => {
                tracing::warn!(url = %doc.url, error = %e, "Skipping navigation entry");
                None
            }
        })
        .collect();

    entries.sort_by(compare_entries);
    entries
}

/// Set `is_current` on the entry for `url` and clear it everywhere else.
pub fn mark_current(entries: &mut [NavEntry], url: &str) {
    for entry in entries {
        entry.is_current = entry.url == url;
    }
}

/// Whether `url` lies strictly below `prefix`, on a segment boundary.
///
/// `/articles/x` is under `/articles`; `/articles` and `/articlesx` are not.
/// A trailing slash on the prefix is ignored, and the root prefix `/` lists
/// every document except the root itself.
#[must_use]
pub fn is_under_prefix(url: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    url.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('/'))
        .is_some_and(|rest| !rest.is_empty())
}

/// Date descending, undated last, then URL ascending.
fn compare_entries(a: &NavEntry, b: &NavEntry) -> Ordering {
    let by_date = match (a.date, b.date) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date.then_with(|| a.url.cmp(&b.url))
}
