//! Authored documents and their declared exports.

use serde::{Deserialize, Serialize};

/// Fields an author may declare on a document.
///
/// Every field is optional. Consumers must treat blank values the same as
/// absent ones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exports {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Publication date in `YYYY-MM-DD` form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Exports {
    /// Parse exports from a YAML front matter block.
    ///
    /// Empty content yields default (all absent) exports.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(trimmed)
    }

    /// Declared title, unless blank.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    /// Declared description, unless blank.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }

    /// Declared date string, unless blank.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        non_blank(self.date.as_deref()).map(str::trim)
    }
}

/// Heading entry in a document outline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// One authored unit of content.
///
/// Documents are never mutated once discovered; rendering only derives new
/// values from them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Site-absolute URL path (e.g. `/articles/hello`).
    pub url: String,
    /// Fallback identifier, usually the file stem.
    pub name: String,
    pub exports: Exports,
    /// Headings in document order; may be empty.
    pub outline: Vec<OutlineEntry>,
}

impl Document {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            exports: Exports::default(),
            outline: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_exports(mut self, exports: Exports) -> Self {
        self.exports = exports;
        self
    }

    #[must_use]
    pub fn with_outline(mut self, outline: Vec<OutlineEntry>) -> Self {
        self.outline = outline;
        self
    }

    /// Title shown for this document.
    ///
    /// Resolved from the title export, then the first outline entry, then the
    /// document name. Blank values are skipped. Returns `None` when all three
    /// are missing.
    #[must_use]
    pub fn display_title(&self) -> Option<&str> {
        self.exports
            .title()
            .or_else(|| non_blank(self.outline.first().map(|entry| entry.title.as_str())))
            .or_else(|| non_blank(Some(&self.name)))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
