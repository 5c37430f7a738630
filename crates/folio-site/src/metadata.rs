//! Page metadata derived from a document.
//!
//! [`PageMetadata`] is a pure projection of a [`Document`]: the display
//! title after fallback, the parsed publication date and the description.
//! Nothing here is defaulted: an absent date or description stays absent so
//! the page omits the corresponding element.

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::document::Document;
use crate::error::{RenderError, Warning};

/// Format of the `date` export.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Human-readable date format (`June 15, 2025`).
const DISPLAY_DATE_FORMAT: &str = "%B %-d, %Y";

/// Derived facts about one page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub url: String,
    /// Display title; never empty.
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Metadata plus the non-fatal diagnostics raised while deriving it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub metadata: PageMetadata,
    pub warnings: Vec<Warning>,
}

impl PageMetadata {
    /// Derive metadata for `document`, logging any warnings.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnresolvableTitle`] when the document has no
    /// title export, no outline entry and no name.
    pub fn resolve(document: &Document) -> Result<Resolved, RenderError> {
        let resolved = Self::derive(document)?;
        for warning in &resolved.warnings {
            match warning {
                Warning::MalformedDate { url, value } => {
                    tracing::warn!(url = %url, value = %value, "Malformed date, omitting it");
                }
            }
        }
        Ok(resolved)
    }

    /// Derive metadata for `document` without logging.
    pub(crate) fn derive(document: &Document) -> Result<Resolved, RenderError> {
        let title = document
            .display_title()
            .ok_or_else(|| RenderError::UnresolvableTitle {
                url: document.url.clone(),
            })?
            .trim()
            .to_owned();

        let mut warnings = Vec::new();
        let date = document.exports.date().and_then(|raw| match parse_date(raw) {
            Some(date) => Some(date),
            None => {
                warnings.push(Warning::MalformedDate {
                    url: document.url.clone(),
                    value: raw.to_owned(),
                });
                None
            }
        });

        Ok(Resolved {
            metadata: Self {
                url: document.url.clone(),
                title,
                date,
                description: document.exports.description().map(str::to_owned),
            },
            warnings,
        })
    }

    /// Publication date at local midnight.
    ///
    /// Returns `None` when there is no date, or when local midnight does not
    /// exist on that day (a DST gap).
    #[must_use]
    pub fn local_midnight(&self) -> Option<DateTime<Local>> {
        self.date?
            .and_time(NaiveTime::MIN)
            .and_local_timezone(Local)
            .earliest()
    }

    /// Publication date formatted for display, e.g. `June 15, 2025`.
    #[must_use]
    pub fn display_date(&self) -> Option<String> {
        self.date.map(format_date)
    }

    /// Publication date in ISO form, e.g. `2025-06-15`.
    #[must_use]
    pub fn iso_date(&self) -> Option<String> {
        self.date.map(|date| date.format(DATE_FORMAT).to_string())
    }
}

/// Parse a `YYYY-MM-DD` date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Format a date for display, e.g. `June 15, 2025`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}
