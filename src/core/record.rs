//! Input rows and the article records validated from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::RecordIssue;

/// Canonical calendar-date format for incoming rows and artifact names.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A row exactly as an input collaborator delivered it.
///
/// Every field is optional text; nothing has been checked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub date: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub source: Option<String>,
    pub category: Option<String>,
    /// Present but blank means unread; absent means the column is missing.
    pub read: Option<String>,
    /// Why the row could not be read as a row at all.
    pub malformed: Option<String>,
}

impl RawRow {
    /// Convenience constructor for a fully populated row.
    pub fn new(date: &str, title: &str, link: &str, source: &str, read: bool) -> Self {
        Self {
            date: Some(date.to_string()),
            title: Some(title.to_string()),
            link: Some(link.to_string()),
            source: Some(source.to_string()),
            category: None,
            read: Some(read.to_string()),
            malformed: None,
        }
    }

    /// A placeholder for input that did not have a row shape.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            malformed: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }
}

/// One validated reading-history entry.
///
/// The date is kept as text: a record whose date does not parse is still a
/// valid record, it just contributes nothing to the temporal breakdowns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub date: String,
    pub title: String,
    pub link: String,
    pub source: String,
    pub category: Option<String>,
    pub read: bool,
}

impl ArticleRecord {
    /// Parse the date in the canonical format.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}

impl TryFrom<RawRow> for ArticleRecord {
    type Error = RecordIssue;

    fn try_from(row: RawRow) -> Result<Self, Self::Error> {
        if let Some(reason) = row.malformed {
            return Err(RecordIssue::MalformedRow(reason));
        }
        Ok(Self {
            date: required(row.date, "date")?,
            title: required(row.title, "title")?,
            link: required(row.link, "link")?,
            source: required(row.source, "source")?,
            category: row
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            read: is_read(&row.read.ok_or(RecordIssue::MissingField("read"))?),
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, RecordIssue> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(RecordIssue::MissingField(field))
}

/// Interpret a boolean-like read marker. Anything unrecognised means unread.
pub fn is_read(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes") || value == "1"
}

/// Minimal article details kept for backlog reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleMeta {
    pub title: String,
    pub date: String,
    pub link: String,
    pub category: String,
    pub read: bool,
}
