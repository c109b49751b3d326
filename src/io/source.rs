//! Input collaborators that deliver raw reading-history rows.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::{Error, RawRow, Result};

/// Anything that can hand the pipeline a batch of raw rows.
///
/// Implementations own every concern of reaching the upstream data (files,
/// services, retries). The pipeline only sees the rows.
pub trait RecordSource {
    /// Short human-readable origin, used in logs and errors.
    fn describe(&self) -> String;

    fn fetch_rows(&self) -> Result<Vec<RawRow>>;

    /// Provider rows (e.g. one per newsletter author), named by source.
    fn fetch_providers(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub rows: Vec<RawRow>,
    pub providers: Vec<String>,
}

impl StaticSource {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self {
            rows,
            providers: Vec::new(),
        }
    }

    pub fn with_providers(mut self, providers: Vec<String>) -> Self {
        self.providers = providers;
        self
    }
}

impl RecordSource for StaticSource {
    fn describe(&self) -> String {
        format!("{} in-memory rows", self.rows.len())
    }

    fn fetch_rows(&self) -> Result<Vec<RawRow>> {
        Ok(self.rows.clone())
    }

    fn fetch_providers(&self) -> Result<Vec<String>> {
        Ok(self.providers.clone())
    }
}

/// Column order of a spreadsheet export: date, title, link, source, read.
const EXPORT_COLUMNS: usize = 5;

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Rows(Vec<Value>),
    Export {
        articles: Vec<Value>,
        #[serde(default)]
        providers: Vec<Value>,
    },
}

/// A JSON file exported from the reading list.
///
/// Accepted layouts:
/// - an array of row objects `{date, title, link, source, category?, read}`
///   where `category` stands in for a missing `source`;
/// - an array of arrays whose first row is a header and whose columns are
///   date, title, link, source, read;
/// - an object `{"articles": [...], "providers": [...]}` wrapping either of
///   the above plus provider names.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    rows: Vec<RawRow>,
    providers: Vec<String>,
}

impl JsonFileSource {
    /// Read and parse the file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let origin = path.display().to_string();
        let contents = fs::read_to_string(&path)
            .map_err(|e| Error::data_source(&origin, format!("cannot read input: {e}")))?;
        let (rows, providers) =
            parse_document(&contents).map_err(|message| Error::data_source(&origin, message))?;

        log::debug!(
            "Parsed {} rows and {} providers from {}",
            rows.len(),
            providers.len(),
            origin
        );
        Ok(Self {
            path,
            rows,
            providers,
        })
    }
}

impl RecordSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_rows(&self) -> Result<Vec<RawRow>> {
        Ok(self.rows.clone())
    }

    fn fetch_providers(&self) -> Result<Vec<String>> {
        Ok(self.providers.clone())
    }
}

/// Parse one of the accepted layouts into rows and provider names.
pub fn parse_document(contents: &str) -> std::result::Result<(Vec<RawRow>, Vec<String>), String> {
    let document: Document = serde_json::from_str(contents).map_err(|e| {
        format!("expected an array of rows or an object with `articles`: {e}")
    })?;

    match document {
        Document::Rows(rows) => Ok((rows_from_values(rows), Vec::new())),
        Document::Export {
            articles,
            providers,
        } => Ok((rows_from_values(articles), providers_from_values(providers))),
    }
}

fn rows_from_values(values: Vec<Value>) -> Vec<RawRow> {
    if matches!(values.first(), Some(Value::Array(_))) {
        // Spreadsheet export: skip the header row.
        values.into_iter().skip(1).map(row_from_cells).collect()
    } else {
        values.into_iter().map(row_from_object).collect()
    }
}

fn row_from_object(value: Value) -> RawRow {
    let fields = match value {
        Value::Object(fields) => fields,
        other => return RawRow::malformed(format!("expected an object, found {}", kind(&other))),
    };

    let field = |name: &str| fields.get(name).and_then(cell_text);
    let (source, category) = match field("source") {
        Some(source) => (Some(source), field("category")),
        None => (field("category"), None),
    };
    RawRow {
        date: field("date"),
        title: field("title"),
        link: field("link"),
        source,
        category,
        read: fields.get("read").map(read_text),
        malformed: None,
    }
}

fn row_from_cells(value: Value) -> RawRow {
    let cells = match value {
        Value::Array(cells) => cells,
        other => return RawRow::malformed(format!("expected an array, found {}", kind(&other))),
    };
    if cells.len() > EXPORT_COLUMNS {
        log::trace!("Ignoring {} extra cells", cells.len() - EXPORT_COLUMNS);
    }

    let cell = |idx: usize| cells.get(idx).and_then(cell_text);
    RawRow {
        date: cell(0),
        title: cell(1),
        link: cell(2),
        source: cell(3),
        category: None,
        read: cells.get(4).map(read_text),
        malformed: None,
    }
}

fn providers_from_values(values: Vec<Value>) -> Vec<String> {
    let skip_header = matches!(values.first(), Some(Value::Array(_)));
    values
        .into_iter()
        .skip(usize::from(skip_header))
        .filter_map(|value| match value {
            Value::Array(cells) => cells.first().and_then(cell_text),
            Value::Object(fields) => provider_name(&fields),
            other => cell_text(&other),
        })
        .collect()
}

fn provider_name(fields: &Map<String, Value>) -> Option<String> {
    ["source", "provider", "name"]
        .iter()
        .find_map(|key| fields.get(*key).and_then(cell_text))
}

/// Text of a scalar cell; `None` for null and nested values.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read markers keep their text so row validation can interpret them.
/// A null or blank marker reads as unread rather than missing.
fn read_text(value: &Value) -> String {
    cell_text(value).unwrap_or_else(|| "false".to_string())
}
