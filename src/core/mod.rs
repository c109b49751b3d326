//! Core data model shared by every pipeline stage.

pub mod errors;
pub mod record;
pub mod snapshot;

pub use errors::{Error, IoResultExt, RecordIssue, Result};
pub use record::{ArticleMeta, ArticleRecord, RawRow, DATE_FORMAT};
pub use snapshot::{
    is_bookkeeping_key, AgeBucket, MetricsSnapshot, ReadUnread, SourceMeta, READ, UNREAD,
};
