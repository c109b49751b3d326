use chrono::NaiveDate;

use crate::core::ArticleMeta;

/// Keeps the `capacity` oldest unread articles, oldest first.
///
/// Equal dates are ordered by title, link and category, so the result does
/// not depend on input order.
#[derive(Debug, Clone)]
pub struct OldestUnread {
    capacity: usize,
    entries: Vec<(NaiveDate, ArticleMeta)>,
}

impl OldestUnread {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    pub fn offer(&mut self, date: NaiveDate, article: ArticleMeta) {
        let key = (&date, &article.title, &article.link, &article.category);
        let position = self
            .entries
            .partition_point(|(d, a)| (d, &a.title, &a.link, &a.category) <= key);
        if position < self.capacity {
            self.entries.insert(position, (date, article));
            self.entries.truncate(self.capacity);
        }
    }

    /// The single oldest article and the bounded ascending list.
    pub fn into_parts(self) -> (Option<ArticleMeta>, Vec<ArticleMeta>) {
        let list: Vec<ArticleMeta> = self.entries.into_iter().map(|(_, a)| a).collect();
        (list.first().cloned(), list)
    }
}
