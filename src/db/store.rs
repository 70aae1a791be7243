use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::announcement::{format_date, AnnouncementDocument, NewAnnouncement};

/// Persistence for announcement documents.
///
/// Every method is a single store round-trip. `find` returns documents
/// ordered ascending by `end_date`.
#[async_trait]
pub trait AnnouncementStore: Send + Sync {
    async fn ping(&self) -> anyhow::Result<()>;

    async fn find(&self, filter: &ListFilter) -> anyhow::Result<Vec<AnnouncementDocument>>;

    /// Returns the identifier the store assigned.
    async fn insert(&self, doc: &NewAnnouncement) -> anyhow::Result<Uuid>;

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<AnnouncementDocument>>;

    /// Replaces every field of `id` and returns the document after the write,
    /// or `None` when nothing has that identifier.
    async fn find_and_replace(
        &self,
        id: Uuid,
        doc: &NewAnnouncement,
    ) -> anyhow::Result<Option<AnnouncementDocument>>;

    /// `true` when exactly one document was removed.
    async fn delete_one(&self, id: Uuid) -> anyhow::Result<bool>;
}

/// Username-keyed lookup of the teachers allowed to manage announcements.
#[async_trait]
pub trait TeacherDirectory: Send + Sync {
    async fn exists(&self, username: &str) -> anyhow::Result<bool>;
}

/// Date bounds applied when listing announcements.
///
/// Bounds are ISO `YYYY-MM-DD` strings, which sort the same way as the
/// dates they encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter {
    /// Lowest `end_date` returned, if any.
    pub end_date_from: Option<String>,
    /// Highest `start_date` returned, if any. Documents without a start date
    /// always pass.
    pub start_date_until: Option<String>,
}

impl ListFilter {
    pub fn new(today: NaiveDate, include_expired: bool, include_future: bool) -> Self {
        let today = format_date(today);
        if include_expired {
            return Self::all();
        }
        Self {
            end_date_from: Some(today.clone()),
            start_date_until: (!include_future).then_some(today),
        }
    }

    pub fn all() -> Self {
        Self {
            end_date_from: None,
            start_date_until: None,
        }
    }

    pub fn matches(&self, doc: &AnnouncementDocument) -> bool {
        let ends_in_range = self
            .end_date_from
            .as_deref()
            .map_or(true, |from| doc.end_date.as_str() >= from);
        let starts_in_range = match (self.start_date_until.as_deref(), doc.start_date.as_deref()) {
            (Some(until), Some(start)) if !start.is_empty() => start <= until,
            _ => true,
        };
        ends_in_range && starts_in_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(start: Option<&str>, end: &str) -> AnnouncementDocument {
        AnnouncementDocument {
            id: Uuid::new_v4(),
            title: "Exam".into(),
            message: "Midterm Friday".into(),
            start_date: start.map(String::from),
            end_date: end.into(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 15).unwrap()
    }

    #[test]
    fn test_default_filter_bounds() {
        let filter = ListFilter::new(today(), false, false);
        assert_eq!(filter.end_date_from.as_deref(), Some("2030-06-15"));
        assert_eq!(filter.start_date_until.as_deref(), Some("2030-06-15"));

        assert!(filter.matches(&doc(None, "2030-06-15")));
        assert!(filter.matches(&doc(Some("2030-06-15"), "2030-07-01")));
        assert!(!filter.matches(&doc(None, "2030-06-14")));
        assert!(!filter.matches(&doc(Some("2030-06-16"), "2030-07-01")));
    }

    #[test]
    fn test_include_future_keeps_end_bound() {
        let filter = ListFilter::new(today(), false, true);
        assert!(filter.matches(&doc(Some("2031-01-01"), "2031-02-01")));
        assert!(!filter.matches(&doc(None, "2030-01-01")));
    }

    #[test]
    fn test_include_expired_drops_every_bound() {
        let filter = ListFilter::new(today(), true, false);
        assert_eq!(filter, ListFilter::all());
        assert!(filter.matches(&doc(None, "2001-01-01")));
        assert!(filter.matches(&doc(Some("2099-01-01"), "2099-02-01")));
    }
}
