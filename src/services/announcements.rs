use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    db::{AnnouncementStore, ListFilter},
    error::AppError,
    models::announcement::{Announcement, ListAnnouncementsQuery, NewAnnouncement},
};

pub struct AnnouncementService;

/// Identifiers that do not parse can never match a document.
fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound)
}

impl AnnouncementService {
    /// Announcements visible on `today`, ordered by end date.
    pub async fn list(
        store: &dyn AnnouncementStore,
        today: NaiveDate,
        query: &ListAnnouncementsQuery,
    ) -> Result<Vec<Announcement>, AppError> {
        let filter = ListFilter::new(today, query.include_expired, query.include_future);
        store
            .find(&filter)
            .await?
            .into_iter()
            .map(Announcement::try_from)
            .collect()
    }

    /// Stores an already validated announcement and returns it as read back.
    pub async fn create(
        store: &dyn AnnouncementStore,
        teacher: &str,
        doc: NewAnnouncement,
    ) -> Result<Announcement, AppError> {
        let id = store.insert(&doc).await?;

        let created = store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal("Failed to create announcement".into()))?;

        tracing::info!("announcement {id} created by {teacher}");
        Announcement::try_from(created)
    }

    /// Full replace of every field; a missing start date clears it.
    pub async fn update(
        store: &dyn AnnouncementStore,
        teacher: &str,
        id: &str,
        doc: NewAnnouncement,
    ) -> Result<Announcement, AppError> {
        let id = parse_id(id)?;

        let updated = store
            .find_and_replace(id, &doc)
            .await?
            .ok_or(AppError::NotFound)?;

        tracing::info!("announcement {id} updated by {teacher}");
        Announcement::try_from(updated)
    }

    pub async fn delete(
        store: &dyn AnnouncementStore,
        teacher: &str,
        id: &str,
    ) -> Result<(), AppError> {
        let id = parse_id(id)?;
        if !store.delete_one(id).await? {
            return Err(AppError::NotFound);
        }

        tracing::info!("announcement {id} deleted by {teacher}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        db::MemoryAnnouncementStore,
        models::announcement::{AnnouncementDocument, AnnouncementPayload},
    };

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn doc(title: &str, start: Option<&str>, end: &str) -> NewAnnouncement {
        AnnouncementPayload {
            title: title.into(),
            message: "Midterm Friday".into(),
            start_date: start.map(date),
            end_date: date(end),
        }
        .into_document()
        .unwrap()
    }

    fn query(include_expired: bool, include_future: bool) -> ListAnnouncementsQuery {
        ListAnnouncementsQuery {
            include_expired,
            include_future,
        }
    }

    fn titles(list: &[Announcement]) -> Vec<&str> {
        list.iter().map(|a| a.title.as_str()).collect()
    }

    /// Accepts writes but never finds them again.
    struct LosingStore;

    #[async_trait]
    impl AnnouncementStore for LosingStore {
        async fn ping(&self) -> anyhow::Result<()> {
            Ok(())
        }

        async fn find(&self, _filter: &ListFilter) -> anyhow::Result<Vec<AnnouncementDocument>> {
            Ok(Vec::new())
        }

        async fn insert(&self, _doc: &NewAnnouncement) -> anyhow::Result<Uuid> {
            Ok(Uuid::new_v4())
        }

        async fn find_by_id(&self, _id: Uuid) -> anyhow::Result<Option<AnnouncementDocument>> {
            Ok(None)
        }

        async fn find_and_replace(
            &self,
            _id: Uuid,
            _doc: &NewAnnouncement,
        ) -> anyhow::Result<Option<AnnouncementDocument>> {
            Ok(None)
        }

        async fn delete_one(&self, _id: Uuid) -> anyhow::Result<bool> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_create_round_trips_dates() {
        let store = MemoryAnnouncementStore::new();
        let created = AnnouncementService::create(
            &store,
            "mrodriguez",
            doc(" Exam ", Some("2099-01-01"), "2099-01-31"),
        )
        .await
        .unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.title, "Exam");
        assert_eq!(created.start_date, Some(date("2099-01-01")));
        assert_eq!(created.end_date, date("2099-01-31"));
    }

    #[tokio::test]
    async fn test_create_fails_when_read_back_misses() {
        let err = AnnouncementService::create(&LosingStore, "mrodriguez", doc("Exam", None, "2099-01-01"))
            .await
            .unwrap_err();
        match &err {
            AppError::Internal(msg) => assert_eq!(msg, "Failed to create announcement"),
            other => panic!("expected Internal, got {other:?}"),
        }
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_list_filters_by_today() {
        let store = MemoryAnnouncementStore::new();
        let today = date("2030-06-15");
        for (title, start, end) in [
            ("expired", None, "2030-06-14"),
            ("ends today", None, "2030-06-15"),
            ("running", Some("2030-06-01"), "2030-07-01"),
            ("upcoming", Some("2030-06-16"), "2030-06-20"),
        ] {
            AnnouncementService::create(&store, "mrodriguez", doc(title, start, end))
                .await
                .unwrap();
        }

        let current = AnnouncementService::list(&store, today, &query(false, false)).await.unwrap();
        assert_eq!(titles(&current), vec!["ends today", "running"]);

        let with_future = AnnouncementService::list(&store, today, &query(false, true)).await.unwrap();
        assert_eq!(titles(&with_future), vec!["ends today", "upcoming", "running"]);

        let everything = AnnouncementService::list(&store, today, &query(true, false)).await.unwrap();
        assert_eq!(
            titles(&everything),
            vec!["expired", "ends today", "upcoming", "running"]
        );
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let store = MemoryAnnouncementStore::new();
        let created = AnnouncementService::create(
            &store,
            "mrodriguez",
            doc("Exam", Some("2099-01-01"), "2099-01-10"),
        )
        .await
        .unwrap();

        let updated = AnnouncementService::update(
            &store,
            "mchen",
            &created.id,
            doc("Final Exam", None, "2099-01-12"),
        )
        .await
        .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Final Exam");
        assert_eq!(updated.start_date, None);
        assert_eq!(updated.end_date, date("2099-01-12"));
    }

    #[tokio::test]
    async fn test_update_unknown_or_malformed_id_is_not_found() {
        let store = MemoryAnnouncementStore::new();
        for id in ["not-an-id".to_string(), Uuid::new_v4().to_string()] {
            let err = AnnouncementService::update(&store, "mrodriguez", &id, doc("Exam", None, "2099-01-01"))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::NotFound));
        }
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let store = MemoryAnnouncementStore::new();
        let created = AnnouncementService::create(&store, "mrodriguez", doc("Exam", None, "2099-01-01"))
            .await
            .unwrap();

        AnnouncementService::delete(&store, "mrodriguez", &created.id).await.unwrap();
        let err = AnnouncementService::delete(&store, "mrodriguez", &created.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));

        let err = AnnouncementService::delete(&store, "mrodriguez", "12345").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}
