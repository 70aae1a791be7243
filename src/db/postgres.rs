use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::store::{AnnouncementStore, ListFilter, TeacherDirectory},
    models::announcement::{AnnouncementDocument, NewAnnouncement},
};

const DOCUMENT_COLUMNS: &str = "id, title, message, start_date, end_date";

/// Announcements kept in the `announcements` table. Date columns are text
/// with the "C" collation so comparisons are plain byte order.
#[derive(Clone)]
pub struct PgAnnouncementStore {
    pool: PgPool,
}

impl PgAnnouncementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnouncementStore for PgAnnouncementStore {
    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find(&self, filter: &ListFilter) -> anyhow::Result<Vec<AnnouncementDocument>> {
        let docs = sqlx::query_as::<_, AnnouncementDocument>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM announcements
             WHERE ($1::text IS NULL OR end_date >= $1)
               AND ($2::text IS NULL OR start_date IS NULL OR start_date = '' OR start_date <= $2)
             ORDER BY end_date ASC, created_at ASC"
        ))
        .bind(filter.end_date_from.as_deref())
        .bind(filter.start_date_until.as_deref())
        .fetch_all(&self.pool)
        .await?;
        Ok(docs)
    }

    async fn insert(&self, doc: &NewAnnouncement) -> anyhow::Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO announcements (title, message, start_date, end_date)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&doc.title)
        .bind(&doc.message)
        .bind(&doc.start_date)
        .bind(&doc.end_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<AnnouncementDocument>> {
        let doc = sqlx::query_as::<_, AnnouncementDocument>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM announcements WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn find_and_replace(
        &self,
        id: Uuid,
        doc: &NewAnnouncement,
    ) -> anyhow::Result<Option<AnnouncementDocument>> {
        let updated = sqlx::query_as::<_, AnnouncementDocument>(&format!(
            "UPDATE announcements
             SET title = $1,
                 message = $2,
                 start_date = $3,
                 end_date = $4,
                 updated_at = NOW()
             WHERE id = $5
             RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(&doc.title)
        .bind(&doc.message)
        .bind(&doc.start_date)
        .bind(&doc.end_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_one(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}

#[derive(Clone)]
pub struct PgTeacherDirectory {
    pool: PgPool,
}

impl PgTeacherDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeacherDirectory for PgTeacherDirectory {
    async fn exists(&self, username: &str) -> anyhow::Result<bool> {
        let found = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM teachers WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }
}
