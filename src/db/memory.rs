use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    db::store::{AnnouncementStore, ListFilter, TeacherDirectory},
    models::announcement::{AnnouncementDocument, NewAnnouncement},
};

/// Process-local announcement store. Documents are kept in insertion order.
#[derive(Default)]
pub struct MemoryAnnouncementStore {
    docs: RwLock<Vec<AnnouncementDocument>>,
}

impl MemoryAnnouncementStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn with_id(id: Uuid, doc: &NewAnnouncement) -> AnnouncementDocument {
    AnnouncementDocument {
        id,
        title: doc.title.clone(),
        message: doc.message.clone(),
        start_date: doc.start_date.clone(),
        end_date: doc.end_date.clone(),
    }
}

#[async_trait]
impl AnnouncementStore for MemoryAnnouncementStore {
    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn find(&self, filter: &ListFilter) -> anyhow::Result<Vec<AnnouncementDocument>> {
        let docs = self.docs.read().await;
        let mut found: Vec<AnnouncementDocument> =
            docs.iter().filter(|d| filter.matches(d)).cloned().collect();
        // Stable sort: equal end dates keep insertion order
        found.sort_by(|a, b| a.end_date.cmp(&b.end_date));
        Ok(found)
    }

    async fn insert(&self, doc: &NewAnnouncement) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        self.docs.write().await.push(with_id(id, doc));
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<AnnouncementDocument>> {
        let docs = self.docs.read().await;
        Ok(docs.iter().find(|d| d.id == id).cloned())
    }

    async fn find_and_replace(
        &self,
        id: Uuid,
        doc: &NewAnnouncement,
    ) -> anyhow::Result<Option<AnnouncementDocument>> {
        let mut docs = self.docs.write().await;
        Ok(docs.iter_mut().find(|d| d.id == id).map(|existing| {
            *existing = with_id(id, doc);
            existing.clone()
        }))
    }

    async fn delete_one(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut docs = self.docs.write().await;
        match docs.iter().position(|d| d.id == id) {
            Some(idx) => {
                docs.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Fixed set of teacher usernames.
#[derive(Debug, Default, Clone)]
pub struct MemoryTeacherDirectory {
    usernames: HashSet<String>,
}

impl MemoryTeacherDirectory {
    pub fn new<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            usernames: usernames.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl TeacherDirectory for MemoryTeacherDirectory {
    async fn exists(&self, username: &str) -> anyhow::Result<bool> {
        Ok(self.usernames.contains(username))
    }
}
