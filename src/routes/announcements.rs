use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Local;
use serde_json::{json, Value};

use crate::{
    error::AppError,
    middleware::{json_body::JsonBody, query_params::QueryParams},
    models::{
        announcement::{Announcement, AnnouncementPayload, ListAnnouncementsQuery},
        teacher::TeacherCredentials,
    },
    services::announcements::AnnouncementService,
    AppState,
};

/// GET /announcements — public, current announcements by default.
pub async fn list_announcements(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListAnnouncementsQuery>,
) -> Result<Json<Vec<Announcement>>, AppError> {
    let today = Local::now().date_naive();
    AnnouncementService::list(state.announcements.as_ref(), today, &query)
        .await
        .map(Json)
}

// The body is checked (422) before the credential (401), and the credential
// before the identifier (404).

/// POST /announcements?teacher_username=…
pub async fn create_announcement(
    State(state): State<AppState>,
    credentials: TeacherCredentials,
    JsonBody(payload): JsonBody<AnnouncementPayload>,
) -> Result<Json<Announcement>, AppError> {
    let doc = payload.into_document()?;
    let teacher = credentials.authorize(state.teachers.as_ref()).await?;
    AnnouncementService::create(state.announcements.as_ref(), &teacher, doc)
        .await
        .map(Json)
}

/// PUT /announcements/{id}?teacher_username=…
pub async fn update_announcement(
    State(state): State<AppState>,
    credentials: TeacherCredentials,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<AnnouncementPayload>,
) -> Result<Json<Announcement>, AppError> {
    let doc = payload.into_document()?;
    let teacher = credentials.authorize(state.teachers.as_ref()).await?;
    AnnouncementService::update(state.announcements.as_ref(), &teacher, &id, doc)
        .await
        .map(Json)
}

/// DELETE /announcements/{id}?teacher_username=…
pub async fn delete_announcement(
    State(state): State<AppState>,
    credentials: TeacherCredentials,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let teacher = credentials.authorize(state.teachers.as_ref()).await?;
    AnnouncementService::delete(state.announcements.as_ref(), &teacher, &id).await?;
    Ok(Json(json!({ "message": "Announcement deleted" })))
}
