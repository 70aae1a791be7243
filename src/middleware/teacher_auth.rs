use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::{db::TeacherDirectory, error::AppError, models::teacher::TeacherCredentials};

/// Reads the `teacher_username` query parameter without judging it, so the
/// request body can be validated before the credential is checked.
impl<S> FromRequestParts<S> for TeacherCredentials
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Query::<TeacherCredentials>::try_from_uri(&parts.uri)
            .map(|Query(credentials)| credentials)
            .unwrap_or_default())
    }
}

impl TeacherCredentials {
    /// Checks the username against the directory and returns it.
    ///
    /// Missing or empty → `Unauthenticated`; unknown → `Unauthorized`.
    pub async fn authorize(self, teachers: &dyn TeacherDirectory) -> Result<String, AppError> {
        let username = self
            .teacher_username
            .filter(|u| !u.is_empty())
            .ok_or(AppError::Unauthenticated)?;

        if !teachers.exists(&username).await? {
            tracing::warn!("rejected unknown teacher username {username:?}");
            return Err(AppError::Unauthorized);
        }

        Ok(username)
    }
}
