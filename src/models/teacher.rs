use serde::Deserialize;

/// Query string carried by every mutating announcements request.
#[derive(Debug, Default, Deserialize)]
pub struct TeacherCredentials {
    pub teacher_username: Option<String>,
}
