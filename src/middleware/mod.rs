pub mod json_body;
pub mod query_params;
pub mod teacher_auth;
