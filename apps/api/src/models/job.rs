use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub stipend: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A canonical skill tag. `name` is unique and case-sensitive as stored.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
}

/// A job together with its resolved skill names, as returned by the
/// company-facing job endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct JobWithSkills {
    #[serde(flatten)]
    pub job: JobRow,
    pub skills: Vec<String>,
}
