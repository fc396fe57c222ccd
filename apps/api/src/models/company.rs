use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A company row. The password hash never leaves the process.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub company_type: Option<String>,
    pub created_at: DateTime<Utc>,
}
