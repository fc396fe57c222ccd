use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::company::Company;
use crate::models::student::Student;

/// Resolves an authenticated company email to its row.
/// Every company-scoped operation starts here: "who is calling" becomes
/// "which company id owns what".
pub async fn resolve_company(pool: &PgPool, email: &str) -> Result<Company, AppError> {
    sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))
}

/// Resolves an authenticated student email to its row.
pub async fn resolve_student(pool: &PgPool, email: &str) -> Result<Student, AppError> {
    sqlx::query_as::<_, Student>("SELECT * FROM students WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
}
