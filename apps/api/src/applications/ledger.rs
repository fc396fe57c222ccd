use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::{require_row, AppError};
use crate::guard::{ensure_application_owner, ensure_job_owner};
use crate::models::application::{ApplicantRecord, ApplicationRow, ApplicationStatus, AppliedJob};

/// Records a student's application to a job.
///
/// Uniqueness of (student_id, job_id) is enforced by the store constraint,
/// not an application-level pre-check: two concurrent applies for the same
/// pair race on the index and exactly one wins. The loser surfaces as
/// `Conflict`.
///
/// `is_active` is deliberately not checked: a company may still want
/// applications on a posting it has paused.
pub async fn apply(
    pool: &PgPool,
    student_id: Uuid,
    job_id: Uuid,
) -> Result<ApplicationRow, AppError> {
    let job_exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?;
    if job_exists.is_none() {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }

    let application = sqlx::query_as::<_, ApplicationRow>(
        r#"
        INSERT INTO applications (id, student_id, job_id, status)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(student_id)
    .bind(job_id)
    .bind(ApplicationStatus::Applied.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "Already applied to this job"))?;

    info!("Student {student_id} applied to job {job_id}");
    Ok(application)
}

/// All applications for one job, joined with the applicants' contact fields.
/// Ownership-checked: the job must belong to the calling company.
pub async fn list_for_job(
    pool: &PgPool,
    company_id: Uuid,
    job_id: Uuid,
) -> Result<Vec<ApplicantRecord>, AppError> {
    ensure_job_owner(pool, company_id, job_id).await?;

    Ok(sqlx::query_as::<_, ApplicantRecord>(
        r#"
        SELECT a.id AS application_id,
               a.status,
               a.applied_at,
               s.name AS student_name,
               s.email AS student_email,
               s.phone_number,
               s.college_name,
               s.resume_link
        FROM applications a
        JOIN students s ON s.id = a.student_id
        WHERE a.job_id = $1
        ORDER BY a.applied_at ASC
        "#,
    )
    .bind(job_id)
    .fetch_all(pool)
    .await?)
}

/// (job_id, status) pairs for every application the student holds. Used to
/// render "already applied" state; nothing here exposes other students.
pub async fn list_for_student(
    pool: &PgPool,
    student_id: Uuid,
) -> Result<Vec<AppliedJob>, AppError> {
    Ok(sqlx::query_as::<_, AppliedJob>(
        "SELECT job_id, status FROM applications WHERE student_id = $1 ORDER BY applied_at ASC",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?)
}

/// Moves an application to `new_status` under ownership control.
///
/// The state machine is flat: Applied, Shortlisted, and Rejected are all
/// mutually reachable, so a company can revise a decision. The only guards
/// are that the status string is one of the three and that the caller owns
/// the application's job.
pub async fn update_status(
    pool: &PgPool,
    company_id: Uuid,
    application_id: Uuid,
    new_status: &str,
) -> Result<ApplicationRow, AppError> {
    let status = ApplicationStatus::parse(new_status).ok_or_else(|| {
        AppError::Validation(format!(
            "invalid status '{new_status}': expected Applied, Shortlisted or Rejected"
        ))
    })?;

    ensure_application_owner(pool, company_id, application_id).await?;

    // The guard ran against the pool, not a transaction: the application can
    // vanish between the check and this write (cascade delete of its job).
    let updated = sqlx::query_as::<_, ApplicationRow>(
        "UPDATE applications SET status = $2 WHERE id = $1 RETURNING *",
    )
    .bind(application_id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?;
    let updated = require_row(updated, format!("Application {application_id} not found"))?;

    info!(
        "Company {company_id} set application {application_id} to {}",
        status.as_str()
    );
    Ok(updated)
}
