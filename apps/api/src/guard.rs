use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::ApplicationRow;
use crate::models::job::JobRow;

/// Verifies that `company_id` owns `job_id` and returns the job.
/// `NotFound` when the job does not exist, `Forbidden` when it belongs to
/// another company. Must run before any owner-scoped job mutation.
pub async fn ensure_job_owner(
    pool: &PgPool,
    company_id: Uuid,
    job_id: Uuid,
) -> Result<JobRow, AppError> {
    let job = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    check_owner(&job, company_id)?;
    Ok(job)
}

/// The ownership decision itself: a job touched by a company other than the
/// one that owns it is `Forbidden`. Absence is decided by the callers above,
/// so this sees only rows that exist.
pub fn check_owner(job: &JobRow, company_id: Uuid) -> Result<(), AppError> {
    if job.company_id != company_id {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Verifies that `company_id` owns the job an application points at, and
/// returns the application. Ownership is transitive: application → job →
/// company.
pub async fn ensure_application_owner(
    pool: &PgPool,
    company_id: Uuid,
    application_id: Uuid,
) -> Result<ApplicationRow, AppError> {
    let application =
        sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications WHERE id = $1")
            .bind(application_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))?;

    ensure_job_owner(pool, company_id, application.job_id).await?;
    Ok(application)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn job_owned_by(company_id: Uuid) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            company_id,
            title: "Backend Intern".to_string(),
            description: None,
            stipend: Some(15_000),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn owner_may_touch_its_own_job() {
        let owner = Uuid::new_v4();
        let job = job_owned_by(owner);
        assert!(check_owner(&job, owner).is_ok());
    }

    #[test]
    fn another_company_is_forbidden() {
        let job = job_owned_by(Uuid::new_v4());
        let intruder = Uuid::new_v4();
        assert!(matches!(
            check_owner(&job, intruder),
            Err(AppError::Forbidden)
        ));
    }
}
