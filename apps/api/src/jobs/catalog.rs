use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::{require_row, AppError};
use crate::guard::ensure_job_owner;
use crate::models::job::{JobRow, JobWithSkills, Skill};
use crate::skills::{replace_job_skills, upsert_skills};

#[derive(Debug, Deserialize)]
pub struct CreateJob {
    pub title: String,
    pub description: Option<String>,
    pub stipend: Option<i64>,
    pub skills: Option<Vec<String>>,
}

/// Update payload. The skill list is a full replacement: a skill omitted
/// here is detached from the job, though its row survives.
#[derive(Debug, Deserialize)]
pub struct UpdateJob {
    pub title: String,
    pub description: Option<String>,
    pub stipend: Option<i64>,
    pub skills: Vec<String>,
}

/// Creates a job owned by `company_id` and associates its skills through the
/// canonical skill store.
pub async fn create_job(
    pool: &PgPool,
    company_id: Uuid,
    data: CreateJob,
) -> Result<JobWithSkills, AppError> {
    if data.title.trim().is_empty() {
        return Err(AppError::Validation("job title is required".to_string()));
    }

    let skills = match &data.skills {
        Some(names) => upsert_skills(pool, names).await?,
        None => Vec::new(),
    };

    let mut tx = pool.begin().await?;

    let job = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs (id, company_id, title, description, stipend, is_active)
        VALUES ($1, $2, $3, $4, $5, true)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(company_id)
    .bind(data.title.trim())
    .bind(&data.description)
    .bind(data.stipend)
    .fetch_one(&mut *tx)
    .await?;

    replace_job_skills(&mut tx, job.id, &skills).await?;
    tx.commit().await?;

    info!("Company {company_id} created job {}", job.id);
    Ok(with_skill_names(job, &skills))
}

/// All jobs owned by one company, newest first. No pagination: the company
/// dashboard renders the full set.
pub async fn list_jobs(pool: &PgPool, company_id: Uuid) -> Result<Vec<JobRow>, AppError> {
    Ok(sqlx::query_as::<_, JobRow>(
        "SELECT * FROM jobs WHERE company_id = $1 ORDER BY created_at DESC",
    )
    .bind(company_id)
    .fetch_all(pool)
    .await?)
}

/// All active jobs across every company, for the student browse view.
pub async fn list_active_jobs(pool: &PgPool) -> Result<Vec<JobRow>, AppError> {
    Ok(
        sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE is_active ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?,
    )
}

/// One job with its skills, scoped to the owning company. A job owned by
/// another company is indistinguishable from a missing one here: this is a
/// scoped read, so both are `NotFound`.
pub async fn get_job(
    pool: &PgPool,
    company_id: Uuid,
    job_id: Uuid,
) -> Result<JobWithSkills, AppError> {
    let job =
        sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1 AND company_id = $2")
            .bind(job_id)
            .bind(company_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let skills = skill_names(pool, job_id).await?;
    Ok(JobWithSkills { job, skills })
}

/// Ownership-checked update. Replaces title, stipend, and description,
/// reactivates the job, and fully replaces the skill association set.
pub async fn update_job(
    pool: &PgPool,
    company_id: Uuid,
    job_id: Uuid,
    data: UpdateJob,
) -> Result<JobWithSkills, AppError> {
    if data.title.trim().is_empty() {
        return Err(AppError::Validation("job title is required".to_string()));
    }

    ensure_job_owner(pool, company_id, job_id).await?;
    let skills = upsert_skills(pool, &data.skills).await?;

    let mut tx = pool.begin().await?;

    // A concurrent delete between the guard and this write leaves no row.
    let job = sqlx::query_as::<_, JobRow>(
        r#"
        UPDATE jobs
        SET title = $2, description = $3, stipend = $4, is_active = true
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(job_id)
    .bind(data.title.trim())
    .bind(&data.description)
    .bind(data.stipend)
    .fetch_optional(&mut *tx)
    .await?;
    let job = require_row(job, format!("Job {job_id} not found"))?;

    replace_job_skills(&mut tx, job_id, &skills).await?;
    tx.commit().await?;

    Ok(with_skill_names(job, &skills))
}

/// Ownership-checked delete, cascading to applications. The cascade and the
/// job deletion commit together: no orphan applications, no half-deleted job.
pub async fn delete_job(pool: &PgPool, company_id: Uuid, job_id: Uuid) -> Result<(), AppError> {
    ensure_job_owner(pool, company_id, job_id).await?;

    let mut tx = pool.begin().await?;

    let cascaded = sqlx::query("DELETE FROM applications WHERE job_id = $1")
        .bind(job_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM job_skills WHERE job_id = $1")
        .bind(job_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(job_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!("Deleted job {job_id} and {cascaded} applications for company {company_id}");
    Ok(())
}

async fn skill_names(pool: &PgPool, job_id: Uuid) -> Result<Vec<String>, AppError> {
    Ok(sqlx::query_scalar::<_, String>(
        r#"
        SELECT s.name
        FROM skills s
        JOIN job_skills js ON js.skill_id = s.id
        WHERE js.job_id = $1
        ORDER BY s.name
        "#,
    )
    .bind(job_id)
    .fetch_all(pool)
    .await?)
}

fn with_skill_names(job: JobRow, skills: &[Skill]) -> JobWithSkills {
    JobWithSkills {
        job,
        skills: skills.iter().map(|s| s.name.clone()).collect(),
    }
}
