use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::{CompanyAuth, StudentAuth};
use crate::errors::AppError;
use crate::identity::{resolve_company, resolve_student};
use crate::jobs::catalog::{self, CreateJob, UpdateJob};
use crate::models::job::{JobRow, JobWithSkills};
use crate::state::AppState;

/// POST /company/dashboard/job
pub async fn handle_create_job(
    State(state): State<AppState>,
    auth: CompanyAuth,
    Json(req): Json<CreateJob>,
) -> Result<(StatusCode, Json<JobWithSkills>), AppError> {
    let company = resolve_company(&state.db, &auth.email).await?;
    let job = catalog::create_job(&state.db, company.id, req).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /company/dashboard/job
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    auth: CompanyAuth,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let company = resolve_company(&state.db, &auth.email).await?;
    let jobs = catalog::list_jobs(&state.db, company.id).await?;
    Ok(Json(jobs))
}

/// GET /company/dashboard/job/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    auth: CompanyAuth,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobWithSkills>, AppError> {
    let company = resolve_company(&state.db, &auth.email).await?;
    let job = catalog::get_job(&state.db, company.id, job_id).await?;
    Ok(Json(job))
}

/// PUT /company/dashboard/job/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    auth: CompanyAuth,
    Path(job_id): Path<Uuid>,
    Json(req): Json<UpdateJob>,
) -> Result<Json<JobWithSkills>, AppError> {
    let company = resolve_company(&state.db, &auth.email).await?;
    let job = catalog::update_job(&state.db, company.id, job_id, req).await?;
    Ok(Json(job))
}

/// DELETE /company/dashboard/job/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    auth: CompanyAuth,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let company = resolve_company(&state.db, &auth.email).await?;
    catalog::delete_job(&state.db, company.id, job_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /student/dashboard/jobsStudent
/// Active jobs across all companies. Requires a student principal, though
/// the listing itself is not scoped to them.
pub async fn handle_browse_jobs(
    State(state): State<AppState>,
    auth: StudentAuth,
) -> Result<Json<Vec<JobRow>>, AppError> {
    resolve_student(&state.db, &auth.email).await?;
    let jobs = catalog::list_active_jobs(&state.db).await?;
    Ok(Json(jobs))
}
