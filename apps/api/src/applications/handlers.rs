use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::applications::ledger;
use crate::auth::{CompanyAuth, StudentAuth};
use crate::errors::AppError;
use crate::identity::{resolve_company, resolve_student};
use crate::models::application::{ApplicantRecord, ApplicationRow, AppliedJob};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobIdQuery {
    #[serde(rename = "jobId")]
    pub job_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    #[serde(rename = "jobId")]
    pub job_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// POST /student/apply
pub async fn handle_apply(
    State(state): State<AppState>,
    auth: StudentAuth,
    Json(req): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    let student = resolve_student(&state.db, &auth.email).await?;
    let application = ledger::apply(&state.db, student.id, req.job_id).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /company/jobs/appliedStudents?jobId=
pub async fn handle_applied_students(
    State(state): State<AppState>,
    auth: CompanyAuth,
    Query(params): Query<JobIdQuery>,
) -> Result<Json<Vec<ApplicantRecord>>, AppError> {
    let company = resolve_company(&state.db, &auth.email).await?;
    let applicants = ledger::list_for_job(&state.db, company.id, params.job_id).await?;
    Ok(Json(applicants))
}

/// GET /student/jobsApplied
pub async fn handle_jobs_applied(
    State(state): State<AppState>,
    auth: StudentAuth,
) -> Result<Json<Vec<AppliedJob>>, AppError> {
    let student = resolve_student(&state.db, &auth.email).await?;
    let applied = ledger::list_for_student(&state.db, student.id).await?;
    Ok(Json(applied))
}

/// PUT /company/jobs/application/:applicationId/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    auth: CompanyAuth,
    Path(application_id): Path<Uuid>,
    Json(req): Json<StatusUpdate>,
) -> Result<Json<ApplicationRow>, AppError> {
    let company = resolve_company(&state.db, &auth.email).await?;
    let updated =
        ledger::update_status(&state.db, company.id, application_id, &req.status).await?;
    Ok(Json(updated))
}
