use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::{
    hash_password, issue_token, validate_credentials, verify_password, CompanyAuth, Role,
};
use crate::errors::AppError;
use crate::identity::resolve_company;
use crate::models::company::Company;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompanySignup {
    pub name: String,
    pub email: String,
    pub password: String,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub company_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct CompanyAuthResponse {
    pub token: String,
    pub company: Company,
}

/// Profile update. Email is immutable; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct CompanyProfileUpdate {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub company_type: Option<String>,
}

/// POST /company/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(req): Json<CompanySignup>,
) -> Result<(StatusCode, Json<CompanyAuthResponse>), AppError> {
    validate_credentials(&req.email, &req.password)?;
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("company name is required".to_string()));
    }

    let password_hash = hash_password(&req.password)?;

    let company = sqlx::query_as::<_, Company>(
        r#"
        INSERT INTO companies (id, name, email, password_hash, industry, location, website, company_type)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.name.trim())
    .bind(req.email.trim())
    .bind(&password_hash)
    .bind(&req.industry)
    .bind(&req.location)
    .bind(&req.website)
    .bind(&req.company_type)
    .fetch_one(&state.db)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "Company with this email already exists"))?;

    info!("Company signup: {}", company.email);
    let token = issue_token(&company.email, Role::Company, &state.config.jwt_secret)?;
    Ok((
        StatusCode::CREATED,
        Json(CompanyAuthResponse { token, company }),
    ))
}

/// POST /company/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<CompanyAuthResponse>, AppError> {
    let company = resolve_company(&state.db, req.email.trim()).await?;
    if !verify_password(&req.password, &company.password_hash)? {
        return Err(AppError::Unauthorized);
    }
    let token = issue_token(&company.email, Role::Company, &state.config.jwt_secret)?;
    Ok(Json(CompanyAuthResponse { token, company }))
}

/// GET /company/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    auth: CompanyAuth,
) -> Result<Json<Company>, AppError> {
    let company = resolve_company(&state.db, &auth.email).await?;
    Ok(Json(company))
}

/// PUT /company/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    auth: CompanyAuth,
    Json(req): Json<CompanyProfileUpdate>,
) -> Result<Json<Company>, AppError> {
    // Resolve first so an unknown principal is NotFound, not a silent no-op.
    let company = resolve_company(&state.db, &auth.email).await?;

    let updated = sqlx::query_as::<_, Company>(
        r#"
        UPDATE companies
        SET name = COALESCE($2, name),
            industry = COALESCE($3, industry),
            location = COALESCE($4, location),
            website = COALESCE($5, website),
            company_type = COALESCE($6, company_type)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(company.id)
    .bind(&req.name)
    .bind(&req.industry)
    .bind(&req.location)
    .bind(&req.website)
    .bind(&req.company_type)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(updated))
}
