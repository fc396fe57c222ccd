use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::{
    hash_password, issue_token, validate_credentials, verify_password, Role, StudentAuth,
};
use crate::errors::AppError;
use crate::identity::resolve_student;
use crate::models::student::{phone_string, Student};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StudentSignup {
    pub name: String,
    pub email: String,
    #[serde(with = "phone_string")]
    pub phone_number: i64,
    pub password: String,
    pub college_name: Option<String>,
    pub cgpa: Option<f64>,
    pub year_of_passing: Option<i32>,
    pub resume_link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct StudentAuthResponse {
    pub token: String,
    pub student: Student,
}

/// Profile update. Email is immutable. The phone number arrives as a string
/// and is re-validated here, same as at signup.
#[derive(Debug, Deserialize)]
pub struct StudentProfileUpdate {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub college_name: Option<String>,
    pub cgpa: Option<f64>,
    pub year_of_passing: Option<i32>,
    pub resume_link: Option<String>,
}

fn parse_phone(raw: &str) -> Result<i64, AppError> {
    let phone = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::Validation(format!("invalid phone number '{raw}'")))?;
    if phone <= 0 {
        return Err(AppError::Validation(
            "phone number must be positive".to_string(),
        ));
    }
    Ok(phone)
}

/// POST /student/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(req): Json<StudentSignup>,
) -> Result<(StatusCode, Json<StudentAuthResponse>), AppError> {
    validate_credentials(&req.email, &req.password)?;
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("student name is required".to_string()));
    }
    if req.phone_number <= 0 {
        return Err(AppError::Validation(
            "phone number must be positive".to_string(),
        ));
    }

    let password_hash = hash_password(&req.password)?;

    let student = sqlx::query_as::<_, Student>(
        r#"
        INSERT INTO students
            (id, name, email, phone_number, password_hash,
             college_name, cgpa, year_of_passing, resume_link)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.name.trim())
    .bind(req.email.trim())
    .bind(req.phone_number)
    .bind(&password_hash)
    .bind(&req.college_name)
    .bind(req.cgpa)
    .bind(req.year_of_passing)
    .bind(&req.resume_link)
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        AppError::conflict_on_unique(e, "Student with this email or phone number already exists")
    })?;

    info!("Student signup: {}", student.email);
    let token = issue_token(&student.email, Role::Student, &state.config.jwt_secret)?;
    Ok((
        StatusCode::CREATED,
        Json(StudentAuthResponse { token, student }),
    ))
}

/// POST /student/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<StudentAuthResponse>, AppError> {
    let student = resolve_student(&state.db, req.email.trim()).await?;
    if !verify_password(&req.password, &student.password_hash)? {
        return Err(AppError::Unauthorized);
    }
    let token = issue_token(&student.email, Role::Student, &state.config.jwt_secret)?;
    Ok(Json(StudentAuthResponse { token, student }))
}

/// GET /student/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    auth: StudentAuth,
) -> Result<Json<Student>, AppError> {
    let student = resolve_student(&state.db, &auth.email).await?;
    Ok(Json(student))
}

/// PUT /student/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    auth: StudentAuth,
    Json(req): Json<StudentProfileUpdate>,
) -> Result<Json<Student>, AppError> {
    let student = resolve_student(&state.db, &auth.email).await?;

    let phone_number = match &req.phone_number {
        Some(raw) => Some(parse_phone(raw)?),
        None => None,
    };

    let updated = sqlx::query_as::<_, Student>(
        r#"
        UPDATE students
        SET name = COALESCE($2, name),
            phone_number = COALESCE($3, phone_number),
            college_name = COALESCE($4, college_name),
            cgpa = COALESCE($5, cgpa),
            year_of_passing = COALESCE($6, year_of_passing),
            resume_link = COALESCE($7, resume_link)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(student.id)
    .bind(&req.name)
    .bind(phone_number)
    .bind(&req.college_name)
    .bind(req.cgpa)
    .bind(req.year_of_passing)
    .bind(&req.resume_link)
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        AppError::conflict_on_unique(e, "Another student already uses this phone number")
    })?;

    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use super::parse_phone;

    #[test]
    fn parses_ten_digit_phone() {
        assert_eq!(parse_phone("9876543210").unwrap(), 9_876_543_210);
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(parse_phone(" 9876543210 ").unwrap(), 9_876_543_210);
    }

    #[test]
    fn rejects_garbage_and_non_positive() {
        assert!(parse_phone("phone").is_err());
        assert!(parse_phone("").is_err());
        assert!(parse_phone("-1").is_err());
        assert!(parse_phone("0").is_err());
    }
}
