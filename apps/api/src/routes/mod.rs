pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::applications::handlers as application_handlers;
use crate::company::handlers as company_handlers;
use crate::jobs::handlers as job_handlers;
use crate::state::AppState;
use crate::student::handlers as student_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Company account
        .route("/company/signup", post(company_handlers::handle_signup))
        .route("/company/login", post(company_handlers::handle_login))
        .route("/company/dashboard", get(company_handlers::handle_dashboard))
        .route(
            "/company/profile",
            put(company_handlers::handle_update_profile),
        )
        // Job catalog (company-scoped)
        .route(
            "/company/dashboard/job",
            post(job_handlers::handle_create_job).get(job_handlers::handle_list_jobs),
        )
        .route(
            "/company/dashboard/job/:id",
            get(job_handlers::handle_get_job)
                .put(job_handlers::handle_update_job)
                .delete(job_handlers::handle_delete_job),
        )
        // Application review (company-scoped)
        .route(
            "/company/jobs/appliedStudents",
            get(application_handlers::handle_applied_students),
        )
        .route(
            "/company/jobs/application/:applicationId/status",
            put(application_handlers::handle_update_status),
        )
        // Student account
        .route("/student/signup", post(student_handlers::handle_signup))
        .route("/student/login", post(student_handlers::handle_login))
        .route("/student/dashboard", get(student_handlers::handle_dashboard))
        .route(
            "/student/profile",
            put(student_handlers::handle_update_profile),
        )
        // Student job browsing and applications
        .route(
            "/student/dashboard/jobsStudent",
            get(job_handlers::handle_browse_jobs),
        )
        .route("/student/apply", post(application_handlers::handle_apply))
        .route(
            "/student/jobsApplied",
            get(application_handlers::handle_jobs_applied),
        )
        .with_state(state)
}
