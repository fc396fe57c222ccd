use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Application status. Flat state machine: every status is reachable from
/// every other, since a company may revise a decision. The guard on who may
/// write it lives in `guard::ensure_application_owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Rejected,
}

impl ApplicationStatus {
    /// Parses the wire representation. Returns `None` for anything outside
    /// the three known states; callers map that to a validation error.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Applied" => Some(ApplicationStatus::Applied),
            "Shortlisted" => Some(ApplicationStatus::Shortlisted),
            "Rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub job_id: Uuid,
    pub status: String,
    pub applied_at: DateTime<Utc>,
}

/// An application joined with the applicant's contact fields, for the
/// company's applicant-review view.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicantRecord {
    pub application_id: Uuid,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub student_name: String,
    pub student_email: String,
    #[serde(with = "crate::models::student::phone_string")]
    pub phone_number: i64,
    pub college_name: Option<String>,
    pub resume_link: Option<String>,
}

/// The student's own view of an application: which job, what status.
/// Deliberately narrow so one student's listing never leaks another's data.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AppliedJob {
    pub job_id: Uuid,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses() {
        assert_eq!(
            ApplicationStatus::parse("Applied"),
            Some(ApplicationStatus::Applied)
        );
        assert_eq!(
            ApplicationStatus::parse("Shortlisted"),
            Some(ApplicationStatus::Shortlisted)
        );
        assert_eq!(
            ApplicationStatus::parse("Rejected"),
            Some(ApplicationStatus::Rejected)
        );
    }

    #[test]
    fn rejects_unknown_and_miscased_statuses() {
        assert_eq!(ApplicationStatus::parse("applied"), None);
        assert_eq!(ApplicationStatus::parse("SHORTLISTED"), None);
        assert_eq!(ApplicationStatus::parse("Hired"), None);
        assert_eq!(ApplicationStatus::parse(""), None);
    }

    #[test]
    fn as_str_round_trips() {
        for status in [
            ApplicationStatus::Applied,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
    }
}
