use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::Skill;

/// Deduplicates and upserts skill names into canonical rows.
///
/// Names are matched exactly (case-sensitive): "Go" and "go" are two skills.
/// Idempotent: the same name set always resolves to the same row set.
pub async fn upsert_skills(pool: &PgPool, names: &[String]) -> Result<Vec<Skill>, AppError> {
    let mut skills = Vec::new();
    for name in dedup_names(names) {
        skills.push(find_or_create(pool, &name).await?);
    }
    Ok(skills)
}

/// Find-or-create for one skill name, safe under concurrent first-writers.
///
/// The insert uses `ON CONFLICT DO NOTHING`, so when a concurrent request
/// creates the row between our SELECT and INSERT, the insert returns no row
/// and a second SELECT picks up the winner. This is the only retry in the
/// system (§ no automatic retries elsewhere).
async fn find_or_create(pool: &PgPool, name: &str) -> Result<Skill, AppError> {
    if let Some(existing) = fetch_by_name(pool, name).await? {
        return Ok(existing);
    }

    let inserted = sqlx::query_as::<_, Skill>(
        "INSERT INTO skills (id, name) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING RETURNING id, name",
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .fetch_optional(pool)
    .await?;

    match inserted {
        Some(skill) => Ok(skill),
        // A concurrent writer won the race; their row is now canonical.
        None => fetch_by_name(pool, name).await?.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("skill '{name}' vanished during upsert"))
        }),
    }
}

async fn fetch_by_name(pool: &PgPool, name: &str) -> Result<Option<Skill>, AppError> {
    Ok(
        sqlx::query_as::<_, Skill>("SELECT id, name FROM skills WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await?,
    )
}

/// Replaces a job's skill associations with exactly `skills`, inside the
/// caller's transaction. Full replace: detached skills keep their rows.
pub async fn replace_job_skills(
    tx: &mut Transaction<'_, Postgres>,
    job_id: Uuid,
    skills: &[Skill],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM job_skills WHERE job_id = $1")
        .bind(job_id)
        .execute(&mut **tx)
        .await?;

    for skill in skills {
        sqlx::query("INSERT INTO job_skills (job_id, skill_id) VALUES ($1, $2)")
            .bind(job_id)
            .bind(skill.id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

/// Order-preserving, case-sensitive dedup of the incoming name list.
/// Blank names are dropped; surrounding whitespace is trimmed.
fn dedup_names(names: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut result = Vec::new();
    for name in names {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            result.push(trimmed.to_string());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::dedup_names;

    fn names(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dedup_preserves_first_occurrence_order() {
        let result = dedup_names(&names(&["Go", "SQL", "Go", "Rust", "SQL"]));
        assert_eq!(result, vec!["Go", "SQL", "Rust"]);
    }

    #[test]
    fn dedup_is_case_sensitive() {
        let result = dedup_names(&names(&["Go", "go", "GO"]));
        assert_eq!(result, vec!["Go", "go", "GO"]);
    }

    #[test]
    fn dedup_trims_and_drops_blanks() {
        let result = dedup_names(&names(&["  Go ", "", "   ", "Go"]));
        assert_eq!(result, vec!["Go"]);
    }

    #[test]
    fn dedup_of_empty_input_is_empty() {
        assert!(dedup_names(&[]).is_empty());
    }
}
