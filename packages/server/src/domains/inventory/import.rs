//! Bulk phone-number import from uploaded line-delimited text.

use sqlx::PgPool;
use tracing::warn;

/// Only numbers carrying this prefix are accepted by the importer.
pub const PHONE_PREFIX: &str = "8459";

/// Trim every line, drop blanks, keep only numbers with the required prefix.
pub fn candidate_lines(data: &str) -> Vec<&str> {
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.starts_with(PHONE_PREFIX))
        .collect()
}

/// Insert every new candidate number, sequentially. Numbers already in the
/// inventory are skipped via the unique constraint, and per-line failures
/// are logged and skipped rather than failing the whole import. Returns the
/// number of rows actually inserted.
pub async fn import_phones(pool: &PgPool, data: &str) -> u64 {
    let mut inserted = 0u64;

    for phone in candidate_lines(data) {
        let result = sqlx::query(
            "INSERT INTO phones (phone, status) VALUES ($1, NULL) ON CONFLICT (phone) DO NOTHING",
        )
        .bind(phone)
        .execute(pool)
        .await;

        match result {
            Ok(done) => inserted += done.rows_affected(),
            Err(error) => warn!(phone, %error, "failed to insert imported phone, skipping"),
        }
    }

    inserted
}

#[cfg(test)]
mod tests {
    use super::candidate_lines;

    #[test]
    fn keeps_only_trimmed_prefixed_lines() {
        let input = "8459001\n  \n12345\n 8459002 \n";
        assert_eq!(candidate_lines(input), vec!["8459001", "8459002"]);
    }

    #[test]
    fn duplicates_survive_filtering() {
        // De-duplication happens at the store, not here.
        let input = "8459001\n8459001\n";
        assert_eq!(candidate_lines(input), vec!["8459001", "8459001"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(candidate_lines("").is_empty());
        assert!(candidate_lines("\n  \n\n").is_empty());
    }
}
