use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// VerificationRecord - maps an application number to a contact email
///
/// Records are seeded ahead of time, one per admitted application. Each
/// record may complete verification exactly once: after a successful flow
/// `used` flips to true and the record never yields a passcode again.
/// Records are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VerificationRecord {
    pub id: i64,
    pub application_number: String,
    pub email: String,
    pub used: bool,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl VerificationRecord {
    /// Find a record by application number
    pub async fn find_by_application_number(
        application_number: &str,
        pool: &SqlitePool,
    ) -> Result<Option<Self>> {
        let record = sqlx::query_as::<_, VerificationRecord>(
            "SELECT id, application_number, email, used FROM verification_records WHERE application_number = ?",
        )
        .bind(application_number)
        .fetch_optional(pool)
        .await?;
        Ok(record)
    }

    /// Mark the record as used after a completed verification
    pub async fn mark_used(&self, pool: &SqlitePool) -> Result<()> {
        sqlx::query("UPDATE verification_records SET used = TRUE WHERE id = ?")
            .bind(self.id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Insert a fresh, unused record
    pub async fn create(
        application_number: &str,
        email: &str,
        pool: &SqlitePool,
    ) -> Result<Self> {
        let record = sqlx::query_as::<_, VerificationRecord>(
            r#"
            INSERT INTO verification_records (application_number, email)
            VALUES (?, ?)
            RETURNING id, application_number, email, used
            "#,
        )
        .bind(application_number)
        .bind(email)
        .fetch_one(pool)
        .await?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        sqlx::migrate!().run(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let created = VerificationRecord::create("A100", "x@y.com", &pool)
            .await
            .unwrap();
        assert!(!created.used);

        let found = VerificationRecord::find_by_application_number("A100", &pool)
            .await
            .unwrap()
            .expect("record should exist");
        assert_eq!(found.id, created.id);
        assert_eq!(found.email, "x@y.com");
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let pool = test_pool().await;
        let found = VerificationRecord::find_by_application_number("nope", &pool)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_mark_used_persists() {
        let pool = test_pool().await;
        let record = VerificationRecord::create("A200", "z@y.com", &pool)
            .await
            .unwrap();
        record.mark_used(&pool).await.unwrap();

        let reloaded = VerificationRecord::find_by_application_number("A200", &pool)
            .await
            .unwrap()
            .unwrap();
        assert!(reloaded.used, "used flag should persist");
    }
}
