//! SQLite subscription repository implementation.
//!
//! Implements `SubscriptionRepository` from `polychat-core`. The chat
//! core only reads this table; rows are written by the payments side of
//! the system.

use polychat_core::entitlement::SubscriptionRepository;
use polychat_types::error::RepositoryError;
use polychat_types::subscription::{Subscription, SubscriptionStatus};
use sqlx::Row;

use super::pool::DatabasePool;
use super::parse_datetime;

/// SQLite-backed implementation of `SubscriptionRepository`.
pub struct SqliteSubscriptionRepository {
    pool: DatabasePool,
}

impl SqliteSubscriptionRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn subscription_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Subscription, RepositoryError> {
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let status: String = row
        .try_get("status")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let price_id: Option<String> = row
        .try_get("price_id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(Subscription {
        user_id,
        status: status
            .parse::<SubscriptionStatus>()
            .map_err(RepositoryError::Query)?,
        price_id,
        created_at: parse_datetime(&created_at)?,
    })
}

impl SubscriptionRepository for SqliteSubscriptionRepository {
    async fn find_active(&self, user_id: &str) -> Result<Option<Subscription>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM subscriptions WHERE user_id = ? AND status = 'active'",
        )
        .bind(user_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        // Exactly one active row grants entitlement; several is a data
        // anomaly that must not silently resolve either way.
        match rows.as_slice() {
            [] => Ok(None),
            [row] => Ok(Some(subscription_from_row(row)?)),
            _ => Err(RepositoryError::Conflict(format!(
                "user '{user_id}' has {} active subscriptions",
                rows.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::format_datetime;
    use chrono::Utc;
    use uuid::Uuid;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    async fn insert_subscription(pool: &DatabasePool, user_id: &str, status: &str) {
        sqlx::query(
            "INSERT INTO subscriptions (id, user_id, status, price_id, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(Uuid::now_v7().to_string())
        .bind(user_id)
        .bind(status)
        .bind(Some("price_basic"))
        .bind(format_datetime(&Utc::now()))
        .execute(&pool.writer)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_no_rows_is_confirmed_absence() {
        let pool = test_pool().await;
        let repo = SqliteSubscriptionRepository::new(pool);
        assert!(repo.find_active("u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_single_active_row_found() {
        let pool = test_pool().await;
        insert_subscription(&pool, "u1", "active").await;
        let repo = SqliteSubscriptionRepository::new(pool);

        let sub = repo.find_active("u1").await.unwrap().unwrap();
        assert_eq!(sub.user_id, "u1");
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.price_id.as_deref(), Some("price_basic"));
    }

    #[tokio::test]
    async fn test_inactive_rows_do_not_count() {
        let pool = test_pool().await;
        insert_subscription(&pool, "u1", "canceled").await;
        insert_subscription(&pool, "u1", "past_due").await;
        let repo = SqliteSubscriptionRepository::new(pool);

        assert!(repo.find_active("u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_multiple_active_rows_is_an_anomaly() {
        let pool = test_pool().await;
        insert_subscription(&pool, "u1", "active").await;
        insert_subscription(&pool, "u1", "active").await;
        let repo = SqliteSubscriptionRepository::new(pool);

        let err = repo.find_active("u1").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_scoped_to_user() {
        let pool = test_pool().await;
        insert_subscription(&pool, "u2", "active").await;
        let repo = SqliteSubscriptionRepository::new(pool);

        assert!(repo.find_active("u1").await.unwrap().is_none());
    }
}
