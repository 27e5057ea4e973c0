//! # Session Repository
//!
//! Appends and reads finished sessions.
//!
//! Rows store the status as its ordinal; reading a row with an ordinal the
//! current build does not know is reported as [`DbError::InvalidRow`].

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use pacekeeper_core::{AppStatus, SessionRecord};

/// Raw `sessions` row.
#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    id: String,
    status: i64,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    duration_secs: i64,
    cycles: i64,
}

impl TryFrom<SessionRow> for SessionRecord {
    type Error = DbError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        Ok(SessionRecord {
            id: row.id,
            status: AppStatus::from_value_int(row.status)?,
            started_at: row.started_at,
            ended_at: row.ended_at,
            duration_secs: row.duration_secs,
            cycles: row.cycles,
        })
    }
}

/// Repository for session records.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.sessions();
/// let record = repo.record(AppStatus::Study, started_at, Utc::now(), 3).await?;
/// let recent = repo.recent(10).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Creates a new SessionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SessionRepository { pool }
    }

    /// Records one finished session.
    ///
    /// ## Arguments
    /// * `status` - Phase being recorded
    /// * `started_at` / `ended_at` - Bounds of the run; an end before the
    ///   start is stored with zero duration
    /// * `cycles` - Cycle counter when the run ended
    pub async fn record(
        &self,
        status: AppStatus,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        cycles: u64,
    ) -> DbResult<SessionRecord> {
        let record = SessionRecord {
            id: Uuid::new_v4().to_string(),
            status,
            started_at,
            ended_at,
            duration_secs: SessionRecord::duration_between(started_at, ended_at),
            cycles: i64::try_from(cycles).unwrap_or(i64::MAX),
        };

        debug!(
            id = %record.id,
            status = %record.status.as_str(),
            duration_secs = record.duration_secs,
            cycles = record.cycles,
            "Recording session"
        );

        sqlx::query(
            r#"
            INSERT INTO sessions (
                id, status, started_at, ended_at, duration_secs, cycles
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6
            )
            "#,
        )
        .bind(&record.id)
        .bind(record.status.value_int())
        .bind(record.started_at)
        .bind(record.ended_at)
        .bind(record.duration_secs)
        .bind(record.cycles)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    /// Gets a session by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<SessionRecord> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, status, started_at, ended_at, duration_secs, cycles
            FROM sessions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Session", id))?;

        row.try_into()
    }

    /// Most recent sessions first.
    pub async fn recent(&self, limit: u32) -> DbResult<Vec<SessionRecord>> {
        let rows = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, status, started_at, ended_at, duration_secs, cycles
            FROM sessions
            ORDER BY started_at DESC, rowid DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded recent sessions");
        rows.into_iter().map(SessionRecord::try_from).collect()
    }

    /// Counts all recorded sessions.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Total recorded seconds for one status.
    pub async fn total_duration_secs(&self, status: AppStatus) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(duration_secs), 0) FROM sessions WHERE status = ?1",
        )
        .bind(status.value_int())
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::Duration;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_record_and_get() {
        let db = test_db().await;
        let start = Utc::now() - Duration::minutes(25);
        let end = start + Duration::minutes(25);

        let record = db
            .sessions()
            .record(AppStatus::Study, start, end, 3)
            .await
            .unwrap();

        assert_eq!(record.duration_secs, 1500);
        assert_eq!(record.cycles, 3);

        let loaded = db.sessions().get_by_id(&record.id).await.unwrap();
        assert_eq!(loaded.id, record.id);
        assert_eq!(loaded.status, AppStatus::Study);
        assert_eq!(loaded.duration_secs, 1500);
        assert_eq!(loaded.cycles, 3);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let db = test_db().await;

        let err = db.sessions().get_by_id("nope").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_end_before_start_is_zero_duration() {
        let db = test_db().await;
        let start = Utc::now();

        let record = db
            .sessions()
            .record(AppStatus::Study, start, start - Duration::seconds(5), 0)
            .await
            .unwrap();

        assert_eq!(record.duration_secs, 0);
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_and_limited() {
        let db = test_db().await;
        let repo = db.sessions();
        let base = Utc::now() - Duration::hours(3);

        for i in 0..3 {
            let start = base + Duration::hours(i);
            repo.record(AppStatus::Study, start, start + Duration::minutes(10), i as u64)
                .await
                .unwrap();
        }

        let recent = repo.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].cycles, 2);
        assert_eq!(recent[1].cycles, 1);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_total_duration_by_status() {
        let db = test_db().await;
        let repo = db.sessions();
        let start = Utc::now() - Duration::hours(1);

        repo.record(AppStatus::Study, start, start + Duration::minutes(25), 1)
            .await
            .unwrap();
        repo.record(AppStatus::Study, start, start + Duration::minutes(5), 1)
            .await
            .unwrap();
        repo.record(AppStatus::ShortBreak, start, start + Duration::minutes(5), 1)
            .await
            .unwrap();

        assert_eq!(repo.total_duration_secs(AppStatus::Study).await.unwrap(), 1800);
        assert_eq!(
            repo.total_duration_secs(AppStatus::LongBreak).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_unknown_ordinal_is_invalid_row() {
        let db = test_db().await;

        // The CHECK constraint normally keeps unknown ordinals out.
        sqlx::query("PRAGMA ignore_check_constraints = ON")
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO sessions (id, status, started_at, ended_at, duration_secs, cycles) \
             VALUES ('bad', 9, ?1, ?1, 0, 0)",
        )
        .bind(Utc::now())
        .execute(db.pool())
        .await
        .unwrap();

        let err = db.sessions().get_by_id("bad").await.unwrap_err();
        assert!(matches!(err, DbError::InvalidRow(_)));
    }
}
