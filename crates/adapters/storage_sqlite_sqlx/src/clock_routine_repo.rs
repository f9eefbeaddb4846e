//! `SQLite` implementation of [`Repository<ClockRoutine>`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use invhub_app::ports::Repository;
use invhub_domain::error::InvHubError;
use invhub_domain::id::ClockRoutineId;
use invhub_domain::routine::ClockRoutine;

use crate::error::{StorageError, decode_error};

struct Wrapper(ClockRoutine);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;

        Ok(Self(ClockRoutine {
            id: ClockRoutineId::from_str(&id).map_err(decode_error)?,
            device_id: row.try_get("device_id")?,
            name: row.try_get("name")?,
            duration: row.try_get("duration")?,
            status: row.try_get("status")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO clock_routines (id, device_id, name, duration, status) \
    VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM clock_routines WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM clock_routines ORDER BY name ASC";
const UPDATE: &str = "UPDATE clock_routines SET device_id = ?, name = ?, duration = ?, status = ? \
    WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM clock_routines WHERE id = ?";

/// `SQLite`-backed clock routine repository.
pub struct SqliteClockRoutineRepository {
    pool: SqlitePool,
}

impl SqliteClockRoutineRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<ClockRoutine> for SqliteClockRoutineRepository {
    fn create(
        &self,
        routine: ClockRoutine,
    ) -> impl Future<Output = Result<ClockRoutine, InvHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(routine.id.to_string())
                .bind(&routine.device_id)
                .bind(&routine.name)
                .bind(&routine.duration)
                .bind(&routine.status)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(routine)
        }
    }

    fn get_by_id(
        &self,
        id: ClockRoutineId,
    ) -> impl Future<Output = Result<Option<ClockRoutine>, InvHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<ClockRoutine>, InvHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        routine: ClockRoutine,
    ) -> impl Future<Output = Result<ClockRoutine, InvHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&routine.device_id)
                .bind(&routine.name)
                .bind(&routine.duration)
                .bind(&routine.status)
                .bind(routine.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(routine)
        }
    }

    fn delete(&self, id: ClockRoutineId) -> impl Future<Output = Result<(), InvHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteClockRoutineRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteClockRoutineRepository::new(db.pool().clone())
    }

    #[tokio::test]
    async fn should_create_and_retrieve_clock_routine() {
        let repo = setup().await;
        let routine = ClockRoutine {
            device_id: "Coffee maker".to_string(),
            name: "Brew".to_string(),
            duration: "6:45".to_string(),
            status: "on".to_string(),
            ..Default::default()
        };

        repo.create(routine.clone()).await.unwrap();
        let fetched = repo.get_by_id(routine.id).await.unwrap().unwrap();
        assert_eq!(fetched, routine);
    }

    #[tokio::test]
    async fn should_return_none_when_clock_routine_not_found() {
        let repo = setup().await;
        let result = repo.get_by_id(ClockRoutineId::new()).await.unwrap();
        assert!(result.is_none());
    }
}
