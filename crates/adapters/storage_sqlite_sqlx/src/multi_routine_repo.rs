//! `SQLite` implementation of [`Repository<MultiRoutine>`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use invhub_app::ports::Repository;
use invhub_domain::error::InvHubError;
use invhub_domain::id::{ItemId, MultiRoutineId};
use invhub_domain::routine::MultiRoutine;

use crate::error::{StorageError, decode_error};

struct Wrapper(MultiRoutine);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let target_id: Option<String> = row.try_get("target_id")?;

        let target_id = target_id
            .map(|s| ItemId::from_str(&s))
            .transpose()
            .map_err(decode_error)?;

        Ok(Self(MultiRoutine {
            id: MultiRoutineId::from_str(&id).map_err(decode_error)?,
            device_id: row.try_get("device_id")?,
            name: row.try_get("name")?,
            status: row.try_get("status")?,
            target_id,
            target_name: row.try_get("target_name")?,
            target_status: row.try_get("target_status")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO multi_routines \
    (id, device_id, name, status, \
    target_id, target_name, target_status) \
    VALUES (?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM multi_routines WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM multi_routines ORDER BY name ASC";
const UPDATE: &str = "UPDATE multi_routines SET \
    device_id = ?, name = ?, status = ?, \
    target_id = ?, target_name = ?, target_status = ? \
    WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM multi_routines WHERE id = ?";

/// `SQLite`-backed multi-device routine repository.
pub struct SqliteMultiRoutineRepository {
    pool: SqlitePool,
}

impl SqliteMultiRoutineRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<MultiRoutine> for SqliteMultiRoutineRepository {
    fn create(
        &self,
        routine: MultiRoutine,
    ) -> impl Future<Output = Result<MultiRoutine, InvHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(routine.id.to_string())
                .bind(&routine.device_id)
                .bind(&routine.name)
                .bind(&routine.status)
                .bind(routine.target_id.map(|id| id.to_string()))
                .bind(&routine.target_name)
                .bind(&routine.target_status)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(routine)
        }
    }

    fn get_by_id(
        &self,
        id: MultiRoutineId,
    ) -> impl Future<Output = Result<Option<MultiRoutine>, InvHubError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<MultiRoutine>, InvHubError>> + Send {
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
        routine: MultiRoutine,
    ) -> impl Future<Output = Result<MultiRoutine, InvHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&routine.device_id)
                .bind(&routine.name)
                .bind(&routine.status)
                .bind(routine.target_id.map(|id| id.to_string()))
                .bind(&routine.target_name)
                .bind(&routine.target_status)
                .bind(routine.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(routine)
        }
    }

    fn delete(&self, id: MultiRoutineId) -> impl Future<Output = Result<(), InvHubError>> + Send {
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

    async fn setup() -> SqliteMultiRoutineRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteMultiRoutineRepository::new(db.pool().clone())
    }

    fn routine() -> MultiRoutine {
        MultiRoutine {
            device_id: "TV".to_string(),
            name: "Movie mode".to_string(),
            status: "on".to_string(),
            target_name: "Lamp".to_string(),
            target_status: "off".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn should_store_missing_target_id_as_null() {
        let repo = setup().await;
        let routine = routine();

        repo.create(routine.clone()).await.unwrap();
        let fetched = repo.get_by_id(routine.id).await.unwrap().unwrap();
        assert_eq!(fetched, routine);
        assert!(fetched.target_id.is_none());
    }

    #[tokio::test]
    async fn should_store_target_id_through_roundtrip() {
        let repo = setup().await;
        let mut routine = routine();
        let target = ItemId::new();
        routine.target_id = Some(target);

        repo.create(routine.clone()).await.unwrap();
        let fetched = repo.get_by_id(routine.id).await.unwrap().unwrap();
        assert_eq!(fetched.target_id, Some(target));
    }

    #[tokio::test]
    async fn should_update_target_status() {
        let repo = setup().await;
        let mut routine = routine();
        repo.create(routine.clone()).await.unwrap();

        routine.target_status = "dim".to_string();
        repo.update(routine.clone()).await.unwrap();

        let fetched = repo.get_by_id(routine.id).await.unwrap().unwrap();
        assert_eq!(fetched.target_status, "dim");
    }
}
