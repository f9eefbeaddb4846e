//! `SQLite` implementation of [`Repository<MixRoutine>`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use invhub_app::ports::Repository;
use invhub_domain::error::InvHubError;
use invhub_domain::id::{ItemId, MixRoutineId};
use invhub_domain::routine::MixRoutine;

use crate::error::{StorageError, decode_error};

struct Wrapper(MixRoutine);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let target_id: Option<String> = row.try_get("target_id")?;

        let target_id = target_id
            .map(|s| ItemId::from_str(&s))
            .transpose()
            .map_err(decode_error)?;

        Ok(Self(MixRoutine {
            id: MixRoutineId::from_str(&id).map_err(decode_error)?,
            device_id: row.try_get("device_id")?,
            name: row.try_get("name")?,
            time: row.try_get("time")?,
            status: row.try_get("status")?,
            target_id,
            target_name: row.try_get("target_name")?,
            target_status: row.try_get("target_status")?,
            end_time: row.try_get("end_time")?,
            start_time: row.try_get("start_time")?,
            duration: row.try_get("duration")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO mix_routines \
    (id, device_id, name, time, status, target_id, \
    target_name, target_status, end_time, start_time, duration) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM mix_routines WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM mix_routines ORDER BY name ASC";
const UPDATE: &str = "UPDATE mix_routines SET \
    device_id = ?, name = ?, time = ?, status = ?, target_id = ?, \
    target_name = ?, target_status = ?, end_time = ?, start_time = ?, duration = ? \
    WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM mix_routines WHERE id = ?";

/// `SQLite`-backed mix routine repository.
pub struct SqliteMixRoutineRepository {
    pool: SqlitePool,
}

impl SqliteMixRoutineRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<MixRoutine> for SqliteMixRoutineRepository {
    fn create(
        &self,
        routine: MixRoutine,
    ) -> impl Future<Output = Result<MixRoutine, InvHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(routine.id.to_string())
                .bind(&routine.device_id)
                .bind(&routine.name)
                .bind(&routine.time)
                .bind(&routine.status)
                .bind(routine.target_id.map(|id| id.to_string()))
                .bind(&routine.target_name)
                .bind(&routine.target_status)
                .bind(&routine.end_time)
                .bind(&routine.start_time)
                .bind(&routine.duration)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(routine)
        }
    }

    fn get_by_id(
        &self,
        id: MixRoutineId,
    ) -> impl Future<Output = Result<Option<MixRoutine>, InvHubError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<MixRoutine>, InvHubError>> + Send {
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
        routine: MixRoutine,
    ) -> impl Future<Output = Result<MixRoutine, InvHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&routine.device_id)
                .bind(&routine.name)
                .bind(&routine.time)
                .bind(&routine.status)
                .bind(routine.target_id.map(|id| id.to_string()))
                .bind(&routine.target_name)
                .bind(&routine.target_status)
                .bind(&routine.end_time)
                .bind(&routine.start_time)
                .bind(&routine.duration)
                .bind(routine.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(routine)
        }
    }

    fn delete(&self, id: MixRoutineId) -> impl Future<Output = Result<(), InvHubError>> + Send {
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

    async fn setup() -> SqliteMixRoutineRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteMixRoutineRepository::new(db.pool().clone())
    }

    fn routine(name: &str) -> MixRoutine {
        MixRoutine {
            device_id: "Door sensor".to_string(),
            name: name.to_string(),
            time: "30".to_string(),
            status: "open".to_string(),
            target_id: Some(ItemId::new()),
            target_name: "Hall light".to_string(),
            target_status: "on".to_string(),
            end_time: "06:00".to_string(),
            start_time: "22:00".to_string(),
            duration: "28800".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn should_store_every_field_through_roundtrip() {
        let repo = setup().await;
        let mix = routine("Night entry");

        repo.create(mix.clone()).await.unwrap();
        let fetched = repo.get_by_id(mix.id).await.unwrap().unwrap();
        assert_eq!(fetched, mix);
    }

    #[tokio::test]
    async fn should_list_and_delete_mix_routines() {
        let repo = setup().await;
        let first = routine("B routine");
        repo.create(first.clone()).await.unwrap();
        repo.create(routine("A routine")).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all[0].name, "A routine");

        repo.delete(first.id).await.unwrap();
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }
}
