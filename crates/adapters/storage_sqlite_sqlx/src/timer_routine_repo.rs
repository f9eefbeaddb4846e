//! `SQLite` implementation of [`Repository<TimerRoutine>`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use invhub_app::ports::Repository;
use invhub_domain::error::InvHubError;
use invhub_domain::id::TimerRoutineId;
use invhub_domain::routine::TimerRoutine;

use crate::error::{StorageError, decode_error};

struct Wrapper(TimerRoutine);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;

        Ok(Self(TimerRoutine {
            id: TimerRoutineId::from_str(&id).map_err(decode_error)?,
            name: row.try_get("name")?,
            start_time: row.try_get("start_time")?,
            end_time: row.try_get("end_time")?,
            duration: row.try_get("duration")?,
            status: row.try_get("status")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO timer_routines \
    (id, name, start_time, \
    end_time, duration, status) \
    VALUES (?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM timer_routines WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM timer_routines ORDER BY name ASC";
const UPDATE: &str = "UPDATE timer_routines SET \
    name = ?, start_time = ?, end_time = ?, \
    duration = ?, status = ? \
    WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM timer_routines WHERE id = ?";

/// `SQLite`-backed timer routine repository.
pub struct SqliteTimerRoutineRepository {
    pool: SqlitePool,
}

impl SqliteTimerRoutineRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<TimerRoutine> for SqliteTimerRoutineRepository {
    fn create(
        &self,
        routine: TimerRoutine,
    ) -> impl Future<Output = Result<TimerRoutine, InvHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(routine.id.to_string())
                .bind(&routine.name)
                .bind(&routine.start_time)
                .bind(&routine.end_time)
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
        id: TimerRoutineId,
    ) -> impl Future<Output = Result<Option<TimerRoutine>, InvHubError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<TimerRoutine>, InvHubError>> + Send {
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
        routine: TimerRoutine,
    ) -> impl Future<Output = Result<TimerRoutine, InvHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&routine.name)
                .bind(&routine.start_time)
                .bind(&routine.end_time)
                .bind(&routine.duration)
                .bind(&routine.status)
                .bind(routine.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(routine)
        }
    }

    fn delete(&self, id: TimerRoutineId) -> impl Future<Output = Result<(), InvHubError>> + Send {
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
