//! `SQLite` implementation of [`Repository<Item>`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use invhub_app::ports::Repository;
use invhub_domain::error::InvHubError;
use invhub_domain::id::ItemId;
use invhub_domain::item::Item;

use crate::error::{StorageError, decode_error};

/// Wrapper for converting database rows into domain [`Item`].
struct Wrapper(Item);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Item> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;

        Ok(Self(Item {
            id: ItemId::from_str(&id).map_err(decode_error)?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            quantity: row.try_get("quantity")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO items (id, name, price, quantity) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM items WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM items ORDER BY name ASC";
const UPDATE: &str = "UPDATE items SET name = ?, price = ?, quantity = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM items WHERE id = ?";

/// `SQLite`-backed item repository.
pub struct SqliteItemRepository {
    pool: SqlitePool,
}

impl SqliteItemRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<Item> for SqliteItemRepository {
    fn create(&self, item: Item) -> impl Future<Output = Result<Item, InvHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(item.id.to_string())
                .bind(&item.name)
                .bind(item.price)
                .bind(item.quantity)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(item)
        }
    }

    fn get_by_id(
        &self,
        id: ItemId,
    ) -> impl Future<Output = Result<Option<Item>, InvHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Item>, InvHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, item: Item) -> impl Future<Output = Result<Item, InvHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&item.name)
                .bind(item.price)
                .bind(item.quantity)
                .bind(item.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(item)
        }
    }

    fn delete(&self, id: ItemId) -> impl Future<Output = Result<(), InvHubError>> + Send {
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
