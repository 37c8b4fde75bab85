use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::Pool;
use time::{Date, PrimitiveDateTime};
use tracing::debug;

use crate::{Batch, Error, ListingParams, error::Result, now};

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthor {
    #[garde(length(min = 1, max = 100))]
    pub first_name: String,
    #[garde(length(min = 1, max = 100))]
    pub last_name: String,
    #[garde(email, length(max = 255))]
    pub email: String,
    #[garde(length(max = 5000))]
    pub biography: Option<String>,
    #[garde(length(max = 100))]
    pub nationality: Option<String>,
    #[garde(skip)]
    pub birth_date: Option<Date>,
}

/// Partial update - fields left out keep their current value.
#[derive(Debug, Serialize, Deserialize, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthor {
    #[garde(inner(length(min = 1, max = 100)))]
    pub first_name: Option<String>,
    #[garde(inner(length(min = 1, max = 100)))]
    pub last_name: Option<String>,
    #[garde(inner(email, length(max = 255)))]
    pub email: Option<String>,
    #[garde(inner(length(max = 5000)))]
    pub biography: Option<String>,
    #[garde(inner(length(max = 100)))]
    pub nationality: Option<String>,
    #[garde(skip)]
    pub birth_date: Option<Date>,
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub biography: Option<String>,
    pub nationality: Option<String>,
    pub birth_date: Option<Date>,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

pub type AuthorRepository = AuthorRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct AuthorRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> AuthorRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn create(&self, payload: CreateAuthor) -> Result<Author> {
        let ts = now();
        let result = sqlx::query(
            "INSERT INTO authors (first_name, last_name, email, biography, nationality, birth_date, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.email)
        .bind(&payload.biography)
        .bind(&payload.nationality)
        .bind(payload.birth_date)
        .bind(ts)
        .bind(ts)
        .execute(&self.executor)
        .await
        .map_err(|e| map_unique_violation(e, &payload.email))?;

        let id = result.last_insert_rowid();
        debug!("Created author {id}");
        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> Result<Author> {
        let record = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.executor)
            .await?;
        record.ok_or_else(|| Error::RecordNotFound(format!("Author {id}")))
    }

    pub async fn list(&self, params: ListingParams) -> Result<Batch<Author>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.executor)
            .await?;
        let rows = sqlx::query_as::<_, Author>(
            "SELECT * FROM authors ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(params.limit)
        .bind(params.offset)
        .fetch_all(&self.executor)
        .await?;
        Ok(Batch {
            offset: params.offset,
            total: total as u64,
            rows,
        })
    }

    pub async fn update(&self, id: i64, payload: UpdateAuthor) -> Result<Author> {
        let current = self.get(id).await?;

        let email = payload.email.unwrap_or(current.email);
        let result = sqlx::query(
            "UPDATE authors SET first_name = ?, last_name = ?, email = ?, biography = ?, nationality = ?, birth_date = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(payload.first_name.unwrap_or(current.first_name))
        .bind(payload.last_name.unwrap_or(current.last_name))
        .bind(&email)
        .bind(payload.biography.or(current.biography))
        .bind(payload.nationality.or(current.nationality))
        .bind(payload.birth_date.or(current.birth_date))
        .bind(now())
        .bind(id)
        .execute(&self.executor)
        .await
        .map_err(|e| map_unique_violation(e, &email))?;

        if result.rows_affected() == 0 {
            Err(Error::RecordNotFound(format!("Author {id}")))
        } else {
            self.get(id).await
        }
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id)
            .execute(&self.executor)
            .await?;

        if res.rows_affected() == 0 {
            Err(Error::RecordNotFound(format!("Author {id}")))
        } else {
            Ok(())
        }
    }

    pub async fn count(&self) -> Result<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.executor)
            .await?;
        Ok(total as u64)
    }
}

fn map_unique_violation(error: sqlx::Error, email: &str) -> Error {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            Error::EmailAlreadyUsed(email.to_string())
        }
        _ => error.into(),
    }
}
