use std::fmt::Display;

use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::Pool;
use time::PrimitiveDateTime;
use tracing::debug;

use crate::{Error, ListingParams, error::Result, now};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum EditorialStatus {
    Draft,
    InReview,
    Approved,
    Published,
    Rejected,
}

impl Default for EditorialStatus {
    fn default() -> Self {
        EditorialStatus::Draft
    }
}

impl Display for EditorialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EditorialStatus::Draft => "DRAFT",
            EditorialStatus::InReview => "INREVIEW",
            EditorialStatus::Approved => "APPROVED",
            EditorialStatus::Published => "PUBLISHED",
            EditorialStatus::Rejected => "REJECTED",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePublication {
    #[garde(length(min = 1, max = 255))]
    pub title: String,
    #[garde(range(min = 1))]
    pub author_id: i64,
    #[garde(length(max = 100_000))]
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub id: i64,
    pub title: String,
    pub author_id: i64,
    pub content: Option<String>,
    pub status: EditorialStatus,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

pub type PublicationRepository = PublicationRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct PublicationRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> PublicationRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// New publications always start in DRAFT.
    pub async fn create(&self, payload: CreatePublication) -> Result<Publication> {
        let ts = now();
        let result = sqlx::query(
            "INSERT INTO publications (title, author_id, content, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&payload.title)
        .bind(payload.author_id)
        .bind(&payload.content)
        .bind(EditorialStatus::Draft)
        .bind(ts)
        .bind(ts)
        .execute(&self.executor)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Created publication {id}");
        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> Result<Publication> {
        let record = sqlx::query_as::<_, Publication>("SELECT * FROM publications WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.executor)
            .await?;
        record.ok_or_else(|| Error::RecordNotFound(format!("Publication {id}")))
    }

    pub async fn list(&self, params: ListingParams) -> Result<Vec<Publication>> {
        let rows = sqlx::query_as::<_, Publication>(
            "SELECT * FROM publications ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(params.limit)
        .bind(params.offset)
        .fetch_all(&self.executor)
        .await?;
        Ok(rows)
    }

    /// Transitions are not constrained - any status may be set at any time,
    /// the linear editorial flow is advisory only.
    pub async fn change_status(&self, id: i64, status: EditorialStatus) -> Result<Publication> {
        let result = sqlx::query("UPDATE publications SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(now())
            .bind(id)
            .execute(&self.executor)
            .await?;

        if result.rows_affected() == 0 {
            Err(Error::RecordNotFound(format!("Publication {id}")))
        } else {
            self.get(id).await
        }
    }

    pub async fn count(&self) -> Result<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM publications")
            .fetch_one(&self.executor)
            .await?;
        Ok(total as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_names() {
        for (status, name) in [
            (EditorialStatus::Draft, "\"DRAFT\""),
            (EditorialStatus::InReview, "\"INREVIEW\""),
            (EditorialStatus::Approved, "\"APPROVED\""),
            (EditorialStatus::Published, "\"PUBLISHED\""),
            (EditorialStatus::Rejected, "\"REJECTED\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), name);
            let parsed: EditorialStatus = serde_json::from_str(name).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn unknown_status_rejected() {
        let parsed: Result<EditorialStatus, _> = serde_json::from_str("\"ARCHIVED\"");
        assert!(parsed.is_err());
    }
}
