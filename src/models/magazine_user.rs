use crate::domain::source_data::{EMBED_TYPE, URL, WEBSITE};
use crate::domain::{FieldErrors, NewSubscriber, SourceData};
use crate::models::Page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub const PER_PAGE: i64 = 20;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MagazineUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub source_data: Option<SourceData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PgRow> for MagazineUser {
    type Error = sqlx::Error;

    fn try_from(row: PgRow) -> Result<Self, Self::Error> {
        let source_data: Option<Json<SourceData>> = row.try_get("source_data")?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            source_data: source_data.map(|json| json.0),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Failure to write a record, separating duplicate emails from everything else.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Validation(FieldErrors),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    fn from_write(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                StoreError::Validation(FieldErrors::email_taken())
            }
            _ => StoreError::Database(e),
        }
    }
}

impl MagazineUser {
    #[tracing::instrument(name = "Saving new magazine user details in the database", skip_all)]
    pub async fn insert(new_subscriber: &NewSubscriber, pool: &PgPool) -> Result<Self, StoreError> {
        let row = sqlx::query(
            r#"
              INSERT INTO magazine_users (id, name, email, source_data, created_at, updated_at)
              VALUES ($1, $2, $3, $4, now(), now())
              RETURNING id, name, email, source_data, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_subscriber.name.as_ref())
        .bind(new_subscriber.email.as_ref())
        .bind(new_subscriber.source_data.as_ref().map(Json))
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_write)?;

        Ok(Self::try_from(row)?)
    }

    pub async fn find(id: &Uuid, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query(
            r#"
              SELECT id, name, email, source_data, created_at, updated_at
              FROM magazine_users
              WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Self::try_from)
        .transpose()
    }

    /// Whether another record already uses `email`. `except` leaves one record out.
    pub async fn email_taken(
        email: &str,
        except: Option<&Uuid>,
        pool: &PgPool,
    ) -> Result<bool, sqlx::Error> {
        let row = sqlx::query(
            r#"
              SELECT EXISTS (
                SELECT 1 FROM magazine_users
                WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)
              ) AS taken
            "#,
        )
        .bind(email)
        .bind(except)
        .fetch_one(pool)
        .await?;

        row.try_get("taken")
    }

    /// Most recently created first.
    pub async fn paginate(page: i64, pool: &PgPool) -> Result<Page<Self>, sqlx::Error> {
        let page = page.max(1);
        let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM magazine_users")
            .fetch_one(pool)
            .await?
            .try_get("total")?;
        // A page too far out to address is simply empty.
        let Some(offset) = (page - 1).checked_mul(PER_PAGE) else {
            return Ok(Page::new(vec![], page, PER_PAGE, total));
        };
        let data = sqlx::query(
            r#"
              SELECT id, name, email, source_data, created_at, updated_at
              FROM magazine_users
              ORDER BY created_at DESC, id DESC
              LIMIT $1 OFFSET $2
            "#,
        )
        .bind(PER_PAGE)
        .bind(offset)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(Self::try_from)
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(data, page, PER_PAGE, total))
    }

    #[tracing::instrument(name = "Updating magazine user details", skip_all, fields(id=%self.id))]
    pub async fn update(
        self,
        name: &str,
        email: &str,
        pool: &PgPool,
    ) -> Result<Self, StoreError> {
        let row = sqlx::query(
            r#"
              UPDATE magazine_users
              SET name = $1,
                  email = $2,
                  updated_at = now()
              WHERE id = $3
              RETURNING id, name, email, source_data, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(self.id)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_write)?;

        Ok(Self::try_from(row)?)
    }

    /// Returns whether a record was removed.
    pub async fn delete(id: &Uuid, pool: &PgPool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM magazine_users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn source_website(&self) -> Option<&str> {
        self.source_data.as_ref().and_then(|data| data.get(WEBSITE))
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_data.as_ref().and_then(|data| data.get(URL))
    }

    pub fn embed_type(&self) -> Option<&str> {
        self.source_data.as_ref().and_then(|data| data.get(EMBED_TYPE))
    }
}

/// Shape returned by the admin endpoints, with the attribution shortcuts flattened in.
#[derive(Serialize, Deserialize, Debug)]
pub struct MagazineUserAPI {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub source_data: Option<SourceData>,
    pub source_website: Option<String>,
    pub source_url: Option<String>,
    pub embed_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MagazineUser> for MagazineUserAPI {
    fn from(magazine_user: MagazineUser) -> Self {
        Self {
            source_website: magazine_user.source_website().map(str::to_string),
            source_url: magazine_user.source_url().map(str::to_string),
            embed_type: magazine_user.embed_type().map(str::to_string),
            id: magazine_user.id,
            name: magazine_user.name,
            email: magazine_user.email,
            source_data: magazine_user.source_data,
            created_at: magazine_user.created_at,
            updated_at: magazine_user.updated_at,
        }
    }
}

/// The fields an admin may change.
#[derive(Serialize, Deserialize, Debug)]
pub struct MagazineUserForm {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<MagazineUser> for MagazineUserForm {
    fn from(magazine_user: MagazineUser) -> Self {
        Self {
            id: magazine_user.id,
            name: magazine_user.name,
            email: magazine_user.email,
        }
    }
}
