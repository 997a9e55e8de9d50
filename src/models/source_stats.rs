use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SourceCount {
    pub label: String,
    pub total: i64,
}

impl TryFrom<PgRow> for SourceCount {
    type Error = sqlx::Error;

    fn try_from(row: PgRow) -> Result<Self, Self::Error> {
        Ok(Self {
            label: row.try_get("label")?,
            total: row.try_get("total")?,
        })
    }
}

/// Subscription counts grouped by where they came from.
#[derive(Serialize, Deserialize, Debug)]
pub struct SourceStats {
    pub websites: Vec<SourceCount>,
    pub embed_types: Vec<SourceCount>,
    pub recent_websites: Vec<SourceCount>,
    pub recent_days: i32,
}

impl SourceStats {
    #[tracing::instrument(name = "Aggregating subscription sources", skip(pool))]
    pub async fn collect(recent_days: i32, pool: &PgPool) -> Result<Self, sqlx::Error> {
        Ok(Self {
            websites: website_counts(None, pool).await?,
            embed_types: embed_type_counts(pool).await?,
            recent_websites: website_counts(Some(recent_days), pool).await?,
            recent_days,
        })
    }
}

async fn website_counts(
    within_days: Option<i32>,
    pool: &PgPool,
) -> Result<Vec<SourceCount>, sqlx::Error> {
    sqlx::query(
        r#"
          SELECT COALESCE(source_data->>'website', 'Unknown') AS label, COUNT(*) AS total
          FROM magazine_users
          WHERE source_data IS NOT NULL
            AND ($1::int IS NULL OR created_at >= now() - make_interval(days => $1::int))
          GROUP BY label
          ORDER BY total DESC, label ASC
        "#,
    )
    .bind(within_days)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(SourceCount::try_from)
    .collect()
}

async fn embed_type_counts(pool: &PgPool) -> Result<Vec<SourceCount>, sqlx::Error> {
    sqlx::query(
        r#"
          SELECT COALESCE(source_data->>'embed_type', 'Manual') AS label, COUNT(*) AS total
          FROM magazine_users
          WHERE source_data IS NOT NULL
          GROUP BY label
          ORDER BY total DESC, label ASC
        "#,
    )
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(SourceCount::try_from)
    .collect()
}
