use crate::authentication::UserId;
use crate::models::SourceStats;
use crate::utils::{e400, e500};
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, web};
use anyhow::Context;
use serde::Deserialize;
use sqlx::PgPool;

const DEFAULT_RECENT_DAYS: i32 = 30;

#[derive(Deserialize, Debug)]
pub struct StatsParams {
    days: Option<i32>,
}

#[get("/magazine-users/stats")]
#[tracing::instrument(
    name = "Retrieving subscription source statistics",
    skip_all,
    fields(user_id=%&*user_id)
)]
pub async fn get(
    query: web::Query<StatsParams>,
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, actix_web::Error> {
    let days = query.days.unwrap_or(DEFAULT_RECENT_DAYS);
    if days < 1 {
        return Err(e400("The days parameter must be a positive number."));
    }

    let stats = SourceStats::collect(days, &pool)
        .await
        .context("Failed to aggregate subscription sources.")
        .map_err(e500)?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .json(stats))
}
