use super::{MagazineUserParams, store_error, validate};
use crate::authentication::UserId;
use crate::models::{MagazineUser, MagazineUserAPI, Page};
use crate::utils::e500;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, post, web};
use anyhow::Context;
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Deserialize, Debug)]
pub struct ListParams {
    page: Option<i64>,
}

#[get("/magazine-users")]
#[tracing::instrument(
    name = "Listing magazine users",
    skip_all,
    fields(user_id=%&*user_id)
)]
pub async fn get(
    query: web::Query<ListParams>,
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, actix_web::Error> {
    let page: Page<MagazineUserAPI> = MagazineUser::paginate(query.page.unwrap_or(1), &pool)
        .await
        .context("Failed to query magazine users.")
        .map_err(e500)?
        .map(MagazineUserAPI::from);

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .json(page))
}

#[post("/magazine-users")]
#[tracing::instrument(
    name = "Creating a magazine user",
    skip_all,
    fields(user_id=%&*user_id)
)]
pub async fn post(
    params: web::Json<MagazineUserParams>,
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, actix_web::Error> {
    let new_subscriber = validate(params.into_inner(), None, &pool).await?;
    let magazine_user = MagazineUser::insert(&new_subscriber, &pool)
        .await
        .map_err(store_error)?;

    Ok(HttpResponse::Created()
        .content_type(ContentType::json())
        .json(MagazineUserAPI::from(magazine_user)))
}
