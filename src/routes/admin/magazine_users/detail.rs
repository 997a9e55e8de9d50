use super::{MagazineUserParams, store_error, validate};
use crate::authentication::UserId;
use crate::models::{MagazineUser, MagazineUserAPI, MagazineUserForm};
use crate::utils::{ResponseMessage, e404, e500};
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, delete, get, put, web};
use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

async fn find_or_404(id: &Uuid, pool: &PgPool) -> Result<MagazineUser, actix_web::Error> {
    MagazineUser::find(id, pool)
        .await
        .context("Failed to query magazine user.")
        .map_err(e500)?
        .ok_or_else(|| e404(format!("Magazine user {} does not exist.", id)))
}

#[get("/magazine-users/{id}")]
#[tracing::instrument(
    name = "Showing a magazine user",
    skip_all,
    fields(user_id=%&*user_id)
)]
pub async fn get(
    path: web::Path<(Uuid,)>,
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, actix_web::Error> {
    let magazine_user = find_or_404(&path.into_inner().0, &pool).await?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .json(MagazineUserAPI::from(magazine_user)))
}

#[get("/magazine-users/{id}/edit")]
#[tracing::instrument(
    name = "Loading a magazine user for editing",
    skip_all,
    fields(user_id=%&*user_id)
)]
pub async fn edit(
    path: web::Path<(Uuid,)>,
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, actix_web::Error> {
    let magazine_user = find_or_404(&path.into_inner().0, &pool).await?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .json(MagazineUserForm::from(magazine_user)))
}

#[put("/magazine-users/{id}")]
#[tracing::instrument(
    name = "Updating a magazine user",
    skip_all,
    fields(user_id=%&*user_id)
)]
pub async fn put(
    params: web::Json<MagazineUserParams>,
    path: web::Path<(Uuid,)>,
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, actix_web::Error> {
    let id = path.into_inner().0;
    let magazine_user = find_or_404(&id, &pool).await?;
    let details = validate(params.into_inner(), Some(&id), &pool).await?;
    let magazine_user = magazine_user
        .update(details.name.as_ref(), details.email.as_ref(), &pool)
        .await
        .map_err(store_error)?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .json(MagazineUserAPI::from(magazine_user)))
}

#[delete("/magazine-users/{id}")]
#[tracing::instrument(
    name = "Deleting a magazine user",
    skip_all,
    fields(user_id=%&*user_id)
)]
pub async fn delete(
    path: web::Path<(Uuid,)>,
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, actix_web::Error> {
    let id = path.into_inner().0;
    let deleted = MagazineUser::delete(&id, &pool)
        .await
        .context("Failed to delete magazine user.")
        .map_err(e500)?;

    if !deleted {
        return Err(e404(format!("Magazine user {} does not exist.", id)));
    }

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .json(ResponseMessage::from(
            "The magazine user has been deleted.",
        )))
}
