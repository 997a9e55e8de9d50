use crate::authentication::UserId;
use actix_web::{HttpResponse, get, web};

#[get("/authenticate")]
#[tracing::instrument(name = "Authenticating admin", skip_all, fields(user_id=%&*user_id))]
pub async fn get(user_id: web::ReqData<UserId>) -> Result<HttpResponse, actix_web::Error> {
    Ok(HttpResponse::Ok().finish())
}
