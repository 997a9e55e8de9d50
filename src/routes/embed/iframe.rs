use crate::embed::{EmbedGuard, api_url, templates};
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, get, web};

#[get("/embed/magazine-subscription")]
#[tracing::instrument(name = "Serving the subscription iframe", skip_all)]
pub async fn get(request: HttpRequest, guard: web::Data<EmbedGuard>) -> HttpResponse {
    if !guard.admits(&request) {
        return HttpResponse::Forbidden()
            .content_type(ContentType::html())
            .body(templates::ACCESS_DENIED_PAGE);
    }

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(templates::iframe_page(&api_url(&request)))
}
