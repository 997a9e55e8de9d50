use crate::embed::attribution::{referer, user_agent};
use crate::embed::{EmbedGuard, api_url, requested_url, templates};
use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{HttpRequest, HttpResponse, get, web};
use chrono::{SecondsFormat, Utc};

const JAVASCRIPT: &str = "application/javascript";

#[get("/js/magazine-embed.js")]
#[tracing::instrument(name = "Serving the subscription widget", skip_all)]
pub async fn get(request: HttpRequest, guard: web::Data<EmbedGuard>) -> HttpResponse {
    // Logged regardless of `log_violations`.
    if let Err(denial) = guard.evaluate(&request) {
        let ip = request.connection_info().peer_addr().map(str::to_string);
        tracing::warn!(
            embed_type = "javascript_widget",
            referrer = ?referer(request.headers()),
            ip = ?ip,
            user_agent = ?user_agent(request.headers()),
            requested_url = %requested_url(&request),
            timestamp = %Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            "Embed JavaScript blocked: {}",
            denial.reason()
        );

        return HttpResponse::Forbidden()
            .content_type(JAVASCRIPT)
            .body(templates::denied_widget_script());
    }

    HttpResponse::Ok()
        .content_type(JAVASCRIPT)
        .insert_header(CacheControl(vec![
            CacheDirective::Public,
            CacheDirective::MaxAge(3600),
        ]))
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .insert_header(("Access-Control-Allow-Methods", "GET"))
        .insert_header(("Access-Control-Allow-Headers", "Content-Type"))
        .body(templates::widget_script(&api_url(&request)))
}

#[get("/js/magazine-embed-fallback.js")]
pub async fn fallback() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(JAVASCRIPT)
        .insert_header(CacheControl(vec![
            CacheDirective::Public,
            CacheDirective::MaxAge(3600),
        ]))
        .body(templates::fallback_script())
}
