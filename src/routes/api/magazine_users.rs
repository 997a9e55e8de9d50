use crate::domain::{FieldErrors, NewSubscriber, SubscriberParams};
use crate::embed::{EmbedGuard, attribution};
use crate::models::{MagazineUser, StoreError};
use crate::utils::{Envelope, error_chain_fmt};
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::middleware::DefaultHeaders;
use actix_web::{HttpRequest, HttpResponse, ResponseError, options, post, web};
use anyhow::Context;
use chrono::Utc;
use sqlx::PgPool;

pub const SUCCESS_MESSAGE: &str = "Successfully subscribed to magazine!";
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied: Invalid referrer domain";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An error occurred while processing your request";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "The request body is too large.";

/// Largest submission body read, in bytes.
pub const MAX_BODY_SIZE: usize = 256 * 1024;

/// Third-party pages call the API directly, so every response allows any origin.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type, Accept"))
}

#[derive(thiserror::Error)]
pub enum SubmissionError {
    #[error("Access denied: Invalid referrer domain")]
    AccessDenied,
    #[error("Validation failed")]
    ValidationFailed(FieldErrors),
    #[error("The request body is too large.")]
    PayloadTooLarge,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubmissionError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubmissionError::AccessDenied => StatusCode::FORBIDDEN,
            SubmissionError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SubmissionError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            SubmissionError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let envelope = match self {
            SubmissionError::AccessDenied => Envelope::failure(ACCESS_DENIED_MESSAGE),
            SubmissionError::ValidationFailed(errors) => Envelope::validation_failed(errors.clone()),
            SubmissionError::PayloadTooLarge => Envelope::failure(PAYLOAD_TOO_LARGE_MESSAGE),
            SubmissionError::UnexpectedError(_) => Envelope::failure(UNEXPECTED_ERROR_MESSAGE),
        };

        HttpResponse::build(self.status_code())
            .content_type(ContentType::json())
            .json(envelope)
    }
}

impl From<StoreError> for SubmissionError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(errors) => SubmissionError::ValidationFailed(errors),
            StoreError::Database(e) => SubmissionError::UnexpectedError(
                anyhow::Error::new(e).context("Failed to insert new magazine user in the database."),
            ),
        }
    }
}

#[post("/magazine-users")]
#[tracing::instrument(
    name = "Adding a new magazine subscriber",
    skip_all,
    fields(subscriber_email = tracing::field::Empty)
)]
pub async fn post(
    request: HttpRequest,
    payload: web::Payload,
    pool: web::Data<PgPool>,
    guard: web::Data<EmbedGuard>,
) -> Result<HttpResponse, SubmissionError> {
    if guard.gates_submissions() && !guard.admits(&request) {
        return Err(SubmissionError::AccessDenied);
    }

    // Read in the handler so an oversized body is reported as a `SubmissionError`.
    let body = payload
        .to_bytes_limited(MAX_BODY_SIZE)
        .await
        .map_err(|_| SubmissionError::PayloadTooLarge)?
        .map_err(|e| anyhow::anyhow!("Failed to read the request body: {}", e))?;

    let mut new_subscriber = NewSubscriber::try_from(SubscriberParams::from_body(&body))
        .map_err(SubmissionError::ValidationFailed)?;
    tracing::Span::current().record(
        "subscriber_email",
        tracing::field::display(&new_subscriber.email),
    );

    if MagazineUser::email_taken(new_subscriber.email.as_ref(), None, &pool)
        .await
        .context("Failed to check whether the email is already subscribed.")?
    {
        return Err(SubmissionError::ValidationFailed(FieldErrors::email_taken()));
    }

    let extracted = attribution::extract(
        request.headers(),
        request.connection_info().peer_addr(),
        Utc::now(),
    );
    let supplied = new_subscriber.source_data.take().unwrap_or_default();
    new_subscriber.source_data = Some(extracted.merge(supplied));

    MagazineUser::insert(&new_subscriber, &pool).await?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .json(Envelope::success(SUCCESS_MESSAGE)))
}

#[options("/magazine-users")]
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}
