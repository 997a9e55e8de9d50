mod detail;
mod index;
mod stats;

pub use detail::{delete, edit, get as show, put};
pub use index::{get, post};
pub use self::stats::get as source_stats;

use crate::domain::{FieldErrors, NewSubscriber, SubscriberParams};
use crate::models::{MagazineUser, StoreError};
use crate::utils::e500;
use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

/// Body accepted by the admin create and update forms.
#[derive(Deserialize, Debug)]
pub struct MagazineUserParams {
    name: Option<Value>,
    email: Option<Value>,
}

/// Validates the form and makes sure no other record owns the email.
async fn validate(
    params: MagazineUserParams,
    except: Option<&Uuid>,
    pool: &PgPool,
) -> Result<NewSubscriber, actix_web::Error> {
    let new_subscriber = NewSubscriber::try_from(SubscriberParams {
        name: params.name,
        email: params.email,
        source_data: None,
    })?;

    let taken = MagazineUser::email_taken(new_subscriber.email.as_ref(), except, pool)
        .await
        .context("Failed to check whether the email is already in use.")
        .map_err(e500)?;
    if taken {
        return Err(FieldErrors::email_taken().into());
    }

    Ok(new_subscriber)
}

fn store_error(e: StoreError) -> actix_web::Error {
    match e {
        StoreError::Validation(errors) => errors.into(),
        StoreError::Database(e) => e500(e),
    }
}
