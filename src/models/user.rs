use crate::authentication::compute_password_hash;
use crate::domain::user::Username;
use anyhow::Context;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sqlx::{Executor, Postgres, Transaction};
use uuid::Uuid;

/// An admin account, ready to be stored.
#[derive(Serialize, Deserialize, Debug)]
pub struct NewUser {
    pub password_hash: String,
    pub user_id: Uuid,
    pub username: String,
    is_superuser: bool,
}

impl TryFrom<NewUserData> for NewUser {
    type Error = String;

    fn try_from(data: NewUserData) -> Result<NewUser, Self::Error> {
        let username = Username::parse(data.username)?.as_ref().to_string();
        if data.password.expose_secret().trim().is_empty() {
            return Err("Password must not be empty.".to_string());
        }
        let password_hash = compute_password_hash(data.password)
            .map_err(|e| e.to_string())?
            .expose_secret()
            .to_string();

        Ok(NewUser {
            is_superuser: false,
            password_hash,
            user_id: Uuid::new_v4(),
            username,
        })
    }
}

impl NewUser {
    pub async fn store(
        self,
        transaction: &mut Transaction<'_, Postgres>,
    ) -> Result<Self, anyhow::Error> {
        transaction
            .execute(
                sqlx::query(
                    r#"
                      INSERT INTO users (
                        is_superuser,
                        password_hash,
                        user_id,
                        username
                      )
                      VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(self.is_superuser)
                .bind(&self.password_hash)
                .bind(self.user_id)
                .bind(&self.username),
            )
            .await
            .context("Failed to store new user.")?;

        Ok(self)
    }

    pub fn make_superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }

    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }
}

#[derive(Deserialize, Debug)]
pub struct NewUserData {
    pub username: String,
    pub password: Secret<String>,
}
