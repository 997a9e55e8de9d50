use anyhow::{Context, Result, bail};
use magazine_api::configuration::get_configuration;
use magazine_api::models::{NewUser, NewUserData};
use magazine_api::startup::get_connection_pool;
use secrecy::Secret;
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let configuration = get_configuration().context("Failed to read configuration.")?;
    let connection_pool = get_connection_pool(&configuration.database);

    print!("Enter username: ");
    io::stdout().flush()?;

    let mut username = String::new();
    io::stdin()
        .read_line(&mut username)
        .context("Failed to read username.")?;
    let username = username.trim().to_string();

    let password = rpassword::prompt_password("Enter password: ")
        .context("Failed to read password.")?
        .trim()
        .to_string();
    let password_check = rpassword::prompt_password("Enter password again: ")
        .context("Failed to read password.")?
        .trim()
        .to_string();

    if password_check != password {
        bail!("Passwords do not match.");
    }

    let new_user = NewUser::try_from(NewUserData {
        username,
        password: Secret::new(password),
    })
    .map_err(anyhow::Error::msg)?
    .make_superuser();

    let mut transaction = connection_pool
        .begin()
        .await
        .context("Failed to begin database transaction.")?;
    let user = new_user.store(&mut transaction).await?;
    transaction
        .commit()
        .await
        .context("Failed to commit transaction.")?;

    println!("Successfully stored admin user: {}", user.username);

    Ok(())
}
