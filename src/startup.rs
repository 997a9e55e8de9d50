use crate::authentication::reject_anonymous_users;
use crate::configuration::{DatabaseSettings, Settings};
use crate::embed::EmbedGuard;
use crate::routes::{admin, api, embed, health_check, login};
use actix_cors::Cors;
use actix_session::SessionMiddleware;
use actix_session::storage::RedisSessionStore;
use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::http::header;
use actix_web::middleware::from_fn;
use actix_web::web::Data;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database);
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let host_origin_url = format!("{}:{}", configuration.application.base_url, port);
        let server = run(
            listener,
            connection_pool,
            EmbedGuard::from(&configuration.embed),
            RunSettings {
                hmac_secret: configuration.application.hmac_secret,
                redis_uri: configuration.redis_uri,
                allowed_origins: vec![configuration.hosts.client, host_origin_url],
                session_key: configuration.application.session_key,
            },
        )
        .await?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(configuration: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new().connect_lazy_with(configuration.connect_options())
}

struct RunSettings {
    hmac_secret: Secret<String>,
    redis_uri: Secret<String>,
    allowed_origins: Vec<String>,
    session_key: String,
}

/// CORS for the admin front-end. Third-party origins never reach these routes.
fn admin_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS", "HEAD"])
        .allowed_headers(&[header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(&[header::CONTENT_DISPOSITION, header::EXPIRES])
        .supports_credentials()
        .block_on_origin_mismatch(true)
        .max_age(3600)
}

async fn run(
    listener: TcpListener,
    db_pool: PgPool,
    embed_guard: EmbedGuard,
    settings: RunSettings,
) -> Result<Server, anyhow::Error> {
    let RunSettings {
        hmac_secret,
        redis_uri,
        allowed_origins,
        session_key,
    } = settings;
    let db_pool = Data::new(db_pool);
    let embed_guard = Data::new(embed_guard);
    let redis_store = RedisSessionStore::new(redis_uri.expose_secret()).await?;
    let secret_key = Key::from(hmac_secret.expose_secret().as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let server = HttpServer::new(move || {
        let session_middleware =
            SessionMiddleware::builder(redis_store.clone(), secret_key.clone())
                .cookie_name(session_key.clone())
                .build();

        App::new()
            .wrap(message_framework.clone())
            .wrap(session_middleware)
            .wrap(TracingLogger::default())
            .service(health_check::get)
            .service(
                web::scope("/api")
                    .wrap(api::magazine_users::cors_headers())
                    .service(api::magazine_users::post)
                    .service(api::magazine_users::preflight),
            )
            .service(embed::iframe::get)
            .service(embed::widget::get)
            .service(embed::widget::fallback)
            .service(
                web::resource("/login")
                    .wrap(admin_cors(&allowed_origins))
                    .route(web::post().to(login::post)),
            )
            .service(
                web::scope("/admin")
                    .wrap(from_fn(reject_anonymous_users))
                    .wrap(admin_cors(&allowed_origins))
                    .service(admin::authenticate::get)
                    .service(admin::logout::post)
                    .service(admin::magazine_users::source_stats)
                    .service(admin::magazine_users::get)
                    .service(admin::magazine_users::post)
                    .service(admin::magazine_users::edit)
                    .service(admin::magazine_users::show)
                    .service(admin::magazine_users::put)
                    .service(admin::magazine_users::delete),
            )
            .app_data(db_pool.clone())
            .app_data(embed_guard.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
