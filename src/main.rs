use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Request, Response},
};
use surrealdb::{
    engine::any::{self, Any},
    opt::auth::Root,
    Surreal,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Span;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    repositories::{PlaylistRepository, SurrealPlaylistRepository, SurrealUserRepository, UserRepository},
    services::{
        catalog_service::{Catalog, SaavnCatalog},
        cleanup_service::spawn_otp_sweeper,
        mail_service::{HttpMailer, Mailer},
    },
};

pub use self::error::{Error, Result};

mod auth;
mod config;
mod controllers;
mod error;
mod helpers;
mod models;
mod repositories;
mod routes;
mod services;
mod validators;

#[cfg(test)]
mod test_support;

#[derive(Clone)]
struct AppState {
    users: Arc<dyn UserRepository>,
    playlists: Arc<dyn PlaylistRepository>,
    mailer: Arc<dyn Mailer>,
    catalog: Arc<dyn Catalog>,
    app_name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    tracing::info!("Starting JStream API...");

    let config = AppConfig::from_env()?;

    let db = connect_db(&config).await?;
    repositories::init_schema(&db).await?;

    tracing::info!("Database connected successfully!");

    let http_client = reqwest::Client::builder()
        .timeout(config.outbound_timeout)
        .build()
        .map_err(|e| Error::EnvVarError(format!("Could not build HTTP client: {e}")))?;

    let users: Arc<dyn UserRepository> = Arc::new(SurrealUserRepository::new(db.clone()));

    let app_state = AppState {
        users: users.clone(),
        playlists: Arc::new(SurrealPlaylistRepository::new(db)),
        mailer: Arc::new(HttpMailer::new(
            http_client.clone(),
            config.email_api_url.clone(),
        )),
        catalog: Arc::new(SaavnCatalog::new(
            http_client,
            config.catalog_base_url.clone(),
        )),
        app_name: config.app_name.clone(),
    };

    if let Some(every) = config.otp_sweep_interval {
        spawn_otp_sweeper(users, every);
        tracing::info!("OTP sweeper running every {}s", every.as_secs());
    }

    let routes_all = routes::app_router(app_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4();
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    tracing::info!("{} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &Response<Body>, latency: Duration, _span: &Span| {
                    let status = response.status();
                    let latency_ms = latency.as_millis();

                    match status.as_u16() {
                        200..=299 => tracing::info!("{} ({}ms)", status, latency_ms),
                        400..=499 => tracing::warn!("{} ({}ms)", status, latency_ms),
                        500..=599 => tracing::error!("{} ({}ms)", status, latency_ms),
                        _ => tracing::info!("{} ({}ms)", status, latency_ms),
                    }
                }),
        )
        .layer(CorsLayer::very_permissive());

    let addr: SocketAddr = format!("{}:{}", config.bind_host, config.port)
        .parse()
        .map_err(|_| Error::EnvVarError("Invalid bind address".to_string()))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, routes_all).await?;

    Ok(())
}

async fn connect_db(config: &AppConfig) -> Result<Surreal<Any>> {
    tracing::info!("Connecting to database at: {}", config.db_url);

    let db = any::connect(&config.db_url).await?;

    if let Some((username, password)) = &config.db_credentials {
        db.signin(Root { username, password }).await?;
    }

    db.use_ns(&config.db_ns).use_db(&config.db_name).await?;

    Ok(db)
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "jstream_api=debug,tower_http=info,info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}
