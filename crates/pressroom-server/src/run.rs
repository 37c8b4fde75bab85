use axum::http::StatusCode;
use axum::{Router, response::IntoResponse, routing::get};
use futures::FutureExt;
use pressroom_app::authors_client::AuthorsClient;
use pressroom_app::state::{AppConfig, AppState};
use tracing::debug;

use crate::config::{AuthorsServerConfig, PublicationsServerConfig};
use crate::error::Result;

pub async fn run_authors(args: AuthorsServerConfig) -> Result<()> {
    let state = build_authors_state(&args).await?;
    let shutdown = tokio::signal::ctrl_c().map(|_| ());
    run_authors_graceful(args, state, shutdown).await
}

pub async fn run_authors_graceful<S>(
    args: AuthorsServerConfig,
    state: AppState,
    shutdown_signal: S,
) -> Result<()>
where
    S: std::future::Future<Output = ()> + Send + 'static,
{
    let app = authors_router(state, args.no_cors);
    serve(&args.listen_address, args.port, app, shutdown_signal).await
}

pub async fn run_publications(args: PublicationsServerConfig) -> Result<()> {
    let state = build_publications_state(&args).await?;
    let shutdown = tokio::signal::ctrl_c().map(|_| ());
    run_publications_graceful(args, state, shutdown).await
}

pub async fn run_publications_graceful<S>(
    args: PublicationsServerConfig,
    state: AppState,
    shutdown_signal: S,
) -> Result<()>
where
    S: std::future::Future<Output = ()> + Send + 'static,
{
    let app = publications_router(state, args.no_cors);
    serve(&args.listen_address, args.port, app, shutdown_signal).await
}

pub fn authors_router(state: AppState, no_cors: bool) -> Router<()> {
    let router = Router::new()
        .nest("/authors", pressroom_app::rest_api::author::router())
        .with_state(state)
        .route("/health", get(health));
    with_cors(router, no_cors)
}

pub fn publications_router(state: AppState, no_cors: bool) -> Router<()> {
    // route casing kept from the original service
    let router = Router::new()
        .nest(
            "/api/Publications",
            pressroom_app::rest_api::publication::router(),
        )
        .with_state(state)
        .route("/health", get(health));
    with_cors(router, no_cors)
}

fn with_cors(router: Router<()>, no_cors: bool) -> Router<()> {
    if no_cors {
        router
    } else {
        router.layer(tower_http::cors::CorsLayer::very_permissive())
    }
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn build_authors_state(config: &AuthorsServerConfig) -> Result<AppState> {
    let pool = pressroom_dal::new_pool(&config.database_url).await?;
    sqlx::migrate!("../../migrations/authors").run(&pool).await?;

    let app_config = AppConfig {
        default_page_size: config.default_page_size,
        max_page_size: config.max_page_size,
    };
    Ok(AppState::new(app_config, pool))
}

pub async fn build_publications_state(config: &PublicationsServerConfig) -> Result<AppState> {
    let pool = pressroom_dal::new_pool(&config.database_url).await?;
    sqlx::migrate!("../../migrations/publications")
        .run(&pool)
        .await?;

    let app_config = AppConfig {
        default_page_size: config.default_page_size,
        max_page_size: config.max_page_size,
    };
    let authors_client = AuthorsClient::new(config.authors_url.clone(), config.authors_timeout)?;
    Ok(AppState::with_authors_client(app_config, pool, authors_client))
}

async fn serve<S>(listen_address: &str, port: u16, app: Router<()>, shutdown_signal: S) -> Result<()>
where
    S: std::future::Future<Output = ()> + Send + 'static,
{
    let ip: std::net::IpAddr = listen_address.parse()?;
    let addr = std::net::SocketAddr::from((ip, port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    debug!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}
