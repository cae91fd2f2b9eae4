//! HTTP surface: router construction, CORS, shared state and the serve
//! loop with graceful shutdown.

pub mod payloads;
pub mod routes;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::euris::EurisClient;
use axum::Router;
use axum::http::Method;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::routing::get;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Process-wide shared state: the explicitly constructed database
/// handle and the EuRIS client. Injected into every handler; there is
/// no global accessor. The mutex serializes database access, which
/// matches the single-logical-writer polling model.
pub struct AppState {
    pub db: Mutex<DbPool>,
    pub euris: EurisClient,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn lock_db(&self) -> AppResult<MutexGuard<'_, DbPool>> {
        self.db
            .lock()
            .map_err(|_| AppError::Other("database lock poisoned".to_string()))
    }
}

/// Build the application router. Split out from `serve` so tests can
/// drive it without a listener.
pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route(
            "/api/compteur",
            get(routes::compteur_get).post(routes::compteur_post),
        )
        .route("/api/euris", get(routes::euris_tracks))
        .layer(cors)
        .with_state(state)
}

/// Open the database, build the shared state and serve until shutdown.
pub async fn serve(config: Config) -> AppResult<()> {
    let pool = DbPool::new(&config.database)?;
    init_db(&pool.conn)?;
    info!(database = %config.database, "database ready");

    let euris = EurisClient::new(config.euris_base_url.clone())?;
    let state = Arc::new(AppState {
        db: Mutex::new(pool),
        euris,
    });

    let app = router(state);
    let address = format!("{}:{}", config.bind, config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.ok();
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
