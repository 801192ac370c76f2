pub mod dashboard;
pub mod files;
pub mod health;
pub mod servers;
pub mod settings;

use axum::{Router, routing::{get, post}};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use worlds_launcher::{
    runner::{ProcessSpawner, TokioSpawner},
    storage::{app_dir, Launcher, Layout},
};

#[derive(Clone)]
pub struct AppState {
    pub launcher: Launcher,
    pub spawner: Arc<dyn ProcessSpawner>,
    /// Held for any operation that rewrites a file in the application dir.
    pub file_lock: Arc<Mutex<()>>,
    pub shutdown: axum_server::Handle,
}

pub fn build_router(state: AppState) -> Router {
    let web_dir = web_dir();
    Router::new()
        .route("/", get(dashboard::dashboard_page))
        .route("/api/status", get(dashboard::status_api))
        .route("/api/catalog", get(dashboard::catalog_api))
        .route("/flags/:flag/toggle", post(settings::toggle_flag))
        .route("/avatars", post(settings::set_avatars))
        .route("/files/:kind/default", post(files::create_default_file))
        .route("/cache/clean", post(files::clean_cache))
        .route("/servers", post(servers::add_server))
        .route("/launch", post(servers::launch))
        .route("/health", get(health::health))
        .nest_service("/web", ServeDir::new(web_dir))
        .with_state(state)
}

pub fn default_state(shutdown: axum_server::Handle) -> AppState {
    AppState {
        launcher: Launcher::new(app_dir(), Layout::default()),
        spawner: Arc::new(TokioSpawner),
        file_lock: Arc::new(Mutex::new(())),
        shutdown,
    }
}

pub fn bind_addr() -> Result<SocketAddr, String> {
    let raw = std::env::var("WORLDS_LAUNCHER_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    raw.parse()
        .map_err(|err| format!("invalid WORLDS_LAUNCHER_ADDR '{raw}': {err}"))
}

fn web_dir() -> PathBuf {
    std::env::var("WORLDS_LAUNCHER_WEB_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("web"))
}
