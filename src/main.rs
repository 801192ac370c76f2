mod forms;
mod routes;
mod views;

use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let shutdown = axum_server::Handle::new();
    let state = routes::default_state(shutdown.clone());
    info!(dir = %state.launcher.dir().display(), "using application directory");
    let app = routes::build_router(state);

    let addr = routes::bind_addr().expect("invalid bind address");
    info!("launcher listening on http://{addr}");
    axum_server::bind(addr)
        .handle(shutdown)
        .serve(app.into_make_service())
        .await
        .expect("server failed");
    info!("launcher closed");
}
