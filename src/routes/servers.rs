use crate::forms::{AddServerForm, LaunchForm};
use crate::routes::{dashboard::render_outcome, AppState};
use crate::views::dashboard::render_launched_page;
use axum::{Form, extract::State, http::StatusCode, response::Html};
use std::time::Duration;
use tracing::{error, info};
use worlds_launcher::{
    apply::apply_and_launch,
    catalog::{add_server_to_file, NewServer},
};

pub async fn add_server(
    State(state): State<AppState>,
    Form(form): Form<AddServerForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    let server = NewServer {
        name: form.name,
        address: form.address,
        world_server: form.world_server,
        upgrade_server: form.upgrade_server,
        script_server: form.script_server,
    };
    let name = server.name.trim().to_string();

    let result = {
        let _guard = state.file_lock.lock().await;
        add_server_to_file(&state.launcher.catalog_path(), server).await
    };

    let result = result.map(|_| format!("Server '{name}' added successfully."));
    render_outcome(&state, result).await
}

/// Applies the selection, starts the client and stops the UI once the client
/// exits.
pub async fn launch(
    State(state): State<AppState>,
    Form(form): Form<LaunchForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    let server = form.server.unwrap_or_default();
    let update = form.update.unwrap_or_default();

    let result = {
        let _guard = state.file_lock.lock().await;
        apply_and_launch(&state.launcher, &server, &update, state.spawner.as_ref()).await
    };

    let process = match result {
        Ok(process) => process,
        Err(err) => return render_outcome(&state, Err(err)).await,
    };

    let executable = process.executable.display().to_string();
    let shutdown = state.shutdown.clone();
    tokio::spawn(async move {
        match process.wait().await {
            Ok(code) => info!(?code, "client exited"),
            Err(err) => error!(error = %err, "lost track of client"),
        }
        shutdown.graceful_shutdown(Some(Duration::from_secs(2)));
    });

    Ok(Html(render_launched_page(&server, &executable)))
}
