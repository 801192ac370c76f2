use crate::routes::AppState;
use crate::views::dashboard::{render_dashboard_page, DashboardView, Notice};
use axum::{Json, extract::State, http::StatusCode, response::Html};
use tracing::{error, warn};
use worlds_launcher::{
    cache::cache_entry_count,
    catalog::load_or_create,
    error::LauncherError,
    models::Catalog,
    status::{launcher_status, LauncherStatus},
};

pub async fn dashboard_page(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    render_dashboard(&state, None).await
}

pub async fn status_api(
    State(state): State<AppState>,
) -> Result<Json<LauncherStatus>, (StatusCode, String)> {
    let catalog = load_or_create(&state.launcher.catalog_path())
        .await
        .map_err(internal)?;
    launcher_status(&state.launcher, &catalog)
        .await
        .map(Json)
        .map_err(internal)
}

pub async fn catalog_api(
    State(state): State<AppState>,
) -> Result<Json<Catalog>, (StatusCode, String)> {
    load_or_create(&state.launcher.catalog_path())
        .await
        .map(Json)
        .map_err(internal)
}

pub(crate) async fn render_dashboard(
    state: &AppState,
    notice: Option<Notice>,
) -> Result<Html<String>, (StatusCode, String)> {
    let catalog = load_or_create(&state.launcher.catalog_path())
        .await
        .map_err(internal)?;
    let status = launcher_status(&state.launcher, &catalog)
        .await
        .map_err(internal)?;
    let cache_entries = cache_entry_count(&state.launcher)
        .await
        .map_err(internal)?;

    Ok(Html(render_dashboard_page(&DashboardView {
        layout: state.launcher.layout(),
        status: &status,
        catalog: &catalog,
        cache_entries,
        notice: notice.as_ref(),
    })))
}

/// Re-renders the dashboard with the outcome of an action. Problems with the
/// user's files or selection become a notice; anything else is a 500.
pub(crate) async fn render_outcome(
    state: &AppState,
    result: Result<String, LauncherError>,
) -> Result<Html<String>, (StatusCode, String)> {
    match result {
        Ok(message) => render_dashboard(state, Some(Notice::success(message))).await,
        Err(err) if err.is_user_facing() => {
            warn!(error = %err, "action refused");
            render_dashboard(state, Some(Notice::error(err.to_string()))).await
        }
        Err(err) => Err(internal(err)),
    }
}

pub(crate) fn internal(err: LauncherError) -> (StatusCode, String) {
    error!(error = %err, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
