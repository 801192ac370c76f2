use crate::forms::DefaultFileForm;
use crate::routes::{dashboard::render_outcome, AppState};
use axum::{Form, extract::{Path, State}, http::StatusCode, response::Html};
use worlds_launcher::{
    cache::{self, CacheCleanOutcome},
    defaults::{write_default_file, DefaultFile},
};

pub async fn create_default_file(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Form(form): Form<DefaultFileForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    let kind = DefaultFile::from_slug(&kind)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown file '{kind}'")))?;

    let result = {
        let _guard = state.file_lock.lock().await;
        write_default_file(&state.launcher, kind, form.confirmed()).await
    };

    let result = result.map(|path| {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        format!("Default '{name}' has been created.")
    });
    render_outcome(&state, result).await
}

pub async fn clean_cache(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let result = {
        let _guard = state.file_lock.lock().await;
        cache::clean_cache(&state.launcher).await
    };

    let cache_dir = state.launcher.layout().cache_dir.clone();
    let result = result.map(|outcome| match outcome {
        CacheCleanOutcome::Missing => {
            format!("Cache folder ('{cache_dir}') not found. Nothing to do.")
        }
        CacheCleanOutcome::AlreadyEmpty => "Cache folder is already empty.".to_string(),
        CacheCleanOutcome::Cleaned(count) => {
            format!("Successfully cleaned {count} items from the cache.")
        }
    });
    render_outcome(&state, result).await
}
