use crate::forms::AvatarsForm;
use crate::routes::{dashboard::render_outcome, AppState};
use axum::{Form, extract::{Path, State}, http::StatusCode, response::Html};
use worlds_launcher::{
    error::LauncherError,
    settings::{find_flag, SettingsPatcher},
};

pub async fn toggle_flag(
    State(state): State<AppState>,
    Path(flag): Path<String>,
) -> Result<Html<String>, (StatusCode, String)> {
    let known = find_flag(&flag)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown setting '{flag}'")))?;
    let patcher = SettingsPatcher::new(state.launcher.settings_path());

    let result = {
        let _guard = state.file_lock.lock().await;
        patcher.toggle_flag(known).await
    };

    let result = result.map(|active| {
        format!("{} is now {}.", known.label, if active { "on" } else { "off" })
    });
    render_outcome(&state, result).await
}

pub async fn set_avatars(
    State(state): State<AppState>,
    Form(form): Form<AvatarsForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    let patcher = SettingsPatcher::new(state.launcher.settings_path());

    let result = match form.value.trim().parse::<i64>() {
        Ok(value) => {
            let _guard = state.file_lock.lock().await;
            patcher.set_avatars(value).await
        }
        Err(_) => Err(LauncherError::InvalidValue(
            "Please enter a valid number".to_string(),
        )),
    };

    let result = result.map(|_| "Max players view value updated successfully.".to_string());
    render_outcome(&state, result).await
}
