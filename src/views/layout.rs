use minijinja::{Environment, context};
use serde::Serialize;
use std::sync::OnceLock;

#[derive(Serialize)]
pub struct NavItem {
    pub label: String,
    pub href: String,
    pub key: String,
}

pub fn render_layout(title: &str, active: &str, content: &str) -> String {
    let nav_items = vec![
        NavItem { label: "Launcher".to_string(), href: "/".to_string(), key: "launcher".to_string() },
        NavItem { label: "Catalog".to_string(), href: "/api/catalog".to_string(), key: "catalog".to_string() },
        NavItem { label: "Health".to_string(), href: "/health".to_string(), key: "health".to_string() },
    ];

    let env = template_env();
    let context = context! {
        title => title,
        active => active,
        nav_items => nav_items,
        content => content,
    };

    env.get_template("layouts/base.html")
        .and_then(|template| template.render(context))
        .unwrap_or_else(|err| format!("Template error: {err}"))
}

pub fn template_env() -> &'static Environment<'static> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(templates_dir()));
        env.set_auto_escape_callback(|_| minijinja::AutoEscape::Html);
        env
    })
}

fn templates_dir() -> String {
    std::env::var("WORLDS_LAUNCHER_TEMPLATE_DIR").unwrap_or_else(|_| {
        std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("templates")
            .to_string_lossy()
            .to_string()
    })
}
