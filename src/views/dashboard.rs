use crate::views::layout::render_layout;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use worlds_launcher::{
    models::Catalog,
    settings::{AVATARS_RANGE, KNOWN_FLAGS},
    status::LauncherStatus,
    storage::Layout,
};

pub struct Notice {
    pub success: bool,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}

pub struct DashboardView<'a> {
    pub layout: &'a Layout,
    pub status: &'a LauncherStatus,
    pub catalog: &'a Catalog,
    pub cache_entries: Option<usize>,
    pub notice: Option<&'a Notice>,
}

pub fn render_dashboard_page(view: &DashboardView<'_>) -> String {
    let notice = view
        .notice
        .map(|notice| {
            format!(
                r#"<div class="notice {kind}">{message}</div>"#,
                kind = if notice.success { "success" } else { "error" },
                message = text(&notice.message),
            )
        })
        .unwrap_or_default();

    let content = format!(
        r#"{notice}
        <div>
          {files}
          {tools}
        </div>
        <div>
          {selection}
          {add_server}
        </div>"#,
        notice = notice,
        files = render_files_panel(view),
        tools = render_tools_panel(view),
        selection = render_selection_panel(view),
        add_server = render_add_server_panel(view),
    );

    render_layout("Worlds Launcher", "launcher", &content)
}

fn dot(on: bool) -> &'static str {
    if on {
        r#"<span class="dot on"></span>"#
    } else {
        r#"<span class="dot"></span>"#
    }
}

fn render_files_panel(view: &DashboardView<'_>) -> String {
    let row = |slug: &str, name: &str, exists: bool| {
        let confirm = if exists {
            format!(
                r#" onsubmit="return confirm('A {name} file already exists. Are you sure you want to overwrite it with a default version?')""#,
                name = attr(name),
            )
        } else {
            String::new()
        };
        format!(
            r#"<form class="row" method="post" action="/files/{slug}/default"{confirm}>
              {dot}<span>{name}</span>
              <input type="hidden" name="overwrite" value="{overwrite}">
              <button type="submit">NEW {upper}</button>
            </form>"#,
            dot = dot(exists),
            name = text(name),
            upper = text(&name.to_uppercase()),
            overwrite = if exists { "true" } else { "false" },
        )
    };

    format!(
        r#"<section class="panel">
          <h2>Files</h2>
          {settings}
          {override_row}
        </section>"#,
        settings = row("settings", &view.layout.settings_file, view.status.settings_exists),
        override_row = row("override", &view.layout.override_file, view.status.override_exists),
    )
}

fn render_tools_panel(view: &DashboardView<'_>) -> String {
    let disabled = if view.status.settings_exists { "" } else { " disabled" };

    let mut toggles = String::new();
    for (flag, state) in KNOWN_FLAGS.iter().zip(view.status.flags.iter()) {
        toggles.push_str(&format!(
            r#"<form class="row" method="post" action="/flags/{key}/toggle">
              {dot}<button type="submit"{disabled}>{label}</button>
            </form>"#,
            key = attr(flag.key),
            dot = dot(state.active),
            label = text(flag.label),
            disabled = disabled,
        ));
    }

    let avatars = view
        .status
        .avatars
        .map(|value| value.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let cache_confirm = match view.cache_entries {
        Some(count) if count > 0 => format!(
            r#" onsubmit="return confirm('Are you sure you want to delete {count} items from the cache folder?')""#
        ),
        _ => String::new(),
    };

    format!(
        r#"<section class="panel">
          <h2>Tools</h2>
          {toggles}
          <form class="row" method="post" action="/avatars">
            <input type="text" name="value" value="{avatars}" size="4"{disabled}>
            <button type="submit"{disabled}>SET MAX PLAYERS</button>
          </form>
          <p class="muted">Max players accepts {min} to {max}.</p>
          <form class="row" method="post" action="/cache/clean"{cache_confirm}>
            <button type="submit">CLEAN CACHE</button>
          </form>
        </section>"#,
        toggles = toggles,
        avatars = attr(&avatars),
        disabled = disabled,
        min = AVATARS_RANGE.start(),
        max = AVATARS_RANGE.end(),
        cache_confirm = cache_confirm,
    )
}

fn render_selection_panel(view: &DashboardView<'_>) -> String {
    let current = view.status.current_server.as_deref();

    let mut servers = String::new();
    for (index, name) in view.catalog.server_selection.keys().enumerate() {
        let checked = match current {
            Some(current) => current == name,
            None => index == 0,
        };
        servers.push_str(&radio("server", name, checked));
    }

    let mut updates = String::new();
    for (index, name) in view.catalog.updating_server.keys().enumerate() {
        updates.push_str(&radio("update", name, index == 0));
    }

    let current_label = current.unwrap_or("none detected");

    format!(
        r#"<section class="panel">
          <h2>Server Selection</h2>
          <p class="muted">Current server: {current_label}</p>
          <form method="post" action="/launch">
            <div class="columns">
              <div>
                <h3>Server</h3>
                {servers}
              </div>
              <div>
                <h3>Updating Server</h3>
                {updates}
              </div>
            </div>
            <button class="play" type="submit">PLAY</button>
          </form>
        </section>"#,
        current_label = text(current_label),
        servers = servers,
        updates = updates,
    )
}

fn radio(group: &str, value: &str, checked: bool) -> String {
    format!(
        r#"<label class="row"><input type="radio" name="{group}" value="{value}"{checked}> {label}</label>"#,
        group = attr(group),
        value = attr(value),
        checked = if checked { " checked" } else { "" },
        label = text(value),
    )
}

fn render_add_server_panel(view: &DashboardView<'_>) -> String {
    let reference = view.catalog.server_selection.get("LibreWorlds");
    let reference_update = view.catalog.updating_server.get("LibreWorlds");
    let address = reference
        .map(|entry| entry.address.as_str())
        .unwrap_or("[example.com:12345]");
    let world_server = reference
        .map(|entry| entry.world_server.as_str())
        .unwrap_or("WorldServer=worldserver://example.com:12345");
    let upgrade = reference_update
        .and_then(|entry| entry.upgrade_server.as_deref())
        .unwrap_or("upgradeServer=http://example.com/update");
    let script = reference_update
        .and_then(|entry| entry.script_server.as_deref())
        .unwrap_or("scriptServer=http://example.com/scripts");

    let field = |name: &str, label: &str, placeholder: &str, required: bool| {
        format!(
            r#"<label class="row"><span style="width: 12rem">{label}:</span>
              <input type="text" name="{name}" placeholder="{placeholder}" size="48"{required}></label>"#,
            label = text(label),
            name = attr(name),
            placeholder = attr(placeholder),
            required = if required { " required" } else { "" },
        )
    };

    format!(
        r#"<section class="panel">
          <h2>Add Server</h2>
          <form method="post" action="/servers">
            {name}
            {address}
            {world_server}
            {upgrade}
            {script}
            <button type="submit">Save Server</button>
          </form>
        </section>"#,
        name = field("name", "Server Name", "My Custom Server", true),
        address = field("address", "Address Line", address, true),
        world_server = field("world_server", "WorldServer Line", world_server, true),
        upgrade = field("upgrade_server", "UpgradeServer (Optional)", upgrade, false),
        script = field("script_server", "ScriptServer (Optional)", script, false),
    )
}

pub fn render_launched_page(server: &str, executable: &str) -> String {
    let content = format!(
        r#"<section class="panel">
          <h2>Launching</h2>
          <p>Connected to <strong>{server}</strong>. Started <code>{executable}</code>.</p>
          <p class="muted">The launcher closes when the client exits.</p>
        </section>"#,
        server = text(server),
        executable = text(executable),
    );
    render_layout("Worlds Launcher", "launcher", &content)
}
