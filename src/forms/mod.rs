use serde::Deserialize;

#[derive(Deserialize)]
pub struct AvatarsForm {
    pub value: String,
}

#[derive(Deserialize)]
pub struct DefaultFileForm {
    pub overwrite: Option<String>,
}

impl DefaultFileForm {
    pub fn confirmed(&self) -> bool {
        matches!(self.overwrite.as_deref(), Some("true") | Some("on"))
    }
}

#[derive(Deserialize)]
pub struct AddServerForm {
    pub name: String,
    pub address: String,
    pub world_server: String,
    pub upgrade_server: Option<String>,
    pub script_server: Option<String>,
}

#[derive(Deserialize)]
pub struct LaunchForm {
    pub server: Option<String>,
    pub update: Option<String>,
}
