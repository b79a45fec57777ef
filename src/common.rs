use handlebars::{handlebars_helper, Handlebars};
use serde_json::Value;
use tracing::info;

use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn create_path_if_not_exists(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            info!("Creating path: {:?}", parent);
            std::fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

pub fn write_string_to_file(filename: &Path, content: &str) -> std::io::Result<()> {
    create_path_if_not_exists(filename)?;
    let mut file = File::create(filename)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Serialize a value for embedding inside a `<script>` element
pub fn script_safe_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

pub fn get_handlebars() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();

    handlebars_helper!(script_json: |v: Value| script_safe_json(&v));
    handlebars.register_helper("script_json", Box::new(script_json));

    handlebars_helper!(exists: |v: Value| !v.is_null());
    handlebars.register_helper("exists", Box::new(exists));

    handlebars
}
