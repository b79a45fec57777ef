use std::path::Path;
use tracing::info;

use crate::config::{self, StylePreset};
use crate::errors::MapResult;

/// Write the bundled config template to `target`, or return it for printing
pub fn generate_config(target: Option<&Path>) -> MapResult<Option<String>> {
    let template = config::bundled_template()?;
    match target {
        Some(path) => {
            info!("Writing config template to: {}", path.display());
            crate::common::write_string_to_file(path, &template)?;
            Ok(None)
        }
        None => Ok(Some(template)),
    }
}

/// Preset style names, one per line
pub fn generate_styles() -> String {
    StylePreset::ALL
        .iter()
        .map(StylePreset::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}
