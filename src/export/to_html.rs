use serde_json::json;

use crate::errors::MapResult;
use crate::kepler::{Dataset, KeplerGl};

/// kepler.gl release loaded by the generated page
pub const KEPLER_GL_VERSION: &str = "2.5.5";

const DEFAULT_TITLE: &str = "Kepler.gl";

pub fn render(map: &KeplerGl, read_only: bool, center_map: bool) -> MapResult<String> {
    let datasets: Vec<&Dataset> = map.datasets().collect();
    let config = if map.config().is_null() {
        None
    } else {
        Some(map.config())
    };

    let handlebars = crate::common::get_handlebars();
    let res = handlebars.render_template(
        &get_template(),
        &json!({
            "title": DEFAULT_TITLE,
            "keplerVersion": KEPLER_GL_VERSION,
            "mapboxToken": map.mapbox_token().unwrap_or_default(),
            "keplerData": {
                "config": config,
                "datasets": datasets,
                "options": {
                    "readOnly": read_only,
                    "centerMap": center_map,
                },
            },
        }),
    )?;
    Ok(res)
}

pub fn get_template() -> String {
    include_str!("keplergl.hbs").to_string()
}
