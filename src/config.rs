//! Loading and merging the kepler.gl configuration template.
//!
//! ```text
//! template (JSON text)
//!   └── config                     <- returned to the caller
//!       ├── version
//!       └── config
//!           └── mapStyle
//!               ├── styleType      <- preset name or "custom"
//!               └── mapStyles
//!                   └── custom     <- inserted for custom style urls
//! ```

use include_dir::{include_dir, Dir};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::errors::{MapError, MapResult};

static RESOURCE_DIR: Dir = include_dir!("resources");

/// File name of the template bundled into the binary
pub const BUNDLED_CONFIG_NAME: &str = "keplergl_config.json";

/// Token in the template replaced by the Mapbox API key
pub const API_KEY_PLACEHOLDER: &str = "{MAPBOX_API_KEY}";

/// Key the custom style is registered under in `mapStyles`
pub const CUSTOM_STYLE_ID: &str = "custom";

const CUSTOM_STYLE_LABEL: &str = "Custom map style";
const MAP_STYLE_POINTER: &str = "/config/config/mapStyle";

/// Where the config template is read from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Bundled,
    File(PathBuf),
}

impl ConfigSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map(ConfigSource::File).unwrap_or_default()
    }

    /// Read the raw template text
    pub fn read_template(&self) -> MapResult<String> {
        match self {
            ConfigSource::Bundled => bundled_template(),
            ConfigSource::File(path) => {
                debug!("Reading config template: {}", path.display());
                fs::read_to_string(path).map_err(|err| match err.kind() {
                    ErrorKind::NotFound => MapError::ConfigNotFound(path.clone()),
                    _ => MapError::Io(err),
                })
            }
        }
    }
}

/// The template shipped with the tool
pub fn bundled_template() -> MapResult<String> {
    RESOURCE_DIR
        .get_file(BUNDLED_CONFIG_NAME)
        .and_then(|file| file.contents_utf8().map(str::to_string))
        .ok_or_else(|| {
            MapError::InvalidConfiguration(format!(
                "bundled template '{}' is missing",
                BUNDLED_CONFIG_NAME
            ))
        })
}

/// Built-in Mapbox map styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylePreset {
    Streets,
    Outdoors,
    Light,
    Dark,
    Satellite,
    SatelliteStreets,
}

impl StylePreset {
    pub const ALL: [StylePreset; 6] = [
        StylePreset::Streets,
        StylePreset::Outdoors,
        StylePreset::Light,
        StylePreset::Dark,
        StylePreset::Satellite,
        StylePreset::SatelliteStreets,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StylePreset::Streets => "streets",
            StylePreset::Outdoors => "outdoors",
            StylePreset::Light => "light",
            StylePreset::Dark => "dark",
            StylePreset::Satellite => "satellite",
            StylePreset::SatelliteStreets => "satellite-streets",
        }
    }

    /// Case-insensitive lookup
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL.into_iter().find(|preset| preset.as_str() == name)
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved style selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapStyle {
    Preset(StylePreset),
    /// Style url exactly as given; Mapbox style ids are case-sensitive
    Custom(String),
}

impl MapStyle {
    pub fn from_selector(selector: &str) -> Self {
        match StylePreset::from_name(selector) {
            Some(preset) => MapStyle::Preset(preset),
            None => MapStyle::Custom(selector.to_string()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomStyle<'a> {
    access_token: &'a str,
    custom: bool,
    id: &'a str,
    label: &'a str,
    url: &'a str,
}

/// Load the template, substitute the API key, apply the style override and
/// return the inner `config` object handed to the renderer.
pub fn load_config(
    source: &ConfigSource,
    api_key: Option<&str>,
    style: Option<&str>,
) -> MapResult<Value> {
    let api_key = api_key.unwrap_or_default();
    let text = source
        .read_template()?
        .replace(API_KEY_PLACEHOLDER, api_key);
    let mut document: Value = serde_json::from_str(&text).map_err(MapError::MalformedConfig)?;

    if let Some(selector) = style {
        let style = MapStyle::from_selector(selector);
        info!("Using map style: {:?}", style);
        apply_style(&mut document, &style, api_key)?;
    }

    document
        .get_mut("config")
        .map(Value::take)
        .ok_or_else(|| MapError::InvalidConfiguration("missing top-level 'config' key".to_string()))
}

fn map_style_mut(document: &mut Value) -> MapResult<&mut Map<String, Value>> {
    document
        .pointer_mut(MAP_STYLE_POINTER)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| {
            MapError::InvalidConfiguration("missing object at config.config.mapStyle".to_string())
        })
}

fn apply_style(document: &mut Value, style: &MapStyle, api_key: &str) -> MapResult<()> {
    let map_style = map_style_mut(document)?;
    match style {
        MapStyle::Preset(preset) => {
            map_style.insert("styleType".to_string(), json!(preset.as_str()));
        }
        MapStyle::Custom(url) => {
            let entry = serde_json::to_value(CustomStyle {
                access_token: api_key,
                custom: true,
                id: CUSTOM_STYLE_ID,
                label: CUSTOM_STYLE_LABEL,
                url: url.as_str(),
            })?;
            map_style
                .entry("mapStyles")
                .or_insert_with(|| json!({}))
                .as_object_mut()
                .ok_or_else(|| {
                    MapError::InvalidConfiguration("mapStyle.mapStyles is not an object".to_string())
                })?
                .insert(CUSTOM_STYLE_ID.to_string(), entry);
            map_style.insert("styleType".to_string(), json!(CUSTOM_STYLE_ID));
        }
    }
    Ok(())
}
