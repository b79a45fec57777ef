use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::MapResult;

/// How the page hands a dataset to kepler.gl
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    /// CSV text
    Csv,
    /// `{fields, rows}` row data
    Rows,
    /// GeoJSON object
    Geojson,
}

impl DatasetFormat {
    pub fn detect(data: &Value) -> Self {
        match data {
            Value::String(_) => DatasetFormat::Csv,
            Value::Object(object) if object.contains_key("fields") && object.contains_key("rows") => {
                DatasetFormat::Rows
            }
            _ => DatasetFormat::Geojson,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Dataset {
    pub id: String,
    pub format: DatasetFormat,
    pub data: Value,
}

/// kepler.gl map: a config plus named datasets, written out as a standalone
/// HTML page
#[derive(Debug, Clone, Default)]
pub struct KeplerGl {
    config: Value,
    datasets: IndexMap<String, Dataset>,
    mapbox_token: Option<String>,
}

impl KeplerGl {
    pub fn new(config: Value) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn with_mapbox_token(mut self, token: Option<String>) -> Self {
        self.mapbox_token = token;
        self
    }

    pub fn config(&self) -> &Value {
        &self.config
    }

    pub fn mapbox_token(&self) -> Option<&str> {
        self.mapbox_token.as_deref()
    }

    /// Add a dataset. An existing dataset with the same name is replaced in place.
    pub fn add_data(&mut self, data: Value, name: &str) {
        let format = DatasetFormat::detect(&data);
        debug!("Adding dataset '{}' as {:?}", name, format);
        let dataset = Dataset {
            id: name.to_string(),
            format,
            data,
        };
        if self.datasets.insert(name.to_string(), dataset).is_some() {
            debug!("Replaced existing dataset '{}'", name);
        }
    }

    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        self.datasets.get(name)
    }

    /// Dataset names in insertion order
    pub fn dataset_names(&self) -> Vec<&str> {
        self.datasets.keys().map(String::as_str).collect()
    }

    pub fn datasets(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.values()
    }

    /// Render the map page
    pub fn to_html(&self, read_only: bool, center_map: bool) -> MapResult<String> {
        crate::export::to_html::render(self, read_only, center_map)
    }

    /// Write the map page to `file_name`, creating parent directories
    pub fn save_to_html(&self, file_name: &Path, read_only: bool, center_map: bool) -> MapResult<()> {
        let html = self.to_html(read_only, center_map)?;
        crate::common::write_string_to_file(file_name, &html)?;
        info!("Map saved to {}", file_name.display());
        Ok(())
    }
}
