use geojson::GeoJson;
use serde_json::{json, Value};
use std::path::Path;
use tracing::{debug, error, info};

use crate::dataset::Payload;
use crate::errors::{MapError, MapResult};

/// Load a data file as a map payload, choosing the reader by extension
pub fn load_file(file_path: &Path) -> MapResult<Payload> {
    let extension = file_path
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("")
        .to_lowercase();

    info!("Loading file: {}", file_path.display());
    match extension.as_str() {
        "geojson" | "json" => load_geojson(file_path),
        "csv" => load_csv(file_path).map(Payload::Plain),
        _ => {
            error!("Error: unsupported extension {}", extension);
            Err(MapError::UnsupportedFormat(format!(
                "{} (use .geojson, .json or .csv)",
                file_path.display()
            )))
        }
    }
}

pub fn load_files<P: AsRef<Path>>(file_paths: &[P]) -> MapResult<Vec<Payload>> {
    file_paths
        .iter()
        .map(|path| load_file(path.as_ref()))
        .collect()
}

/// GeoJSON becomes a geo payload; other valid JSON is passed through as-is
pub fn load_geojson(file_path: &Path) -> MapResult<Payload> {
    let content = std::fs::read_to_string(file_path)?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|err| MapError::ParseError(format!("{}: {}", file_path.display(), err)))?;

    match GeoJson::from_json_value(value.clone()) {
        Ok(geojson) => Ok(Payload::geo(geojson)),
        Err(err) => {
            debug!(
                "{} is not GeoJSON ({}), passing through as plain JSON",
                file_path.display(),
                err
            );
            Ok(Payload::Plain(value))
        }
    }
}

/// Read a CSV file into kepler.gl row data: `{fields: [{name}], rows: [[..]]}`
pub fn load_csv(file_path: &Path) -> MapResult<Value> {
    let mut reader = csv::Reader::from_path(file_path)?;
    let fields: Vec<Value> = reader
        .headers()?
        .iter()
        .map(|name| json!({ "name": name }))
        .collect();

    let rows = reader
        .records()
        .map(|record| record.map(|record| record.iter().map(parse_cell).collect::<Vec<_>>()))
        .collect::<Result<Vec<_>, csv::Error>>()?;

    debug!(
        "Loaded {} columns and {} rows from {}",
        fields.len(),
        rows.len(),
        file_path.display()
    );
    Ok(json!({ "fields": fields, "rows": rows }))
}

fn parse_cell(cell: &str) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return json!(int);
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if float.is_finite() {
            return json!(float);
        }
    }
    match trimmed {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(cell.to_string()),
    }
}
