use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use crate::errors::{MapError, MapResult};
use crate::geo_interface::GeoInterface;

/// Stub used for generated dataset names when none is given
pub const DEFAULT_NAME_STUB: &str = "data";

/// A single dataset handed to the map
pub enum Payload {
    /// Plain JSON, passed to the renderer as-is
    Plain(Value),
    /// Anything exposing a GeoJSON mapping
    Geo(Box<dyn GeoInterface>),
}

impl Payload {
    pub fn geo<G: GeoInterface + 'static>(geometry: G) -> Self {
        Payload::Geo(Box::new(geometry))
    }

    /// Convert to the plain JSON the renderer accepts
    pub fn into_plain(self) -> Value {
        match self {
            Payload::Plain(value) => value,
            Payload::Geo(geometry) => Value::Object(geometry.geo_interface()),
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Plain(value) => f.debug_tuple("Plain").field(value).finish(),
            Payload::Geo(_) => f.write_str("Geo(..)"),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Plain(value)
    }
}

/// One payload or an ordered list of them
#[derive(Debug)]
pub enum DataInput {
    Single(Payload),
    List(Vec<Payload>),
}

impl DataInput {
    pub fn into_payloads(self) -> Vec<Payload> {
        match self {
            DataInput::Single(payload) => vec![payload],
            DataInput::List(payloads) => payloads,
        }
    }
}

impl From<Payload> for DataInput {
    fn from(payload: Payload) -> Self {
        DataInput::Single(payload)
    }
}

impl From<Vec<Payload>> for DataInput {
    fn from(payloads: Vec<Payload>) -> Self {
        DataInput::List(payloads)
    }
}

/// JSON arrays are lists of datasets; anything else is a single dataset.
impl From<Value> for DataInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => DataInput::List(items.into_iter().map(Payload::Plain).collect()),
            other => DataInput::Single(Payload::Plain(other)),
        }
    }
}

/// How datasets are named
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Names {
    /// `data_0`, `data_1`, ...
    #[default]
    Default,
    /// `<stub>_0`, `<stub>_1`, ...
    Stub(String),
    /// One name per payload, in order
    List(Vec<String>),
}

impl Names {
    /// Produce exactly `count` names
    pub fn resolve(&self, count: usize) -> MapResult<Vec<String>> {
        match self {
            Names::List(names) => {
                if names.len() != count {
                    return Err(MapError::NameCountMismatch {
                        data: count,
                        names: names.len(),
                    });
                }
                let mut seen = HashSet::new();
                if let Some(duplicate) = names.iter().find(|name| !seen.insert(name.as_str())) {
                    return Err(MapError::DuplicateName(duplicate.clone()));
                }
                Ok(names.clone())
            }
            Names::Stub(stub) => Ok(generate_names(stub, count)),
            Names::Default => Ok(generate_names(DEFAULT_NAME_STUB, count)),
        }
    }
}

impl From<&str> for Names {
    fn from(stub: &str) -> Self {
        Names::Stub(stub.to_string())
    }
}

impl From<Vec<String>> for Names {
    fn from(names: Vec<String>) -> Self {
        Names::List(names)
    }
}

fn generate_names(stub: &str, count: usize) -> Vec<String> {
    (0..count).map(|idx| format!("{}_{}", stub, idx)).collect()
}

/// A payload converted to plain JSON, paired with its dataset name
#[derive(Debug, Clone, PartialEq)]
pub struct NamedDataset {
    pub name: String,
    pub data: Value,
}

/// Pair every payload with a name and convert geo payloads to plain GeoJSON.
/// The output has one entry per input payload, in input order.
pub fn normalize(data: DataInput, names: &Names) -> MapResult<Vec<NamedDataset>> {
    let payloads = data.into_payloads();
    let names = names.resolve(payloads.len())?;
    debug!("Normalizing {} datasets", payloads.len());

    Ok(payloads
        .into_iter()
        .zip(names)
        .map(|(payload, name)| NamedDataset {
            name,
            data: payload.into_plain(),
        })
        .collect())
}
