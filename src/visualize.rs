//! Quickly visualize data in the browser over Mapbox tiles with kepler.gl.
//!
//! [`Visualize`] ties the pieces together: it resolves the Mapbox token, loads
//! and merges the config template, names and normalizes the data, writes the
//! HTML page and optionally opens it.
//!
//! ```rust,no_run
//! use keplergl::dataset::Payload;
//! use keplergl::visualize::{Visualize, VisualizeOptions};
//! use serde_json::json;
//!
//! let data = Payload::Plain(json!({"type": "Point", "coordinates": [13.4, 52.5]}));
//! let vis = Visualize::with_data(
//!     data,
//!     VisualizeOptions {
//!         style: Some("dark".to_string()),
//!         open_browser: true,
//!         ..Default::default()
//!     },
//! )?;
//! println!("{}", vis.path().display());
//! # Ok::<(), keplergl::errors::MapError>(())
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::browser::{self, BrowserLauncher, SystemBrowser};
use crate::config::{self, ConfigSource};
use crate::credentials;
use crate::dataset::{self, DataInput, Names};
use crate::errors::MapResult;
use crate::kepler::KeplerGl;

/// Suffix appended to an explicit output map path
pub const OUTPUT_SUFFIX: &str = "_vis.html";

/// File name used inside a fresh temp directory when no output path is given
pub const DEFAULT_MAP_FILE: &str = "defaultmap_vis.html";

/// Options for building a map
#[derive(Debug, Clone, Default)]
pub struct VisualizeOptions {
    /// Dataset names for the initial data
    pub names: Names,
    /// Hide the kepler.gl side panel
    pub read_only: bool,
    /// Mapbox token; wins over `fallback_api_key`
    pub api_key: Option<String>,
    /// Token used when `api_key` is absent, typically read from the environment
    pub fallback_api_key: Option<String>,
    /// Preset style name or custom style url
    pub style: Option<String>,
    /// Config template; the bundled one when absent
    pub config_file: Option<PathBuf>,
    /// Output path stem; `_vis.html` is appended
    pub output_map: Option<PathBuf>,
    /// Open the written map in the default browser
    pub open_browser: bool,
}

/// Resolve where the map is written. Without an explicit stem a new temp
/// directory is created and left in place.
pub fn resolve_output_path(output_map: Option<&Path>) -> MapResult<PathBuf> {
    match output_map {
        Some(stem) => {
            let mut path = OsString::from(stem.as_os_str());
            path.push(OUTPUT_SUFFIX);
            Ok(PathBuf::from(path))
        }
        None => {
            let dir = tempfile::Builder::new()
                .prefix("keplergl")
                .tempdir()?
                .keep();
            Ok(dir.join(DEFAULT_MAP_FILE))
        }
    }
}

#[derive(Debug)]
pub struct Visualize {
    api_key: Option<String>,
    path: PathBuf,
    map: KeplerGl,
    html_path: Option<PathBuf>,
}

impl Visualize {
    /// Resolve the token, output path and config, and create an empty map
    pub fn new(options: VisualizeOptions) -> MapResult<Self> {
        let api_key = credentials::resolve_api_key(options.api_key, options.fallback_api_key);
        let config_source = ConfigSource::from_path(options.config_file);
        let path = resolve_output_path(options.output_map.as_deref())?;
        debug!("Map output path: {}", path.display());

        let config = config::load_config(
            &config_source,
            api_key.as_deref(),
            options.style.as_deref(),
        )?;
        let map = KeplerGl::new(config).with_mapbox_token(api_key.clone());

        Ok(Self {
            api_key,
            path,
            map,
            html_path: None,
        })
    }

    /// Build the map, add `data`, write the page and optionally open it
    pub fn with_data(data: impl Into<DataInput>, options: VisualizeOptions) -> MapResult<Self> {
        let names = options.names.clone();
        let read_only = options.read_only;
        let open_browser = options.open_browser;

        let mut vis = Self::new(options)?;
        vis.add_data(data, &names)?;
        vis.render(open_browser, read_only, true)?;
        Ok(vis)
    }

    /// Name, normalize and add datasets to the map
    pub fn add_data(&mut self, data: impl Into<DataInput>, names: &Names) -> MapResult<()> {
        let datasets = dataset::normalize(data.into(), names)?;
        info!("Adding {} datasets to map", datasets.len());
        for dataset in datasets {
            self.map.add_data(dataset.data, &dataset.name);
        }
        Ok(())
    }

    /// Write the map to the output path and optionally open it in a browser
    pub fn render(&mut self, open_browser: bool, read_only: bool, center_map: bool) -> MapResult<PathBuf> {
        self.render_with(&SystemBrowser, open_browser, read_only, center_map)
    }

    /// As [`Visualize::render`], opening the page through `launcher`. A launch
    /// failure is logged and the path is still returned.
    pub fn render_with(
        &mut self,
        launcher: &dyn BrowserLauncher,
        open_browser: bool,
        read_only: bool,
        center_map: bool,
    ) -> MapResult<PathBuf> {
        self.map.save_to_html(&self.path, read_only, center_map)?;
        if open_browser {
            browser::open_in_browser(launcher, &self.path);
        }
        self.html_path = Some(self.path.clone());
        Ok(self.path.clone())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set once the map has been rendered
    pub fn html_path(&self) -> Option<&Path> {
        self.html_path.as_deref()
    }

    pub fn map(&self) -> &KeplerGl {
        &self.map
    }
}
