use std::io;
use std::path::Path;
use tracing::{info, warn};
use url::Url;

/// Something that can show a URL to the user
pub trait BrowserLauncher {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// The default system browser. `webbrowser` has no explicit new-tab call;
/// browsers that are already running open the page in a new tab.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        webbrowser::open(url)
    }
}

/// Percent-encoded `file://` URL for a local path, made absolute first.
/// `None` when the path cannot be expressed as a file URL.
pub fn file_url(path: &Path) -> Option<Url> {
    let path = std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf());
    Url::from_file_path(&path).ok()
}

/// Open a local HTML file through `launcher`; with [`SystemBrowser`] that is
/// a new tab where the browser supports it. Failures are logged and otherwise
/// ignored; returns whether a browser was launched.
pub fn open_in_browser(launcher: &dyn BrowserLauncher, path: &Path) -> bool {
    let Some(url) = file_url(path) else {
        warn!("Cannot build a file URL for {}, not opening browser", path.display());
        return false;
    };

    info!("Opening {} in browser", url);
    match launcher.open(url.as_str()) {
        Ok(()) => true,
        Err(err) => {
            warn!("Failed to open browser for {}: {}", url, err);
            false
        }
    }
}
