//! Engine runtime archive resolution and download.
//!
//! Resolution order: explicit configured path, then the default location
//! under the system temp directory, then a download from the fixed remote
//! URL when permitted. A partial download never survives a failed write.

use crate::config::SparkConfig;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Base URL the runtime archive is downloaded from.
pub const RUNTIME_BASE_URL: &str = "https://s3.amazonaws.com/td-spark/";

/// Fixed runtime archive filename.
pub const RUNTIME_ARCHIVE: &str = "td-spark-assembly_2.11-1.1.0.jar";

/// Default local location of the runtime archive.
pub fn default_runtime_path() -> PathBuf {
    std::env::temp_dir().join(RUNTIME_ARCHIVE)
}

/// Resolve a local runtime archive per the configuration, downloading it
/// when missing and `download_if_missing` allows.
pub fn resolve_runtime(config: &SparkConfig) -> Result<PathBuf> {
    let path = config
        .archive_path
        .clone()
        .unwrap_or_else(default_runtime_path);

    if path.exists() {
        return Ok(path);
    }

    if config.download_if_missing {
        download_runtime(&path)?;
        return Ok(path);
    }

    Err(Error::NotFound(format!(
        "engine runtime archive not found at {} and download_if_missing is disabled",
        path.display()
    )))
}

/// Download the runtime archive from the fixed remote URL.
pub fn download_runtime(destination: &Path) -> Result<()> {
    let url = format!("{RUNTIME_BASE_URL}{RUNTIME_ARCHIVE}");
    download_from(&url, destination)
}

pub(crate) fn download_from(url: &str, destination: &Path) -> Result<()> {
    let mut response = reqwest::blocking::get(url)
        .map_err(|e| Error::Remote(format!("failed to access the download URL {url}: {e}")))?;

    if !response.status().is_success() {
        return Err(Error::Remote(format!(
            "failed to access the download URL {url}: HTTP {}",
            response.status()
        )));
    }

    info!(url = url, "downloading engine runtime archive");

    let mut file = fs::File::create(destination)?;
    if let Err(e) = response.copy_to(&mut file) {
        drop(file);
        if let Err(remove) = fs::remove_file(destination) {
            warn!(
                path = %destination.display(),
                error = %remove,
                "failed to remove partial runtime download"
            );
        }
        return Err(Error::Remote(format!(
            "failed to download the engine runtime archive: {e}"
        )));
    }

    info!(path = %destination.display(), "engine runtime download complete");
    Ok(())
}
