//! Project-wide constants.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");

/// Document Service used when neither the CLI nor the config names one.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Store endpoint, relative to the server URL.
pub const UPLOAD_PATH: &str = "/upload/";

/// Query endpoint, relative to the server URL.
pub const ASK_PATH: &str = "/ask/";

pub const PDF_MIME: &str = "application/pdf";

/// Config key holding the persisted server URL.
pub const SERVER_URL_KEY: &str = "server_url";

/// Default database path: `~/.askpdf/askpdf.db`.
pub fn default_db_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".askpdf").join("askpdf.db"))
}

/// Human-readable byte size (e.g. 1.5 KiB, 3.2 MiB).
pub fn format_bytes(n: usize) -> String {
    const UNITS: &[&str] = &["KiB", "MiB", "GiB"];
    if n < 1024 {
        return format!("{n} B");
    }
    let mut size = n as f64;
    let mut unit = "B";
    for u in UNITS {
        if size < 1024.0 {
            break;
        }
        size /= 1024.0;
        unit = u;
    }
    format!("{size:.1} {unit}")
}
