use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::{Command, CommandResult, Session};
use crate::consts::format_bytes;
use crate::service::SelectedFile;

pub struct OpenCommand;

#[async_trait]
impl Command for OpenCommand {
    fn name(&self) -> &str {
        "/open"
    }

    fn aliases(&self) -> &[&str] {
        &["/file"]
    }

    fn usage(&self) -> &str {
        "<path>"
    }

    fn description(&self) -> &str {
        "pick the PDF to upload"
    }

    async fn execute(&self, args: &str, session: &mut Session) -> CommandResult {
        if args.is_empty() {
            eprintln!("  usage: /open <path>");
            return CommandResult::Handled;
        }
        open_into(&resolve_path(args), session).await;
        CommandResult::Handled
    }
}

/// Read `path` and make it the selected file. Prints the outcome.
pub(super) async fn open_into(path: &Path, session: &mut Session) -> bool {
    match load_file(path).await {
        Ok(file) => {
            println!("  ✓ selected {} ({})", file.name, format_bytes(file.len()));
            if !looks_like_pdf(&file.bytes) {
                println!("  ! {} does not look like a PDF", file.name);
            }
            session.controller.select_file(file);
            true
        }
        Err(e) => {
            eprintln!("  ✗ {e:#}");
            false
        }
    }
}

/// Read a file from disk into a [`SelectedFile`] named after its last path component.
pub async fn load_file(path: &Path) -> Result<SelectedFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("{} is not a file", path.display()))?;
    Ok(SelectedFile::new(name, bytes))
}

/// Strip surrounding quotes and expand a leading `~/`.
pub(super) fn resolve_path(arg: &str) -> PathBuf {
    let arg = arg.trim();
    let arg = arg
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| arg.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(arg);

    if let Some(rest) = arg.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(arg)
}

fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF-")
}
