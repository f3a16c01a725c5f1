use std::{
    fs, io,
    path::{Path, PathBuf},
    process::{Child, Command, ExitStatus, Stdio},
    thread::{self, JoinHandle},
};

use anyhow::{Context, Result, anyhow};
use arboard::Clipboard;
use tracing::{info, warn};

use crate::models::Asset;

/// Hands `href` to the platform opener without waiting for it.
pub fn open_external(href: &str) -> Result<()> {
    let mut cmd = opener(href);
    cmd.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
    let child = cmd.spawn().with_context(|| format!("failed to open {}", href))?;
    info!(href, "opened external link");
    reap(child);
    Ok(())
}

/// Waits on the opener in the background so it does not linger as a zombie.
fn reap(mut child: Child) -> JoinHandle<io::Result<ExitStatus>> {
    thread::spawn(move || {
        let status = child.wait();
        match &status {
            Ok(s) if !s.success() => warn!(status = %s, "opener exited with failure"),
            Err(e) => warn!(error = %e, "could not wait on opener"),
            _ => {}
        }
        status
    })
}

#[cfg(target_os = "macos")]
fn opener(href: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(href);
    cmd
}

#[cfg(target_os = "windows")]
fn opener(href: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(href);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener(href: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(href);
    cmd
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().map_err(|e| anyhow!("clipboard unavailable: {}", e))?;
    clipboard
        .set_text(text.to_owned())
        .map_err(|e| anyhow!("failed to copy to clipboard: {}", e))?;
    Ok(())
}

/// Configured directory, then the OS downloads folder, then the working directory.
pub fn resolve_download_dir(configured: Option<&str>) -> PathBuf {
    if let Some(dir) = configured {
        return PathBuf::from(shellexpand::tilde(dir).into_owned());
    }
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Copies the asset into `dest_dir` under its suggested name.
pub fn download_asset(asset: &Asset, dest_dir: &Path) -> Result<PathBuf> {
    let source = PathBuf::from(shellexpand::tilde(&asset.path).into_owned());
    if !source.is_file() {
        warn!(path = %source.display(), "asset missing");
        return Err(anyhow!("{} not found", source.display()));
    }
    fs::create_dir_all(dest_dir)
        .with_context(|| format!("could not create {}", dest_dir.display()))?;
    let dest = dest_dir.join(&asset.suggested_name);
    fs::copy(&source, &dest)
        .with_context(|| format!("could not copy {} to {}", source.display(), dest.display()))?;
    info!(dest = %dest.display(), "asset saved");
    Ok(dest)
}
