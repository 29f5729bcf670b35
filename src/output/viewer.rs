// src/output/viewer.rs
//! Hands a file to the platform's default viewer.
//!
//! Printing and "save as PDF" happen in whatever program the desktop opens
//! HTML with; this module only launches it.

use crate::error::AppError;
use std::path::Path;
use std::process::{Command, Stdio};

/// Opens `path` with the system viewer and waits for the launcher to return.
pub fn open_in_viewer(path: &Path) -> Result<(), AppError> {
    let mut command = viewer_command(path);
    log::debug!("Launching viewer: {:?}", command);

    let output = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| viewer_failed(path, format!("failed to launch viewer: {}", e)))?;

    if output.status.success() {
        log::info!("Opened {} in the system viewer", path.display());
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(viewer_failed(path, stderr.trim().to_string()))
    }
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    // The empty string is the window title `start` expects first
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}

fn viewer_failed(path: &Path, message: String) -> AppError {
    AppError::ViewerFailed {
        path: path.display().to_string(),
        message,
    }
}
