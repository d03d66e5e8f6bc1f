//! Pre-flight capability check for the external programs.
//!
//! Run once by the caller before a download; the result is passed into the
//! backends instead of having them probe or install anything themselves.

use crate::config::ToolPaths;
use anyhow::{bail, Context, Result};
use std::process::{Command, Stdio};

/// Which external programs are usable, with their reported versions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub ytdlp: Option<String>,
    pub ffmpeg: Option<String>,
}

impl Capabilities {
    pub fn has_ytdlp(&self) -> bool {
        self.ytdlp.is_some()
    }

    pub fn has_ffmpeg(&self) -> bool {
        self.ffmpeg.is_some()
    }
}

/// Runs `program version_flag` and returns the first non-empty stdout line, or
/// `None` if the program is missing or exits non-zero.
pub fn probe(program: &str, version_flag: &str) -> Option<String> {
    let output = Command::new(program)
        .arg(version_flag)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        tracing::debug!(program, status = ?output.status, "probe failed");
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("unknown version")
        .to_string();
    Some(line)
}

pub fn probe_capabilities(tools: &ToolPaths) -> Capabilities {
    let caps = Capabilities {
        ytdlp: probe(&tools.ytdlp, "--version"),
        ffmpeg: probe(&tools.ffmpeg, "-version"),
    };
    tracing::info!(ytdlp = ?caps.ytdlp, ffmpeg = ?caps.ffmpeg, "capabilities");
    caps
}

/// `python -m pip install --upgrade yt-dlp`. Only called on explicit operator request.
pub fn install_ytdlp(python: &str) -> Result<()> {
    tracing::info!(python, "installing yt-dlp via pip");
    let status = Command::new(python)
        .args(["-m", "pip", "install", "--upgrade", "yt-dlp"])
        .stdin(Stdio::null())
        .status()
        .with_context(|| format!("run {} -m pip", python))?;
    if !status.success() {
        bail!("pip install yt-dlp failed with {}", status);
    }
    Ok(())
}
