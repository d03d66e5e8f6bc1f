//! `hdyt doctor`: pre-flight capability report.

use anyhow::Result;
use hdyt_core::config::{self, HdytConfig};
use hdyt_core::tools;

pub fn run_doctor(cfg: &HdytConfig) -> Result<()> {
    let paths = cfg.tools();
    let caps = tools::probe_capabilities(&paths);
    println!("yt-dlp ({}): {}", paths.ytdlp, caps.ytdlp.as_deref().unwrap_or("missing"));
    println!("ffmpeg ({}): {}", paths.ffmpeg, caps.ffmpeg.as_deref().unwrap_or("missing"));
    if let Ok(path) = config::config_path() {
        println!("config: {}", path.display());
    }
    if !caps.has_ytdlp() {
        println!("Install yt-dlp with `hdyt get --install-missing` or `pip install --upgrade yt-dlp`.");
    }
    if !caps.has_ffmpeg() {
        println!("ffmpeg is required for the library backend; install it from your package manager.");
    }
    Ok(())
}
