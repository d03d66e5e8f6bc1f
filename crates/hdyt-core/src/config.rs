use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Extraction backend: own stream selection + ffmpeg merge, or hand the whole job to yt-dlp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Library,
    Downloader,
}

/// What a non-zero ffmpeg exit does to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStatusPolicy {
    /// Warn and still report the run as completed.
    #[default]
    Ignore,
    /// Fail the run.
    Enforce,
}

/// Random delay window before the catalog lookup and the first stream download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JitterConfig {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            min_ms: 1000,
            max_ms: 3000,
        }
    }
}

impl JitterConfig {
    pub fn window(&self) -> (Duration, Duration) {
        let lo = self.min_ms.min(self.max_ms);
        let hi = self.min_ms.max(self.max_ms);
        (Duration::from_millis(lo), Duration::from_millis(hi))
    }
}

/// Names or paths of the external programs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPaths {
    pub ffmpeg: String,
    pub ytdlp: String,
    /// Interpreter used for `pip install yt-dlp` when `--install-missing` is given.
    pub python: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ytdlp: "yt-dlp".to_string(),
            python: "python3".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/hdyt/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HdytConfig {
    /// Target container of the merged file; also the required video stream container.
    pub container: String,
    /// ffmpeg audio codec for the merge (`aac` re-encodes, `copy` keeps the stream).
    pub audio_codec: String,
    /// Default backend when `--backend` is not given.
    #[serde(default)]
    pub backend: Option<Backend>,
    /// Merge exit status handling; missing means `ignore`.
    #[serde(default)]
    pub merge_status: Option<MergeStatusPolicy>,
    /// Jitter window; missing means the built-in default window.
    #[serde(default)]
    pub jitter: Option<JitterConfig>,
    /// External program locations; missing means look them up on PATH.
    #[serde(default)]
    pub tools: Option<ToolPaths>,
}

impl Default for HdytConfig {
    fn default() -> Self {
        Self {
            container: "mp4".to_string(),
            audio_codec: "aac".to_string(),
            backend: None,
            merge_status: None,
            jitter: None,
            tools: None,
        }
    }
}

impl HdytConfig {
    pub fn backend(&self) -> Backend {
        self.backend.unwrap_or_default()
    }

    pub fn merge_status(&self) -> MergeStatusPolicy {
        self.merge_status.unwrap_or_default()
    }

    pub fn jitter(&self) -> JitterConfig {
        self.jitter.unwrap_or_default()
    }

    pub fn tools(&self) -> ToolPaths {
        self.tools.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hdyt")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HdytConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HdytConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: HdytConfig = toml::from_str(&data)?;
    Ok(cfg)
}
