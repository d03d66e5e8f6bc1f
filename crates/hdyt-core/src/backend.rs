//! Backend dispatch: the in-process pipeline, or the external downloader CLI.
//!
//! Both take the caller's `Capabilities` and refuse to start when a required
//! program is missing; installing tools is the caller's decision.

use crate::catalog::YtDlpCatalog;
use crate::config::{Backend, HdytConfig};
use crate::fetch::CurlFetcher;
use crate::jitter::Jitter;
use crate::merge::{FfmpegMuxer, MergeOutcome};
use crate::pipeline::{Pipeline, PipelineOptions, RunError, RunOutcome};
use crate::source::SourceRef;
use crate::tools::Capabilities;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("{tool} is not available; run `hdyt doctor` or pass --install-missing")]
    ToolMissing { tool: &'static str },
    #[error(transparent)]
    Run(#[from] RunError),
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not create {}: {source}", .path.display())]
    OutputDir {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-run settings resolved from config and CLI flags.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub backend: Backend,
    pub pipeline: PipelineOptions,
    pub audio_codec: String,
    pub ffmpeg: String,
    pub ytdlp: String,
}

impl RunSettings {
    pub fn from_config(cfg: &HdytConfig) -> Self {
        let tools = cfg.tools();
        Self {
            backend: cfg.backend(),
            pipeline: PipelineOptions {
                container: cfg.container.clone(),
                merge_status: cfg.merge_status(),
                jitter: Some(Jitter::from_config(&cfg.jitter())),
            },
            audio_codec: cfg.audio_codec.clone(),
            ffmpeg: tools.ffmpeg,
            ytdlp: tools.ytdlp,
        }
    }
}

/// Result of either backend.
#[derive(Debug, Clone)]
pub enum BackendOutcome {
    Library(RunOutcome),
    /// The external downloader did its own selection and merge; only its exit status is known.
    Downloader(MergeOutcome),
}

pub fn run(
    settings: &RunSettings,
    caps: &Capabilities,
    source: &SourceRef,
    output_dir: &Path,
) -> Result<BackendOutcome, BackendError> {
    match settings.backend {
        Backend::Library => run_library(settings, caps, source, output_dir).map(BackendOutcome::Library),
        Backend::Downloader => {
            run_downloader(settings, caps, source, output_dir).map(BackendOutcome::Downloader)
        }
    }
}

/// Catalog lookup + own selection + curl downloads + ffmpeg merge.
pub fn run_library(
    settings: &RunSettings,
    caps: &Capabilities,
    source: &SourceRef,
    output_dir: &Path,
) -> Result<RunOutcome, BackendError> {
    if !caps.has_ytdlp() {
        return Err(BackendError::ToolMissing { tool: "yt-dlp" });
    }
    if !caps.has_ffmpeg() {
        return Err(BackendError::ToolMissing { tool: "ffmpeg" });
    }
    let catalog = YtDlpCatalog::new(settings.ytdlp.clone());
    let fetcher = CurlFetcher::default();
    let muxer = FfmpegMuxer::new(settings.ffmpeg.clone(), settings.audio_codec.clone());
    let pipeline = Pipeline::new(&catalog, &fetcher, &muxer, settings.pipeline.clone());
    Ok(pipeline.run(source, output_dir)?)
}

/// Arguments for the external downloader: best video + best audio merged into `container`.
pub fn downloader_args(source: &SourceRef, output_dir: &Path, container: &str) -> Vec<OsString> {
    let template = output_dir.join("%(title)s.%(ext)s");
    vec![
        "-f".into(),
        "bestvideo+bestaudio/best".into(),
        "--merge-output-format".into(),
        container.into(),
        "--no-playlist".into(),
        "-o".into(),
        template.into_os_string(),
        source.as_str().into(),
    ]
}

/// Hands the whole job to yt-dlp. Its exit status is returned, not judged.
pub fn run_downloader(
    settings: &RunSettings,
    caps: &Capabilities,
    source: &SourceRef,
    output_dir: &Path,
) -> Result<MergeOutcome, BackendError> {
    if !caps.has_ytdlp() {
        return Err(BackendError::ToolMissing { tool: "yt-dlp" });
    }
    std::fs::create_dir_all(output_dir).map_err(|source| BackendError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let args = downloader_args(source, output_dir, &settings.pipeline.container);
    tracing::info!(program = %settings.ytdlp, ?args, "external downloader");
    if let Some(j) = &settings.pipeline.jitter {
        j.pause("external downloader");
    }
    let status = Command::new(&settings.ytdlp)
        .args(&args)
        .stdin(Stdio::null())
        .status()
        .map_err(|source| BackendError::Spawn {
            program: settings.ytdlp.clone(),
            source,
        })?;
    Ok(MergeOutcome::from_status(status))
}
