//! Download-and-merge orchestration for one source.
//!
//! Strictly linear: catalog lookup, stream selection, two sequential downloads
//! into temporary files, one merge, cleanup, report. Collaborators are injected
//! as trait objects so the sequence can be exercised without network or ffmpeg.

use crate::catalog::{Catalog, CatalogError};
use crate::config::MergeStatusPolicy;
use crate::fetch::{FetchError, StreamFetcher};
use crate::jitter::{Jitter, Sleeper, ThreadSleeper};
use crate::merge::{MergeError, MergeOutcome, Muxer};
use crate::naming::{self, TempRole};
use crate::source::SourceRef;
use crate::stream::{select_streams, StreamDescriptor, StreamsNotFound};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Progress of a run. Each run moves through these in order, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    NotStarted,
    StreamsResolved,
    Downloading,
    Merging,
    CleanedUp,
    Reported,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::NotStarted => "not started",
            Stage::StreamsResolved => "streams resolved",
            Stage::Downloading => "downloading",
            Stage::Merging => "merging",
            Stage::CleanedUp => "cleaned up",
            Stage::Reported => "reported",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("catalog lookup failed: {0}")]
    Catalog(#[from] CatalogError),
    #[error("download of stream {stream_id} failed: {source}")]
    Fetch {
        stream_id: String,
        #[source]
        source: FetchError,
    },
    #[error("merge failed to start: {0}")]
    Merge(#[from] MergeError),
    #[error("merge into {} exited with {}", .output.display(), exit_text(.exit_code))]
    MergeFailed {
        output: PathBuf,
        exit_code: Option<i32>,
    },
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn exit_text(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "a signal".to_string(),
    }
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub title: String,
    pub output: PathBuf,
    pub video: StreamDescriptor,
    pub audio: StreamDescriptor,
    pub video_bytes: u64,
    pub audio_bytes: u64,
    /// Merge exit status; may be a failure under `MergeStatusPolicy::Ignore`.
    pub merge: MergeOutcome,
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    Completed(RunReport),
    /// Selection found no usable pair; nothing was downloaded.
    StreamsNotFound {
        title: String,
        missing: StreamsNotFound,
        available: Vec<StreamDescriptor>,
    },
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Required video container and container of the merged file.
    pub container: String,
    pub merge_status: MergeStatusPolicy,
    /// Pause before the catalog lookup and before the first download; `None` disables.
    pub jitter: Option<Jitter>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            container: "mp4".to_string(),
            merge_status: MergeStatusPolicy::default(),
            jitter: None,
        }
    }
}

/// Temporary downloads owned by one run; removed on `cleanup` or drop, whichever comes first.
struct TempFiles {
    paths: Vec<PathBuf>,
}

impl TempFiles {
    fn new() -> Self {
        Self { paths: Vec::new() }
    }

    fn track(&mut self, path: &Path) {
        self.paths.push(path.to_path_buf());
    }

    fn cleanup(&mut self) {
        for path in self.paths.drain(..) {
            match fs::remove_file(&path) {
                Ok(()) => tracing::debug!(path = %path.display(), "removed temp file"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!(path = %path.display(), "could not remove temp file: {}", e),
            }
        }
    }
}

impl Drop for TempFiles {
    fn drop(&mut self) {
        self.cleanup();
    }
}

pub struct Pipeline<'a> {
    catalog: &'a dyn Catalog,
    fetcher: &'a dyn StreamFetcher,
    muxer: &'a dyn Muxer,
    sleeper: &'a dyn Sleeper,
    options: PipelineOptions,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        catalog: &'a dyn Catalog,
        fetcher: &'a dyn StreamFetcher,
        muxer: &'a dyn Muxer,
        options: PipelineOptions,
    ) -> Self {
        Self {
            catalog,
            fetcher,
            muxer,
            sleeper: &ThreadSleeper,
            options,
        }
    }

    /// Replaces how jitter delays are slept; the delays themselves still come from the options.
    pub fn with_sleeper(mut self, sleeper: &'a dyn Sleeper) -> Self {
        self.sleeper = sleeper;
        self
    }

    fn enter(&self, stage: Stage) {
        tracing::debug!(%stage, "pipeline stage");
    }

    fn pause(&self, label: &str) {
        if let Some(j) = &self.options.jitter {
            j.pause_with(label, self.sleeper);
        }
    }

    /// Runs the whole sequence for `source`, writing the merged file into `output_dir`
    /// (created if absent).
    pub fn run(&self, source: &SourceRef, output_dir: &Path) -> Result<RunOutcome, RunError> {
        self.enter(Stage::NotStarted);
        fs::create_dir_all(output_dir).map_err(|e| RunError::Io {
            path: output_dir.to_path_buf(),
            source: e,
        })?;

        self.pause("catalog lookup");
        let info = self.catalog.lookup(source)?;
        let pair = match select_streams(&info.streams, &self.options.container) {
            Ok(pair) => pair,
            Err(missing) => {
                tracing::warn!(title = %info.title, %missing, "no usable stream pair");
                return Ok(RunOutcome::StreamsNotFound {
                    title: info.title,
                    missing,
                    available: info.streams,
                });
            }
        };
        self.enter(Stage::StreamsResolved);
        tracing::info!(
            title = %info.title,
            video = %pair.video,
            audio = %pair.audio,
            "selected streams"
        );

        let base = naming::base_name(&info.title);
        let output = naming::resolve_output_path(output_dir, &base, &self.options.container);
        let video_tmp = naming::temp_path(output_dir, TempRole::Video, &base, &pair.video.container);
        let audio_tmp = naming::temp_path(output_dir, TempRole::Audio, &base, &pair.audio.container);

        let mut temps = TempFiles::new();
        self.enter(Stage::Downloading);
        self.pause("stream download");
        temps.track(&video_tmp);
        let video_bytes = self.fetch(&pair.video, &video_tmp)?;
        temps.track(&audio_tmp);
        let audio_bytes = self.fetch(&pair.audio, &audio_tmp)?;

        self.enter(Stage::Merging);
        let merged = self.muxer.merge(&video_tmp, &audio_tmp, &output);
        temps.cleanup();
        self.enter(Stage::CleanedUp);
        let merge = merged?;

        if !merge.success {
            match self.options.merge_status {
                MergeStatusPolicy::Enforce => {
                    return Err(RunError::MergeFailed {
                        output,
                        exit_code: merge.exit_code,
                    });
                }
                MergeStatusPolicy::Ignore => {
                    tracing::warn!(
                        output = %output.display(),
                        exit_code = ?merge.exit_code,
                        "merge exited unsuccessfully; reporting completion anyway"
                    );
                }
            }
        }

        self.enter(Stage::Reported);
        Ok(RunOutcome::Completed(RunReport {
            title: info.title,
            output,
            video: pair.video,
            audio: pair.audio,
            video_bytes,
            audio_bytes,
            merge,
        }))
    }

    fn fetch(&self, stream: &StreamDescriptor, dest: &Path) -> Result<u64, RunError> {
        self.fetcher
            .fetch(stream, dest)
            .map_err(|source| RunError::Fetch {
                stream_id: stream.id.clone(),
                source,
            })
    }
}
