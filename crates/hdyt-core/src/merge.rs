//! Multiplexing the downloaded video and audio tracks with ffmpeg.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Exit status of the merge process, always reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    pub success: bool,
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
}

impl MergeOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            exit_code: Some(0),
        }
    }

    pub fn from_status(status: ExitStatus) -> Self {
        Self {
            success: status.success(),
            exit_code: status.code(),
        }
    }
}

/// The merge process could not be started at all.
#[derive(Debug, thiserror::Error)]
#[error("could not run {program}: {source}")]
pub struct MergeError {
    pub program: String,
    #[source]
    pub source: std::io::Error,
}

/// Combines one video-only and one audio-only file into `output`.
pub trait Muxer {
    fn merge(&self, video: &Path, audio: &Path, output: &Path) -> Result<MergeOutcome, MergeError>;
}

/// `ffmpeg -i video -i audio -c:v copy -c:a <codec> output`.
#[derive(Debug, Clone)]
pub struct FfmpegMuxer {
    program: String,
    audio_codec: String,
}

impl FfmpegMuxer {
    pub fn new(program: impl Into<String>, audio_codec: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            audio_codec: audio_codec.into(),
        }
    }

    /// Argument vector passed to ffmpeg. `-y` is safe: `output` is always a fresh path.
    pub fn args(&self, video: &Path, audio: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-hide_banner", "-loglevel", "error", "-y", "-i"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push(video.as_os_str().to_owned());
        args.push("-i".into());
        args.push(audio.as_os_str().to_owned());
        args.push("-c:v".into());
        args.push("copy".into());
        args.push("-c:a".into());
        args.push(self.audio_codec.clone().into());
        args.push(output.as_os_str().to_owned());
        args
    }
}

impl Muxer for FfmpegMuxer {
    fn merge(&self, video: &Path, audio: &Path, output: &Path) -> Result<MergeOutcome, MergeError> {
        let args = self.args(video, audio, output);
        tracing::debug!(program = %self.program, ?args, "merge");
        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .status()
            .map_err(|source| MergeError {
                program: self.program.clone(),
                source,
            })?;
        Ok(MergeOutcome::from_status(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_copy_video_and_encode_audio() {
        let m = FfmpegMuxer::new("ffmpeg", "aac");
        let args = m.args(
            Path::new("out/video_t.mp4"),
            Path::new("out/audio_t.m4a"),
            Path::new("out/t.mp4"),
        );
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            [
                "-hide_banner", "-loglevel", "error", "-y", "-i", "out/video_t.mp4", "-i",
                "out/audio_t.m4a", "-c:v", "copy", "-c:a", "aac", "out/t.mp4",
            ]
        );
    }

    #[test]
    fn paths_with_spaces_stay_single_arguments() {
        let m = FfmpegMuxer::new("ffmpeg", "copy");
        let args = m.args(
            Path::new("my dir/video_a b.mp4"),
            Path::new("my dir/audio_a b.m4a"),
            Path::new("my dir/a b.mp4"),
        );
        assert_eq!(args[5], OsString::from("my dir/video_a b.mp4"));
        assert_eq!(args.last().unwrap(), &OsString::from("my dir/a b.mp4"));
    }

    #[test]
    fn missing_program_is_merge_error() {
        let m = FfmpegMuxer::new("/nonexistent/hdyt-test-ffmpeg", "aac");
        let err = m
            .merge(Path::new("v.mp4"), Path::new("a.m4a"), Path::new("o.mp4"))
            .unwrap_err();
        assert_eq!(err.program, "/nonexistent/hdyt-test-ffmpeg");
    }

    #[cfg(unix)]
    #[test]
    fn outcome_reflects_exit_code() {
        let ok = Command::new("true").status().unwrap();
        assert_eq!(MergeOutcome::from_status(ok), MergeOutcome::succeeded());
        let bad = Command::new("false").status().unwrap();
        let outcome = MergeOutcome::from_status(bad);
        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, Some(1));
    }
}
