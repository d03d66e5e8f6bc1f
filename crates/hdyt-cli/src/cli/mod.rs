//! CLI for hdyt.

mod commands;
mod prompt;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use hdyt_core::config::{self, Backend};
use std::path::PathBuf;

use commands::{run_completions, run_doctor, run_get, run_man, run_streams, GetRequest};

/// Top-level CLI for hdyt.
#[derive(Debug, Parser)]
#[command(name = "hdyt")]
#[command(about = "Download a video as separate best video and audio streams and merge them with ffmpeg", long_about = None)]
pub struct Cli {
    /// Trace-level logging for hdyt itself (log file, or stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Extraction backend as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    /// Own stream selection, curl downloads, ffmpeg merge.
    Library,
    /// Let yt-dlp select, download and merge.
    Downloader,
}

impl From<BackendArg> for Backend {
    fn from(b: BackendArg) -> Self {
        match b {
            BackendArg::Library => Backend::Library,
            BackendArg::Downloader => Backend::Downloader,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download one video and merge its best video-only and audio-only streams.
    Get {
        /// Video page URL. Prompted for (along with the directory) when omitted.
        url: Option<String>,

        /// Directory for the merged file (created if missing; default: current directory).
        #[arg(short = 'o', long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Override the configured backend.
        #[arg(long, value_enum)]
        backend: Option<BackendArg>,

        /// Fail the run when ffmpeg exits non-zero instead of only warning.
        #[arg(long)]
        strict_merge: bool,

        /// Skip the random delay before network calls.
        #[arg(long)]
        no_jitter: bool,

        /// Install yt-dlp with pip if the pre-flight check does not find it.
        #[arg(long)]
        install_missing: bool,
    },

    /// List the streams the catalog reports for a URL and the pair that would be selected.
    Streams {
        /// Video page URL.
        url: String,
    },

    /// Check that yt-dlp and ffmpeg are available.
    Doctor,

    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff).
    Man,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Get {
                url,
                output_dir,
                backend,
                strict_merge,
                no_jitter,
                install_missing,
            } => run_get(
                &cfg,
                GetRequest {
                    url,
                    output_dir,
                    backend: backend.map(Backend::from),
                    strict_merge,
                    no_jitter,
                    install_missing,
                },
            )?,
            CliCommand::Streams { url } => run_streams(&cfg, &url)?,
            CliCommand::Doctor => run_doctor(&cfg)?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
