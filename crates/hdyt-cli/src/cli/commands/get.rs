//! `hdyt get [url]`: download one video and merge its tracks.

use anyhow::{Context, Result};
use hdyt_core::backend::{self, BackendOutcome, RunSettings};
use hdyt_core::config::{Backend, HdytConfig, MergeStatusPolicy};
use hdyt_core::diagnose::diagnose;
use hdyt_core::merge::MergeOutcome;
use hdyt_core::pipeline::{RunOutcome, RunReport};
use hdyt_core::source::SourceRef;
use hdyt_core::stream::StreamDescriptor;
use hdyt_core::tools::{self, Capabilities};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::error_chain;
use crate::cli::prompt;

/// Arguments of `hdyt get` after clap parsing.
#[derive(Debug, Clone, Default)]
pub struct GetRequest {
    pub url: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub backend: Option<Backend>,
    pub strict_merge: bool,
    pub no_jitter: bool,
    pub install_missing: bool,
}

/// Config values with command-line overrides applied.
fn settings_for(cfg: &HdytConfig, req: &GetRequest) -> RunSettings {
    let mut settings = RunSettings::from_config(cfg);
    if let Some(b) = req.backend {
        settings.backend = b;
    }
    if req.strict_merge {
        settings.pipeline.merge_status = MergeStatusPolicy::Enforce;
    }
    if req.no_jitter {
        settings.pipeline.jitter = None;
    }
    settings
}

/// Pre-flight check; installs yt-dlp first when asked to and it is missing.
fn preflight(cfg: &HdytConfig, install_missing: bool) -> Result<Capabilities> {
    let tools_cfg = cfg.tools();
    let caps = tools::probe_capabilities(&tools_cfg);
    if caps.has_ytdlp() || !install_missing {
        return Ok(caps);
    }
    println!("yt-dlp not found; installing it with {} -m pip ...", tools_cfg.python);
    tools::install_ytdlp(&tools_cfg.python)?;
    Ok(tools::probe_capabilities(&tools_cfg))
}

/// URL and output directory from the flags, prompting only for what was not given.
fn resolve_target<R: BufRead, W: Write>(
    req: &GetRequest,
    input: &mut R,
    out: &mut W,
) -> Result<(String, PathBuf)> {
    match (&req.url, &req.output_dir) {
        (Some(url), dir) => Ok((
            url.clone(),
            dir.clone().unwrap_or_else(|| PathBuf::from(".")),
        )),
        (None, Some(dir)) => Ok((prompt::ask_url(input, out)?, dir.clone())),
        (None, None) => prompt::ask_url_and_dir(input, out),
    }
}

pub fn run_get(cfg: &HdytConfig, req: GetRequest) -> Result<()> {
    let (url, output_dir) = {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        resolve_target(&req, &mut input, &mut std::io::stdout())?
    };
    let source = SourceRef::parse(&url)?;
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;

    let settings = settings_for(cfg, &req);
    let caps = preflight(cfg, req.install_missing)?;
    tracing::info!(
        %source,
        host = source.host().unwrap_or(""),
        dir = %output_dir.display(),
        backend = ?settings.backend,
        "get"
    );
    println!("Fetching {} ...", source);

    match backend::run(&settings, &caps, &source, &output_dir) {
        Ok(BackendOutcome::Library(RunOutcome::Completed(report))) => {
            print_report(&report);
            Ok(())
        }
        Ok(BackendOutcome::Library(RunOutcome::StreamsNotFound {
            title,
            missing,
            available,
        })) => {
            println!("Couldn't find suitable video and audio streams for \"{}\" ({}).", title, missing);
            print_streams(&available);
            anyhow::bail!("no suitable streams");
        }
        Ok(BackendOutcome::Downloader(outcome)) => report_downloader(outcome, &output_dir),
        Err(err) => {
            let text = error_chain(&err);
            println!("An error occurred: {}", text);
            println!();
            println!("{}", diagnose(&text).remediation());
            Err(anyhow::Error::new(err).context("download failed"))
        }
    }
}

fn print_report(report: &RunReport) {
    println!("Downloaded: {}", report.title);
    println!("Video: {} ({} bytes)", report.video, report.video_bytes);
    println!("Audio: {} ({} bytes)", report.audio, report.audio_bytes);
    if report.merge.success {
        println!(
            "Download and merge complete! File saved as: {}",
            report.output.display()
        );
    } else {
        println!(
            "Merge finished with {}; the file may be missing or incomplete: {}",
            exit_text(&report.merge),
            report.output.display()
        );
    }
}

pub(crate) fn print_streams(streams: &[StreamDescriptor]) {
    if streams.is_empty() {
        println!("No streams available.");
        return;
    }
    println!("Available streams:");
    for s in streams {
        println!("  {}", s);
    }
}

fn report_downloader(outcome: MergeOutcome, output_dir: &std::path::Path) -> Result<()> {
    if outcome.success {
        println!("Download complete (yt-dlp). Files saved in: {}", output_dir.display());
        Ok(())
    } else {
        anyhow::bail!("yt-dlp finished with {}", exit_text(&outcome));
    }
}

fn exit_text(outcome: &MergeOutcome) -> String {
    match outcome.exit_code {
        Some(c) => format!("exit status {}", c),
        None => "a signal".to_string(),
    }
}
