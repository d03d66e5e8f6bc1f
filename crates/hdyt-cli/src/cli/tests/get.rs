//! Tests for the get subcommand.

use super::parse;
use crate::cli::{BackendArg, Cli, CliCommand};
use clap::Parser;
use hdyt_core::config::Backend;

#[test]
fn cli_parse_get_with_url() {
    match parse(&["hdyt", "get", "https://www.youtube.com/watch?v=abc"]) {
        CliCommand::Get {
            url,
            output_dir,
            backend,
            strict_merge,
            no_jitter,
            install_missing,
        } => {
            assert_eq!(url.as_deref(), Some("https://www.youtube.com/watch?v=abc"));
            assert!(output_dir.is_none());
            assert!(backend.is_none());
            assert!(!strict_merge);
            assert!(!no_jitter);
            assert!(!install_missing);
        }
        _ => panic!("expected Get"),
    }
}

#[test]
fn cli_parse_get_without_url_prompts_later() {
    match parse(&["hdyt", "get"]) {
        CliCommand::Get { url, .. } => assert!(url.is_none()),
        _ => panic!("expected Get"),
    }
}

#[test]
fn cli_parse_get_output_dir() {
    match parse(&["hdyt", "get", "https://youtu.be/x", "-o", "/tmp/videos"]) {
        CliCommand::Get { output_dir, .. } => {
            assert_eq!(
                output_dir.as_deref(),
                Some(std::path::Path::new("/tmp/videos"))
            );
        }
        _ => panic!("expected Get with -o"),
    }
    match parse(&["hdyt", "get", "https://youtu.be/x", "--output-dir", "out"]) {
        CliCommand::Get { output_dir, .. } => {
            assert_eq!(output_dir.as_deref(), Some(std::path::Path::new("out")));
        }
        _ => panic!("expected Get with --output-dir"),
    }
}

#[test]
fn cli_parse_get_backend_downloader() {
    match parse(&["hdyt", "get", "https://youtu.be/x", "--backend", "downloader"]) {
        CliCommand::Get { backend, .. } => {
            assert_eq!(backend, Some(BackendArg::Downloader));
            assert_eq!(Backend::from(backend.unwrap()), Backend::Downloader);
        }
        _ => panic!("expected Get with --backend"),
    }
}

#[test]
fn cli_parse_get_flags() {
    match parse(&[
        "hdyt",
        "get",
        "https://youtu.be/x",
        "--strict-merge",
        "--no-jitter",
        "--install-missing",
    ]) {
        CliCommand::Get {
            strict_merge,
            no_jitter,
            install_missing,
            ..
        } => {
            assert!(strict_merge);
            assert!(no_jitter);
            assert!(install_missing);
        }
        _ => panic!("expected Get with flags"),
    }
}

#[test]
fn cli_parse_get_rejects_unknown_backend() {
    assert!(Cli::try_parse_from(["hdyt", "get", "u", "--backend", "pytube"]).is_err());
}
