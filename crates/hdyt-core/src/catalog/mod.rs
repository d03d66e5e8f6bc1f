//! Catalog interface: turn a source URL into a title and a list of streams.
//!
//! The pipeline only depends on this trait and does not know which extractor
//! sits behind it.

mod parse;
mod ytdlp;

pub use parse::parse_source_info;
pub use ytdlp::YtDlpCatalog;

use crate::source::SourceRef;
use crate::stream::SourceInfo;

/// Lookup failure. Upstream messages are kept verbatim so the troubleshooting
/// ladder can match on them.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("extractor exited with {}: {message}", exit_label(.exit_code))]
    Extractor {
        exit_code: Option<i32>,
        message: String,
    },
    #[error("malformed extractor output: {0}")]
    Malformed(#[from] serde_json::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "a signal".to_string(),
    }
}

/// Implemented by stream catalogs (e.g. the yt-dlp JSON dump).
pub trait Catalog {
    fn lookup(&self, source: &SourceRef) -> Result<SourceInfo, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extractor_error_keeps_upstream_message() {
        let e = CatalogError::Extractor {
            exit_code: Some(1),
            message: "ERROR: HTTP Error 403: Forbidden".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "extractor exited with status 1: ERROR: HTTP Error 403: Forbidden"
        );
    }

    #[test]
    fn extractor_error_killed_by_signal() {
        let e = CatalogError::Extractor {
            exit_code: None,
            message: String::new(),
        };
        assert!(e.to_string().contains("a signal"));
    }
}
