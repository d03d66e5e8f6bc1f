//! Catalog backed by the yt-dlp JSON dump.

use super::{parse::parse_source_info, Catalog, CatalogError};
use crate::source::SourceRef;
use crate::stream::SourceInfo;
use std::process::{Command, Stdio};

/// Runs `yt-dlp --dump-single-json` once per lookup. Blocks until yt-dlp exits.
#[derive(Debug, Clone)]
pub struct YtDlpCatalog {
    program: String,
}

impl YtDlpCatalog {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn lookup_args(source: &SourceRef) -> Vec<String> {
        vec![
            "--dump-single-json".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            source.as_str().to_string(),
        ]
    }
}

impl Catalog for YtDlpCatalog {
    fn lookup(&self, source: &SourceRef) -> Result<SourceInfo, CatalogError> {
        let args = Self::lookup_args(source);
        tracing::debug!(program = %self.program, ?args, "catalog lookup");
        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CatalogError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(CatalogError::Extractor {
                exit_code: output.status.code(),
                message,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let info = parse_source_info(&stdout)?;
        tracing::debug!(title = %info.title, streams = info.streams.len(), "catalog resolved");
        Ok(info)
    }
}
