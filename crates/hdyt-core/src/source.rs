//! Source reference: the URL of the remote video.

use std::fmt;

/// Validated `http`/`https` URL of a video page. Opaque to everything but the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef(url::Url);

/// Input could not be used as a source URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSource {
    pub input: String,
    pub reason: String,
}

impl fmt::Display for InvalidSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid source URL {:?}: {}", self.input, self.reason)
    }
}

impl std::error::Error for InvalidSource {}

impl SourceRef {
    /// Parses `input` (surrounding whitespace ignored). Only `http` and `https` are accepted.
    pub fn parse(input: &str) -> Result<Self, InvalidSource> {
        let trimmed = input.trim();
        let url = url::Url::parse(trimmed).map_err(|e| InvalidSource {
            input: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(InvalidSource {
                input: trimmed.to_string(),
                reason: format!("unsupported scheme {:?}", other),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
