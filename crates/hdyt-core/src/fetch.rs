//! Single-stream HTTP GET of one selected stream into a local file.
//!
//! Sequential write from offset 0, no Range requests, no retries.

use crate::stream::StreamDescriptor;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transfer failed: {0}")]
    Curl(#[from] curl::Error),
    /// Stream URLs carry signed query strings; they stay out of the message and go to the log.
    #[error("server returned HTTP {code}")]
    Http { url: String, code: u32 },
    #[error("write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Downloads a stream's bytes to `dest`. Returns the number of bytes written.
pub trait StreamFetcher {
    fn fetch(&self, stream: &StreamDescriptor, dest: &Path) -> Result<u64, FetchError>;
}

/// libcurl-backed fetcher. Runs on the current thread.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    pub connect_timeout: Duration,
    /// Abort when throughput stays under 1 KiB/s for this long.
    pub low_speed_time: Duration,
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            low_speed_time: Duration::from_secs(60),
        }
    }
}

fn header_list(headers: &HashMap<String, String>) -> Result<curl::easy::List, curl::Error> {
    let mut list = curl::easy::List::new();
    for (k, v) in headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    Ok(list)
}

impl StreamFetcher for CurlFetcher {
    fn fetch(&self, stream: &StreamDescriptor, dest: &Path) -> Result<u64, FetchError> {
        let file = File::create(dest).map_err(|source| FetchError::Io {
            path: dest.to_path_buf(),
            source,
        })?;
        let mut out = BufWriter::new(file);
        let mut written = 0u64;
        let mut write_err: Option<io::Error> = None;

        let mut easy = curl::easy::Easy::new();
        easy.url(&stream.url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.low_speed_limit(1024)?;
        easy.low_speed_time(self.low_speed_time)?;
        if !stream.headers.is_empty() {
            easy.http_headers(header_list(&stream.headers)?)?;
        }

        tracing::debug!(id = %stream.id, dest = %dest.display(), "GET stream");
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match out.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };

        if let Some(source) = write_err {
            return Err(FetchError::Io {
                path: dest.to_path_buf(),
                source,
            });
        }
        performed?;

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            tracing::warn!(id = %stream.id, url = %stream.url, code, "stream GET rejected");
            return Err(FetchError::Http {
                url: stream.url.clone(),
                code,
            });
        }

        out.flush().map_err(|source| FetchError::Io {
            path: dest.to_path_buf(),
            source,
        })?;
        tracing::debug!(id = %stream.id, bytes = written, "stream downloaded");
        Ok(written)
    }
}
