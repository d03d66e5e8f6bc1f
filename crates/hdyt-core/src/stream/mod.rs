//! Stream descriptors as reported by the catalog, and the selection policy
//! that picks one video-only and one audio-only stream out of them.

mod select;

pub use select::{select_streams, StreamPair, StreamsNotFound};

use std::collections::HashMap;
use std::fmt;

/// What a stream carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// Video track only (adaptive).
    VideoOnly,
    /// Audio track only (adaptive).
    AudioOnly,
    /// Audio and video muxed together in one file.
    Progressive,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::VideoOnly => write!(f, "video"),
            StreamKind::AudioOnly => write!(f, "audio"),
            StreamKind::Progressive => write!(f, "video+audio"),
        }
    }
}

/// One downloadable stream of a source. Built by a catalog, never by the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDescriptor {
    /// Catalog identifier (e.g. yt-dlp `format_id`).
    pub id: String,
    pub kind: StreamKind,
    /// Container / file extension without the dot (e.g. `mp4`, `webm`, `m4a`).
    pub container: String,
    /// Vertical resolution in pixels, for streams carrying video.
    pub height: Option<u32>,
    /// Bitrate in kbit/s, when the catalog knows it.
    pub bitrate_kbps: Option<u32>,
    /// Direct media URL.
    pub url: String,
    /// Headers the catalog says the GET needs (user agent, referer, ...).
    pub headers: HashMap<String, String>,
}

impl StreamDescriptor {
    /// Human-readable quality: `1080p` for video, `128kbps` for audio, `?` when unknown.
    pub fn quality(&self) -> String {
        match (self.kind, self.height, self.bitrate_kbps) {
            (StreamKind::AudioOnly, _, Some(kbps)) => format!("{}kbps", kbps),
            (_, Some(h), _) => format!("{}p", h),
            (_, None, Some(kbps)) => format!("{}kbps", kbps),
            _ => "?".to_string(),
        }
    }
}

impl fmt::Display for StreamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} {}",
            self.id,
            self.kind,
            self.container,
            self.quality()
        )
    }
}

/// Title plus available streams for one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    pub title: String,
    pub streams: Vec<StreamDescriptor>,
}
