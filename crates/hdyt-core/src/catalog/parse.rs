//! Mapping of the yt-dlp `--dump-single-json` document into `SourceInfo`.

use crate::stream::{SourceInfo, StreamDescriptor, StreamKind};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
struct InfoJson {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    formats: Vec<FormatJson>,
}

#[derive(Debug, Deserialize)]
struct FormatJson {
    format_id: String,
    #[serde(default)]
    ext: Option<String>,
    #[serde(default)]
    vcodec: Option<String>,
    #[serde(default)]
    acodec: Option<String>,
    #[serde(default)]
    height: Option<f64>,
    /// Audio bitrate, kbit/s.
    #[serde(default)]
    abr: Option<f64>,
    /// Total bitrate, kbit/s.
    #[serde(default)]
    tbr: Option<f64>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    http_headers: HashMap<String, String>,
}

/// `None` or `"none"` both mean the track is absent.
fn has_track(codec: &Option<String>) -> bool {
    matches!(codec.as_deref(), Some(c) if !c.eq_ignore_ascii_case("none"))
}

fn kind_of(f: &FormatJson) -> Option<StreamKind> {
    match (has_track(&f.vcodec), has_track(&f.acodec)) {
        (true, true) => Some(StreamKind::Progressive),
        (true, false) => Some(StreamKind::VideoOnly),
        (false, true) => Some(StreamKind::AudioOnly),
        // Storyboards and other image-only entries.
        (false, false) => None,
    }
}

fn to_kbps(v: Option<f64>) -> Option<u32> {
    v.filter(|x| x.is_finite() && *x > 0.0).map(|x| x.round() as u32)
}

fn to_descriptor(f: FormatJson) -> Option<StreamDescriptor> {
    let kind = kind_of(&f)?;
    let url = f.url.filter(|u| !u.is_empty())?;
    let bitrate_kbps = match kind {
        StreamKind::AudioOnly => to_kbps(f.abr).or_else(|| to_kbps(f.tbr)),
        _ => to_kbps(f.tbr),
    };
    Some(StreamDescriptor {
        id: f.format_id,
        kind,
        container: f.ext.unwrap_or_default(),
        height: f
            .height
            .filter(|h| h.is_finite() && *h > 0.0)
            .map(|h| h as u32),
        bitrate_kbps,
        url,
        headers: f.http_headers,
    })
}

/// Parses the JSON dump. Formats without a URL or without any track are skipped;
/// catalog order is preserved. A missing title falls back to the video id.
pub fn parse_source_info(json: &str) -> Result<SourceInfo, serde_json::Error> {
    let info: InfoJson = serde_json::from_str(json)?;
    let title = info
        .title
        .filter(|t| !t.trim().is_empty())
        .or(info.id)
        .unwrap_or_default();
    let streams = info.formats.into_iter().filter_map(to_descriptor).collect();
    Ok(SourceInfo { title, streams })
}
