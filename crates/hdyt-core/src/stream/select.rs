//! Selection policy: best adaptive video in the target container plus the first audio-only stream.

use super::{StreamDescriptor, StreamKind};
use std::fmt;

/// The two streams a merge needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamPair {
    pub video: StreamDescriptor,
    pub audio: StreamDescriptor,
}

/// Either half of the pair could not be found. Not an error: the caller reports
/// the available streams and stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamsNotFound {
    pub missing_video: bool,
    pub missing_audio: bool,
}

impl fmt::Display for StreamsNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.missing_video, self.missing_audio) {
            (true, true) => write!(f, "no suitable video or audio stream"),
            (true, false) => write!(f, "no suitable video stream"),
            _ => write!(f, "no suitable audio stream"),
        }
    }
}

/// Picks the highest-resolution video-only stream whose container is `container`
/// (first listed wins on ties) and the first audio-only stream in catalog order.
pub fn select_streams(
    streams: &[StreamDescriptor],
    container: &str,
) -> Result<StreamPair, StreamsNotFound> {
    let mut video: Option<&StreamDescriptor> = None;
    for s in streams {
        if s.kind != StreamKind::VideoOnly || !s.container.eq_ignore_ascii_case(container) {
            continue;
        }
        let better = match video {
            None => true,
            Some(best) => s.height.unwrap_or(0) > best.height.unwrap_or(0),
        };
        if better {
            video = Some(s);
        }
    }

    let audio = streams.iter().find(|s| s.kind == StreamKind::AudioOnly);

    match (video, audio) {
        (Some(v), Some(a)) => Ok(StreamPair {
            video: v.clone(),
            audio: a.clone(),
        }),
        (v, a) => Err(StreamsNotFound {
            missing_video: v.is_none(),
            missing_audio: a.is_none(),
        }),
    }
}
