//! CLI command handlers, one file per subcommand.

mod completions;
mod doctor;
mod get;
mod streams;

pub use completions::{run_completions, run_man};
pub use doctor::run_doctor;
pub use get::{run_get, GetRequest};
pub use streams::run_streams;

/// Joins an error and its sources with `: `, the text the troubleshooting ladder inspects.
pub(crate) fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut cur = err.source();
    while let Some(e) = cur {
        let s = e.to_string();
        if !parts.last().is_some_and(|p| p.contains(&s)) {
            parts.push(s);
        }
        cur = e.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdyt_core::fetch::FetchError;
    use hdyt_core::pipeline::RunError;

    #[test]
    fn error_chain_skips_repeated_messages() {
        let err = RunError::Fetch {
            stream_id: "137".to_string(),
            source: FetchError::Http {
                url: "https://cdn.example.com/137".to_string(),
                code: 403,
            },
        };
        assert_eq!(
            error_chain(&err),
            "download of stream 137 failed: server returned HTTP 403"
        );
    }

    #[test]
    fn stream_url_does_not_drive_diagnosis() {
        use hdyt_core::diagnose::{diagnose, Diagnosis};

        let err = RunError::Fetch {
            stream_id: "137".to_string(),
            source: FetchError::Http {
                url: "https://rr3---sn-abc.googlevideo.com/videoplayback?expire=1714032011&itag=137"
                    .to_string(),
                code: 404,
            },
        };
        let text = error_chain(&err);
        assert!(!text.contains("googlevideo"));
        assert_eq!(diagnose(&text), Diagnosis::Unknown);
    }

    #[test]
    fn error_chain_with_source_already_in_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = hdyt_core::merge::MergeError {
            program: "ffmpeg".to_string(),
            source: io,
        };
        assert_eq!(error_chain(&err), "could not run ffmpeg: no such file");
    }
}
