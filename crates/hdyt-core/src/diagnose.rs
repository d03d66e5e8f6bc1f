//! Troubleshooting ladder: map an upstream error message to canned remediation text.
//!
//! Upstream extractors break in a handful of recognizable ways; the message text
//! is the only signal they give, so matching is by substring, first rule wins.

/// Recognized failure mode of an extraction attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnosis {
    /// Extractor could not locate the site's throttling function (player JS changed).
    ThrottlingFunction,
    /// Signature cipher could not be decoded (player JS changed).
    Cipher,
    /// HTTP 403 from the site or CDN.
    Forbidden,
    /// Video requires sign-in for age verification.
    AgeRestricted,
    Unknown,
}

impl Diagnosis {
    pub fn remediation(&self) -> &'static str {
        match self {
            Diagnosis::ThrottlingFunction => {
                "The extractor no longer understands the site's player code.\n\
                 Update it (`hdyt get --install-missing` or `pip install --upgrade yt-dlp`) and retry,\n\
                 or rerun with `--backend downloader`."
            }
            Diagnosis::Cipher => {
                "Stream signatures could not be deciphered; the site changed its player.\n\
                 Update the extractor and retry, or rerun with `--backend downloader`."
            }
            Diagnosis::Forbidden => {
                "The server refused the request (HTTP 403).\n\
                 Wait a few minutes before retrying, keep jitter enabled, update the extractor,\n\
                 or rerun with `--backend downloader`."
            }
            Diagnosis::AgeRestricted => {
                "This video is age-restricted and needs a signed-in session.\n\
                 Use `--backend downloader` with yt-dlp cookies configured, or pick another video."
            }
            Diagnosis::Unknown => {
                "Check the URL, your network connection, and that yt-dlp and ffmpeg are installed\n\
                 (`hdyt doctor`). Rerun to try again."
            }
        }
    }
}

/// True when `needle` (all ASCII digits) occurs in `haystack` with no digit on either side.
fn contains_number(haystack: &str, needle: &str) -> bool {
    let bytes = haystack.as_bytes();
    haystack.match_indices(needle).any(|(i, _)| {
        let before = i.checked_sub(1).map(|j| bytes[j]);
        let after = bytes.get(i + needle.len()).copied();
        !before.is_some_and(|b| b.is_ascii_digit()) && !after.is_some_and(|b| b.is_ascii_digit())
    })
}

/// Classifies `message` (case-insensitive). Rules, in order: throttling function,
/// `cipher`, `403`/`forbidden`, `age` together with `restricted`. `403` only counts
/// as a number of its own, not as digits inside a longer one.
pub fn diagnose(message: &str) -> Diagnosis {
    let m = message.to_lowercase();
    if m.contains("get_throttling_function_name") || m.contains("throttling function") {
        return Diagnosis::ThrottlingFunction;
    }
    if m.contains("cipher") {
        return Diagnosis::Cipher;
    }
    if contains_number(&m, "403") || m.contains("forbidden") {
        return Diagnosis::Forbidden;
    }
    if m.contains("age") && m.contains("restricted") {
        return Diagnosis::AgeRestricted;
    }
    Diagnosis::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttling_function_name() {
        assert_eq!(
            diagnose("RegexMatchError: get_throttling_function_name: could not find match"),
            Diagnosis::ThrottlingFunction
        );
        assert_eq!(
            diagnose("Unable to extract Throttling function"),
            Diagnosis::ThrottlingFunction
        );
    }

    #[test]
    fn cipher() {
        assert_eq!(
            diagnose("Cipher: could not parse decipher function"),
            Diagnosis::Cipher
        );
    }

    #[test]
    fn forbidden() {
        assert_eq!(diagnose("HTTP Error 403"), Diagnosis::Forbidden);
        assert_eq!(diagnose("GET https://x returned HTTP 403"), Diagnosis::Forbidden);
        assert_eq!(diagnose("Forbidden by server"), Diagnosis::Forbidden);
    }

    #[test]
    fn digits_inside_longer_numbers_are_not_403() {
        assert_eq!(
            diagnose("download of stream 137 failed: server returned HTTP 404 (expire=1714032011)"),
            Diagnosis::Unknown
        );
        assert_eq!(
            diagnose("GET https://rr3---sn-abc.googlevideo.com/videoplayback?expire=1714032011&itag=137 returned HTTP 404"),
            Diagnosis::Unknown
        );
        assert_eq!(diagnose("itag=4031"), Diagnosis::Unknown);
        assert_eq!(diagnose("status 403: denied"), Diagnosis::Forbidden);
    }

    #[test]
    fn age_restricted_needs_both_words() {
        assert_eq!(
            diagnose("Sign in to confirm your age. This video may be inappropriate (age-restricted)"),
            Diagnosis::AgeRestricted
        );
        assert_eq!(diagnose("page not found"), Diagnosis::Unknown);
        assert_eq!(diagnose("restricted region"), Diagnosis::Unknown);
    }

    #[test]
    fn earlier_rules_win() {
        // Mentions both the cipher and a 403: cipher comes first in the ladder.
        assert_eq!(diagnose("cipher failure after HTTP 403"), Diagnosis::Cipher);
        assert_eq!(
            diagnose("get_throttling_function_name failed; cipher unknown"),
            Diagnosis::ThrottlingFunction
        );
    }

    #[test]
    fn every_diagnosis_has_text() {
        for d in [
            Diagnosis::ThrottlingFunction,
            Diagnosis::Cipher,
            Diagnosis::Forbidden,
            Diagnosis::AgeRestricted,
            Diagnosis::Unknown,
        ] {
            assert!(!d.remediation().is_empty());
        }
    }
}
