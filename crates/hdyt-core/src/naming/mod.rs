//! Output naming: safe base names from display titles and collision-free paths.
//!
//! The base name keeps a conservative character set so the same title maps to
//! the same file name on every filesystem; existing files are never overwritten,
//! a numeric suffix is appended instead.

mod path;
mod sanitize;

pub use path::{resolve_output_path, temp_path, TempRole};
pub use sanitize::sanitize_title;

/// Base name used when the title sanitizes to nothing (e.g. all punctuation or non-Latin).
const DEFAULT_BASE_NAME: &str = "video";

/// Sanitized base name for `title`, falling back to `video` when nothing survives.
///
/// # Examples
///
/// - `base_name("Review: Part 1/2!!")` → `"Review Part 12"`
/// - `base_name("???")` → `"video"`
pub fn base_name(title: &str) -> String {
    let sanitized = sanitize_title(title);
    if sanitized.trim().is_empty() {
        DEFAULT_BASE_NAME.to_string()
    } else {
        sanitized
    }
}
