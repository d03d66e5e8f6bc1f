//! Output and temporary path derivation.

use std::path::{Path, PathBuf};

/// Which half of the pair a temporary download holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempRole {
    Video,
    Audio,
}

impl TempRole {
    fn prefix(self) -> &'static str {
        match self {
            TempRole::Video => "video_",
            TempRole::Audio => "audio_",
        }
    }
}

/// First free path among `dir/base.ext`, `dir/base_1.ext`, `dir/base_2.ext`, ...
pub fn resolve_output_path(dir: &Path, base: &str, ext: &str) -> PathBuf {
    let first = dir.join(format!("{}.{}", base, ext));
    if !first.exists() {
        return first;
    }
    let mut n = 1u32;
    loop {
        let candidate = dir.join(format!("{}_{}.{}", base, n, ext));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Temporary download path for one half of the pair: `dir/video_<base>.<ext>` or
/// `dir/audio_<base>.<ext>`, suffixed like output paths when that name is already taken.
pub fn temp_path(dir: &Path, role: TempRole, base: &str, ext: &str) -> PathBuf {
    resolve_output_path(dir, &format!("{}{}", role.prefix(), base), ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_path_is_used_as_is() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve_output_path(dir.path(), "title", "mp4"),
            dir.path().join("title.mp4")
        );
    }

    #[test]
    fn existing_files_get_incrementing_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let first = resolve_output_path(dir.path(), "title", "mp4");
        std::fs::write(&first, b"x").unwrap();

        let second = resolve_output_path(dir.path(), "title", "mp4");
        assert_eq!(second, dir.path().join("title_1.mp4"));
        std::fs::write(&second, b"x").unwrap();

        let third = resolve_output_path(dir.path(), "title", "mp4");
        assert_eq!(third, dir.path().join("title_2.mp4"));
    }

    #[test]
    fn suffix_fills_first_gap() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("t.mp4"), b"x").unwrap();
        std::fs::write(dir.path().join("t_2.mp4"), b"x").unwrap();
        assert_eq!(
            resolve_output_path(dir.path(), "t", "mp4"),
            dir.path().join("t_1.mp4")
        );
    }

    #[test]
    fn other_extension_does_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("title.mkv"), b"x").unwrap();
        assert_eq!(
            resolve_output_path(dir.path(), "title", "mp4"),
            dir.path().join("title.mp4")
        );
    }

    #[test]
    fn temp_paths_are_prefixed_by_role() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            temp_path(dir.path(), TempRole::Video, "clip", "mp4"),
            dir.path().join("video_clip.mp4")
        );
        assert_eq!(
            temp_path(dir.path(), TempRole::Audio, "clip", "m4a"),
            dir.path().join("audio_clip.m4a")
        );
    }

    #[test]
    fn temp_path_skips_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("video_clip.mp4"), b"keep").unwrap();
        assert_eq!(
            temp_path(dir.path(), TempRole::Video, "clip", "mp4"),
            dir.path().join("video_clip_1.mp4")
        );
    }
}
