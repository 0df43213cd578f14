//! Upload filename handling.
//!
//! The declared filename is never trusted for content type. It only yields a
//! display name and an extension hint for the file written to the workspace.

use chrono::Local;

/// Extension used when the declared filename has none.
pub const DEFAULT_EXTENSION: &str = "webm";

/// Longest extension kept from a declared filename.
const MAX_EXTENSION_LEN: usize = 8;

/// Reduce a client-supplied filename to a safe display name.
///
/// Drops any directory components and keeps only ASCII alphanumerics,
/// `.`, `-` and `_`. Whitespace becomes `_`. Leading dots are stripped.
/// Falls back to a generated `upload_<timestamp>.webm` name when nothing
/// usable remains.
pub fn upload_name(declared: &str) -> String {
    let base = declared
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').trim_matches('_');

    if cleaned.is_empty() {
        format!(
            "upload_{}.{}",
            Local::now().format("%Y%m%d_%H%M%S"),
            DEFAULT_EXTENSION
        )
    } else {
        cleaned.to_string()
    }
}

/// Extension hint from a (sanitized) filename, lowercased.
pub fn extension_hint(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_directories_and_unsafe_chars() {
        assert_eq!(upload_name("../../etc/pass wd.mp4"), "pass_wd.mp4");
        assert_eq!(upload_name("C:\\Users\\me\\clip (1).MOV"), "clip_1.MOV");
    }

    #[test]
    fn strips_leading_dots() {
        assert_eq!(upload_name(".hidden.webm"), "hidden.webm");
    }

    #[test]
    fn generates_name_when_empty() {
        let name = upload_name("");
        assert!(name.starts_with("upload_"));
        assert!(name.ends_with(".webm"));

        let name = upload_name("///");
        assert!(name.starts_with("upload_"));
    }

    #[test]
    fn extension_hint_lowercases() {
        assert_eq!(extension_hint("clip.MP4"), "mp4");
        assert_eq!(extension_hint("archive.tar.gz"), "gz");
    }

    #[test]
    fn extension_hint_defaults() {
        assert_eq!(extension_hint("noext"), "webm");
        assert_eq!(extension_hint("trailing."), "webm");
        assert_eq!(extension_hint("weird.verylongextension"), "webm");
    }
}
