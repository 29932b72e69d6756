//! Path utilities: expand ~, build file names from tags.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Turn a tag into a safe file stem: path separators and characters
/// rejected by common filesystems become `_`.
pub fn tag_file_stem(tag: &str) -> String {
    let stem: String = tag
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        "series".to_string()
    } else {
        stem
    }
}
