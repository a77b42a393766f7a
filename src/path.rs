//! Search path handling.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::hash::Hash;
use std::path::PathBuf;

/// Split a `$PATH`-style value into the directories to scan.
///
/// Unix shell semantics apply: an empty element means the current
/// directory. Empty elements are turned into `.` first and then deduplicated
/// with everything else, so `a::b::c:` becomes `[a, ., b, c]`.
pub fn search_path_entries(search_path: &OsStr) -> Vec<PathBuf> {
    if search_path.is_empty() {
        return Vec::new();
    }
    let entries = std::env::split_paths(search_path).map(|dir| {
        if dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            dir
        }
    });
    dedupe(entries)
}

/// Remove repeated entries, keeping the first occurrence of each.
pub fn dedupe<T, I>(items: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
