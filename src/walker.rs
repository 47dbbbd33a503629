use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::error::Result;

/// Folder names never descended into
pub const EXCLUDED_FOLDERS: &[&str] = &[".svn", ".git"];

/// Whether a folder name is pruned from the walk, ignoring case
pub fn is_excluded_folder(name: &str) -> bool {
    EXCLUDED_FOLDERS
        .iter()
        .any(|excluded| excluded.eq_ignore_ascii_case(name))
}

fn is_excluded(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(is_excluded_folder)
}

/// Visit `root` and every folder below it, deepest folders first.
///
/// Each folder's subfolders are fully visited (in name order) before `visit`
/// runs for the folder itself. `.svn` and `.git` folders are skipped with
/// everything inside them. A missing root is not an error: nothing is
/// visited. Returns the number of folders visited.
pub fn process_files_in_folder<F>(root: &Path, mut visit: F) -> Result<usize>
where
    F: FnMut(&Path) -> Result<()>,
{
    if !root.is_dir() {
        return Ok(0);
    }

    let mut visited = 0;
    let walker = WalkDir::new(root)
        .follow_links(false)
        .contents_first(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        visit(entry.path())?;
        visited += 1;
    }

    Ok(visited)
}
