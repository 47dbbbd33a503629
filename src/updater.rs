use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{FormatTraits, TagCatalog, VersionProperties};
use crate::error::{Result, SetVersionError};
use crate::ui::Reporter;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Result of rewriting one file's contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Output lines, in file order. Untouched lines keep their original bytes.
    pub lines: Vec<Vec<u8>>,
    /// Tags found in the input and replaced in place, in file order
    pub updated: Vec<&'static str>,
    /// Tags missing from the input and appended, in catalog order
    pub added: Vec<&'static str>,
}

impl RewriteOutcome {
    /// Join the lines with `\n`, without a trailing newline
    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.join(&b'\n')
    }

    /// Joined output for display; invalid UTF-8 shows as U+FFFD
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.to_bytes()).into_owned()
    }

    /// One output line for display, decoded the same way as [`RewriteOutcome::to_text`]
    pub fn line(&self, index: usize) -> Cow<'_, str> {
        self.lines
            .get(index)
            .map(|line| String::from_utf8_lossy(line))
            .unwrap_or_default()
    }
}

/// Split on `\n` like [`str::lines`]: a final `\r` is dropped from each line
/// and a trailing newline does not start an empty line
fn split_lines(contents: &[u8]) -> Vec<&[u8]> {
    let mut lines: Vec<&[u8]> = contents.split(|&b| b == b'\n').collect();
    if contents.is_empty() || contents.ends_with(b"\n") {
        lines.pop();
    }
    lines
        .into_iter()
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect()
}

/// Keeps assembly metadata files in sync with a [`VersionProperties`] record.
///
/// Holds the tag catalog and the registered file formats. Both must be
/// non-empty; that is checked once here, before any file is touched.
#[derive(Debug, Clone)]
pub struct AssemblyInfoUpdater {
    catalog: TagCatalog,
    formats: Vec<FormatTraits>,
    reporter: Reporter,
}

impl AssemblyInfoUpdater {
    pub fn new(catalog: TagCatalog, formats: Vec<FormatTraits>, reporter: Reporter) -> Result<Self> {
        if catalog.is_empty() {
            return Err(SetVersionError::config("No Tags Defined."));
        }
        if formats.is_empty() {
            return Err(SetVersionError::config("No File Formats."));
        }
        for name in catalog.names() {
            reporter.status(&format!("Found Tag : {}", name));
        }
        Ok(AssemblyInfoUpdater {
            catalog,
            formats,
            reporter,
        })
    }

    /// Standard tags, C# files only
    pub fn standard(reporter: Reporter) -> Result<Self> {
        Self::new(TagCatalog::standard(), vec![FormatTraits::csharp()], reporter)
    }

    pub fn catalog(&self) -> &TagCatalog {
        &self.catalog
    }

    pub fn formats(&self) -> &[FormatTraits] {
        &self.formats
    }

    /// Rewrite file text: refresh known tag lines, append missing tags
    pub fn rewrite_text(
        &self,
        text: &str,
        traits: &FormatTraits,
        version: &VersionProperties,
    ) -> Result<RewriteOutcome> {
        self.rewrite_bytes(text.as_bytes(), traits, version)
    }

    /// Rewrite raw file contents: refresh known tag lines, append missing tags.
    ///
    /// Lines that start with a recognised tag spelling are replaced whole;
    /// every other line passes through byte for byte, whatever its encoding.
    pub fn rewrite_bytes(
        &self,
        contents: &[u8],
        traits: &FormatTraits,
        version: &VersionProperties,
    ) -> Result<RewriteOutcome> {
        let matcher = self.catalog.line_matcher(traits)?;
        let contents = contents.strip_prefix(UTF8_BOM).unwrap_or(contents);

        let mut lines = Vec::new();
        let mut updated = Vec::new();
        for line in split_lines(contents) {
            match matcher.match_line(line) {
                Some(tag) => {
                    lines.push(tag.render_line(traits, version).into_bytes());
                    updated.push(tag.name);
                }
                None => lines.push(line.to_vec()),
            }
        }

        let mut added = Vec::new();
        for tag in self.catalog.iter() {
            if !updated.contains(&tag.name) {
                lines.push(tag.render_line(traits, version).into_bytes());
                added.push(tag.name);
            }
        }

        Ok(RewriteOutcome {
            lines,
            updated,
            added,
        })
    }

    /// Rewrite one file in place; the previous contents are not kept
    pub fn process_file(
        &self,
        path: &Path,
        traits: &FormatTraits,
        version: &VersionProperties,
    ) -> Result<RewriteOutcome> {
        self.reporter
            .status(&format!("Found File : {}", path.display()));

        let contents = fs::read(path).map_err(|e| SetVersionError::io(path, e))?;
        let outcome = self.rewrite_bytes(&contents, traits, version)?;
        for name in &outcome.added {
            self.reporter
                .status(&format!("    Adding Missing Attribute : {}", name));
        }

        fs::write(path, outcome.to_bytes()).map_err(|e| SetVersionError::io(path, e))?;
        Ok(outcome)
    }

    /// Rewrite the matching files directly inside `dir`, for every format.
    ///
    /// Does not descend into subdirectories. Returns the rewritten paths.
    pub fn process_folder_contents(
        &self,
        dir: &Path,
        version: &VersionProperties,
    ) -> Result<Vec<PathBuf>> {
        let mut processed = Vec::new();
        for traits in &self.formats {
            for path in matching_files(dir, traits)? {
                self.process_file(&path, traits, version)?;
                processed.push(path);
            }
        }
        Ok(processed)
    }
}

/// Files directly in `dir` whose name matches the format's file specification
fn matching_files(dir: &Path, traits: &FormatTraits) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| SetVersionError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SetVersionError::io(dir, e))?;
        let path = entry.path();
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| traits.matches_file_name(name));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
