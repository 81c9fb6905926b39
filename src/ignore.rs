use crate::changeset::ChangeRecord;
use crate::constants::{IGNORE_FILE, RUNNER_NAME, SETTINGS_FILE};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// which ignore entry caught a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreMatch {
    File,
    Dir,
}

/// paths excluded from the upload, loaded once per run
///
/// entries are exact relative paths, a trailing `/` marks a whole directory
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    entries: Vec<String>,
}

impl IgnoreSet {
    /// load the ignore list from `path` (a missing file means an empty list)
    /// and append the entries protecting the tool's own files
    pub fn load(path: &Path, changeset_file: Option<&str>) -> Result<Self> {
        let mut set = if path.is_file() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read ignore list {}", path.display()))?;
            Self::parse(&content)
        } else {
            Self::default()
        };
        set.protect_own_files(changeset_file);
        Ok(set)
    }

    /// one entry per line, surrounding whitespace trimmed, blank lines dropped
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Self { entries }
    }

    fn protect_own_files(&mut self, changeset_file: Option<&str>) {
        self.entries.push(RUNNER_NAME.to_string());
        self.entries.push(SETTINGS_FILE.to_string());
        self.entries.push(IGNORE_FILE.to_string());
        if let Some(file) = changeset_file {
            self.entries.push(file.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    /// check a record against the exact file path first, then against its
    /// containing directory with a trailing separator
    pub fn is_ignored(&self, record: &ChangeRecord) -> Option<IgnoreMatch> {
        if self.contains(&record.path) {
            return Some(IgnoreMatch::File);
        }

        let dir = record.directory();
        if !dir.is_empty() && self.contains(&format!("{dir}/")) {
            return Some(IgnoreMatch::Dir);
        }

        None
    }
}
