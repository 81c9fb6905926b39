use anyhow::{Context, Result};
use git2::{Delta, DiffOptions, Repository};
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// read a previously saved change list
pub fn read_changes(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read change list from {}", path.display()))
}

/// list files changed in the working tree since `tag`, one
/// `<status>\t<path>` line per file, like `git diff --name-status <tag>`
///
/// renames are not detected, a moved file shows up as a delete and an add
pub fn get_changes(path: &Path, tag: &str) -> Result<String> {
    let repo = Repository::discover(path).context("not in a git repository")?;

    let tree = repo
        .revparse_single(tag)
        .and_then(|object| object.peel_to_tree())
        .with_context(|| format!("failed to resolve {tag}"))?;

    let mut opts = DiffOptions::new();
    let diff = repo
        .diff_tree_to_workdir_with_index(Some(&tree), Some(&mut opts))
        .context("failed to create diff")?;

    Ok(name_status(&diff))
}

/// format the deltas of a diff as name-status lines
fn name_status(diff: &git2::Diff) -> String {
    let mut output = String::new();

    for delta in diff.deltas() {
        let status = match delta.status() {
            Delta::Deleted => 'D',
            Delta::Modified | Delta::Typechange => 'M',
            Delta::Added => 'A',
            _ => continue, // skip ignored, unmodified, etc.
        };

        let file = if delta.status() == Delta::Deleted {
            delta.old_file()
        } else {
            delta.new_file()
        };

        if let Some(path) = file.path() {
            let _ = writeln!(output, "{status}\t{}", path.to_string_lossy());
        }
    }

    output
}
