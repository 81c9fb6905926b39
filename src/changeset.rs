use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// a single `<status> <path>` line, anything with extra columns (renames
/// and copies with a similarity score) does not match
static CHANGE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z])\s+(\S+)$").expect("change line pattern is valid"));

/// kind of change a record describes, decided once when parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Added,
    Modified,
    Deleted,
    Other(char),
}

impl ChangeStatus {
    pub fn from_letter(letter: char) -> Self {
        match letter.to_ascii_uppercase() {
            'A' => Self::Added,
            'M' => Self::Modified,
            'D' => Self::Deleted,
            other => Self::Other(other),
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::Added => 'A',
            Self::Modified => 'M',
            Self::Deleted => 'D',
            Self::Other(letter) => letter,
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// one file change, path is relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub status: ChangeStatus,
    pub path: String,
}

impl ChangeRecord {
    pub fn new(status: ChangeStatus, path: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
        }
    }

    /// split the path into its directory and file name, the directory is
    /// empty for files living in the project root
    pub fn split(&self) -> (&str, &str) {
        match self.path.rsplit_once('/') {
            Some((dir, name)) => (dir.trim_end_matches('/'), name),
            None => ("", self.path.as_str()),
        }
    }

    /// containing directory of the record
    pub fn directory(&self) -> &str {
        self.split().0
    }
}

/// parse `git diff --name-status` style text into change records
///
/// lines that do not look like a single status letter followed by a path are
/// skipped, order is preserved and duplicates are kept
pub fn parse(text: &str) -> Vec<ChangeRecord> {
    text.lines()
        .filter_map(|line| {
            let captures = CHANGE_LINE.captures(line)?;
            let letter = captures[1].chars().next()?;
            Some(ChangeRecord::new(
                ChangeStatus::from_letter(letter),
                &captures[2],
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_malformed_lines() {
        let records = parse("M src/a.txt\nbadline\nD src/b.txt\n");
        assert_eq!(
            records,
            vec![
                ChangeRecord::new(ChangeStatus::Modified, "src/a.txt"),
                ChangeRecord::new(ChangeStatus::Deleted, "src/b.txt"),
            ]
        );
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n").is_empty());
    }

    #[test]
    fn test_parse_keeps_order_and_duplicates() {
        let records = parse("A z.txt\n\nM a.txt\nM z.txt\n");
        let paths: Vec<_> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["z.txt", "a.txt", "z.txt"]);
    }

    #[test]
    fn test_parse_status_is_case_insensitive() {
        let records = parse("a new.txt\nd\told.txt");
        assert_eq!(records[0].status, ChangeStatus::Added);
        assert_eq!(records[1].status, ChangeStatus::Deleted);
    }

    #[test]
    fn test_parse_skips_rename_lines() {
        let records = parse("R100\told.txt\tnew.txt\nR old.txt new.txt\nM kept.txt");
        assert_eq!(records, vec![ChangeRecord::new(ChangeStatus::Modified, "kept.txt")]);
    }

    #[test]
    fn test_parse_tolerates_crlf() {
        let records = parse("M a.txt\r\nD b.txt\r\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].path, "b.txt");
    }

    #[test]
    fn test_parse_unknown_status_is_other() {
        let records = parse("T link.txt\nu conflict.txt");
        assert_eq!(records[0].status, ChangeStatus::Other('T'));
        assert_eq!(records[1].status, ChangeStatus::Other('U'));
    }

    #[test]
    fn test_split() {
        let nested = ChangeRecord::new(ChangeStatus::Added, "docs/new/page.html");
        assert_eq!(nested.split(), ("docs/new", "page.html"));

        let root = ChangeRecord::new(ChangeStatus::Added, "index.html");
        assert_eq!(root.split(), ("", "index.html"));
        assert_eq!(root.directory(), "");
    }
}
