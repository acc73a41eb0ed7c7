use crate::config::ProjectConfig;
use lazy_static::lazy_static;
use regex::Regex;
use std::{fmt, ops::BitOr};

/// Bit-set of statuses derived from a porcelain status code.
/// Flags are computed once by [`derive_flags`] when an entry is parsed;
/// nothing else writes them.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusFlags(u8);

impl StatusFlags {
    pub const EMPTY: Self = Self(0);
    pub const UNTRACKED: Self = Self(1 << 0);
    pub const HAS_STAGED_CHANGES: Self = Self(1 << 1);
    pub const HAS_UNSTAGED_CHANGES: Self = Self(1 << 2);
    pub const DELETED: Self = Self(1 << 3);
    pub const RENAMED: Self = Self(1 << 4);
    pub const UNRESOLVED: Self = Self(1 << 5);
    pub const IGNORED: Self = Self(1 << 6);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for StatusFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for StatusFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::UNTRACKED, "UNTRACKED"),
            (Self::HAS_STAGED_CHANGES, "HAS_STAGED_CHANGES"),
            (Self::HAS_UNSTAGED_CHANGES, "HAS_UNSTAGED_CHANGES"),
            (Self::DELETED, "DELETED"),
            (Self::RENAMED, "RENAMED"),
            (Self::UNRESOLVED, "UNRESOLVED"),
            (Self::IGNORED, "IGNORED"),
        ];

        let mut set = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .peekable();

        if set.peek().is_none() {
            return f.write_str("EMPTY");
        }

        let mut first = true;
        for name in set {
            if !first {
                f.write_str(" | ")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}

/// Derive the flag set for a two-character porcelain status code.
///
/// The precedence matters: an unresolved merge conflict always reports as
/// `UNRESOLVED` and never as staged/unstaged, even though its code
/// characters would otherwise match those rules. The trailing worktree
/// rule is evaluated independently of the primary column.
pub fn derive_flags(code: [char; 2]) -> StatusFlags {
    let mut flags = StatusFlags::EMPTY;

    if code.contains(&'U') || code == ['A', 'A'] || code == ['D', 'D'] {
        flags = flags | StatusFlags::UNRESOLVED;
    } else if code[0] == '!' {
        flags = flags | StatusFlags::IGNORED;
    } else if code[0] == '?' {
        flags = flags | StatusFlags::UNTRACKED;
    } else if code[0] == 'R' {
        flags = flags | StatusFlags::HAS_STAGED_CHANGES | StatusFlags::RENAMED;
    } else if code[0] == 'D' {
        flags = flags | StatusFlags::DELETED;
    } else if code[0] != ' ' {
        flags = flags | StatusFlags::HAS_STAGED_CHANGES;
    }

    if code[1] != ' ' && code[1] != '!' {
        flags = flags | StatusFlags::HAS_UNSTAGED_CHANGES;
    }

    flags
}

/// One path as reported by a `status --porcelain --ignored` query.
/// Entries are built only by the parser and are immutable afterwards;
/// the whole list is replaced on every successful refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub status_code: [char; 2],
    pub path: String,
    pub name: String,
    pub is_folder: bool,
    pub is_sidecar: bool,
    pub is_project_file: bool,
    pub flags: StatusFlags,
}

impl FileEntry {
    pub fn has_status(&self, flags: StatusFlags) -> bool {
        self.flags.contains(flags)
    }
}

lazy_static! {
    static ref FILE_REGEX: Regex =
        Regex::new(r"^(?P<code>..) (?:(?P<orig_path>.*) -> )?(?P<path>.*)$").unwrap();
}

pub fn parse_status(input: &str, project: &ProjectConfig) -> Vec<FileEntry> {
    input
        .lines()
        .filter_map(|line| parse_status_line(line, project))
        .collect()
}

/// Parse one porcelain status line into an entry, or `None` for lines
/// that carry no file record (comments, branch headers, anything too
/// short to hold a code and path).
pub fn parse_status_line(line: &str, project: &ProjectConfig) -> Option<FileEntry> {
    if line.starts_with('#') {
        return None;
    }

    let cap = FILE_REGEX.captures(line)?;

    let mut code = cap.name("code").unwrap().as_str().chars();
    let status_code = [code.next()?, code.next()?];

    // Renames keep only the destination path.
    let raw_path = cap.name("path").unwrap().as_str();
    let unquoted = raw_path.replace('"', "");
    let trimmed = unquoted.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (path, name, is_folder) = match trimmed.strip_suffix('/') {
        Some(stripped) => {
            let dir_name = stripped.rsplit('/').next().unwrap_or(stripped);
            (stripped.to_string(), format!("{}/", dir_name), true)
        }
        None => {
            let file_name = trimmed.rsplit('/').next().unwrap_or(trimmed);
            (trimmed.to_string(), file_name.to_string(), false)
        }
    };

    let is_project_file = path.contains(&project.root_marker);
    let is_sidecar = path.ends_with(&project.sidecar_suffix);

    Some(FileEntry {
        status_code,
        flags: derive_flags(status_code),
        path,
        name,
        is_folder,
        is_sidecar,
        is_project_file,
    })
}
