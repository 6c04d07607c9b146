use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::version::Version;

/// An interpreter found on the search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub version: Version,
}

impl Candidate {
    /// True for a plain `python` with no version in its name.
    pub fn is_unversioned(&self) -> bool {
        self.version.is_any()
    }
}

/// JSON shape for `--list --json`.
#[derive(Debug, Serialize)]
pub struct ListEntry<'a> {
    pub version: Option<String>,
    pub path: &'a Path,
}

impl<'a> From<&'a Candidate> for ListEntry<'a> {
    fn from(c: &'a Candidate) -> Self {
        ListEntry {
            version: (!c.is_unversioned()).then(|| c.version.to_string()),
            path: &c.path,
        }
    }
}

/// Walks `dirs` in order, yielding every entry whose file name follows the
/// `python[X[.Y]]` convention.
///
/// Each directory is read only when the previous one is exhausted. Entries in
/// one directory come out sorted by name. Directories that cannot be read are
/// skipped. Executability is not checked here.
pub fn scan(dirs: &[PathBuf]) -> Candidates<'_> {
    Candidates {
        dirs: dirs.iter(),
        pending: Vec::new().into_iter(),
    }
}

pub struct Candidates<'a> {
    dirs: std::slice::Iter<'a, PathBuf>,
    pending: std::vec::IntoIter<Candidate>,
}

impl Iterator for Candidates<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        loop {
            if let Some(c) = self.pending.next() {
                return Some(c);
            }
            let dir = self.dirs.next()?;
            self.pending = scan_dir(dir).into_iter();
        }
    }
}

fn scan_dir(dir: &Path) -> Vec<Candidate> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut found: Vec<Candidate> = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_type().map_or(true, |t| !t.is_dir()))
        .filter_map(|e| {
            let name = e.file_name();
            let version = Version::from_file_name(name.to_str()?)?;
            Some(Candidate {
                path: dir.join(name),
                version,
            })
        })
        .collect();
    found.sort_by(|a, b| a.path.cmp(&b.path));
    found
}
