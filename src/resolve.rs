use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::scan::Candidate;
use crate::version::Version;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no Python interpreter matching '{0}' found on PATH")]
    NoMatch(Version),
    #[error("{} is not an executable file", .0.display())]
    NotExecutable(PathBuf),
}

/// Pick the candidate `requested` should run, without touching the disk.
///
/// - no preference: the first unversioned `python`, else the newest version
/// - major only: the newest minor of that major
/// - major and minor: the first exact match
///
/// Ties at an equal version go to whichever came first on the search path.
pub fn select<I>(requested: &Version, candidates: I) -> Option<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    let mut matching = candidates
        .into_iter()
        .filter(|c| requested.matches(&c.version));

    if requested.is_exact() {
        return matching.next();
    }

    let mut best: Option<Candidate> = None;
    for candidate in matching {
        if requested.is_any() && candidate.is_unversioned() {
            return Some(candidate);
        }
        if best.as_ref().map_or(true, |b| candidate.version > b.version) {
            best = Some(candidate);
        }
    }
    best
}

/// [`select`], then refuse a pick that cannot be run.
///
/// A non-executable pick is an error rather than a reason to try the next
/// candidate.
pub fn resolve<I>(requested: &Version, candidates: I) -> Result<Candidate, ResolveError>
where
    I: IntoIterator<Item = Candidate>,
{
    let selected = select(requested, candidates).ok_or(ResolveError::NoMatch(*requested))?;
    if !is_executable(&selected.path) {
        return Err(ResolveError::NotExecutable(selected.path));
    }
    Ok(selected)
}

#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}
