use std::fmt;

use thiserror::Error;

/// File-name prefix shared by every interpreter the launcher recognises.
pub const INTERPRETER_PREFIX: &str = "python";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("malformed version selector '{0}' (expected -X or -X.Y)")]
    Malformed(String),
}

/// A possibly partial `major.minor` version.
///
/// Used both for what the user asked for and for what a candidate advertises
/// in its file name. `minor` is only ever set when `major` is; constructors
/// are the only way to build one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    major: Option<u64>,
    minor: Option<u64>,
}

impl Version {
    /// No preference / unversioned `python`.
    pub const fn any() -> Self {
        Self {
            major: None,
            minor: None,
        }
    }

    pub const fn major(major: u64) -> Self {
        Self {
            major: Some(major),
            minor: None,
        }
    }

    pub const fn exact(major: u64, minor: u64) -> Self {
        Self {
            major: Some(major),
            minor: Some(minor),
        }
    }

    pub fn major_part(&self) -> Option<u64> {
        self.major
    }

    pub fn is_any(&self) -> bool {
        self.major.is_none()
    }

    pub fn is_exact(&self) -> bool {
        self.minor.is_some()
    }

    /// True if every component present in `self` equals the one in `other`.
    pub fn matches(&self, other: &Version) -> bool {
        self.major.map_or(true, |m| other.major == Some(m))
            && self.minor.map_or(true, |m| other.minor == Some(m))
    }

    /// Parse a bare `X` or `X.Y` (no leading dash).
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        parse_numeric(s).ok_or_else(|| VersionError::Malformed(s.to_string()))
    }

    /// Parse a command-line version selector.
    ///
    /// Returns `Ok(None)` when `token` is not selector-shaped at all (it does
    /// not start with `-` followed by a digit) so the caller can forward it.
    pub fn from_selector(token: &str) -> Result<Option<Self>, VersionError> {
        let Some(rest) = token.strip_prefix('-') else {
            return Ok(None);
        };
        if !rest.starts_with(|c: char| c.is_ascii_digit()) {
            return Ok(None);
        }
        parse_numeric(rest)
            .map(Some)
            .ok_or_else(|| VersionError::Malformed(token.to_string()))
    }

    /// Extract the advertised version from an interpreter file name.
    ///
    /// `python` yields [`Version::any`], `python3` and `python3.12` their
    /// numbers; anything else (`python3-config`, `pythonw`) is not an
    /// interpreter and yields `None`.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let name = name
            .strip_suffix(std::env::consts::EXE_SUFFIX)
            .unwrap_or(name);
        let suffix = name.strip_prefix(INTERPRETER_PREFIX)?;
        if suffix.is_empty() {
            return Some(Self::any());
        }
        parse_numeric(suffix)
    }
}

fn parse_numeric(s: &str) -> Option<Version> {
    let (major, minor) = match s.split_once('.') {
        Some((major, minor)) => (major, Some(minor)),
        None => (s, None),
    };
    let major = parse_component(major)?;
    match minor {
        Some(minor) => Some(Version::exact(major, parse_component(minor)?)),
        None => Some(Version::major(major)),
    }
}

// Digits only; `u64::from_str` would also take a leading `+`.
fn parse_component(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.major, self.minor) {
            (Some(major), Some(minor)) => write!(f, "{major}.{minor}"),
            (Some(major), None) => write!(f, "{major}"),
            _ => f.write_str("any"),
        }
    }
}
