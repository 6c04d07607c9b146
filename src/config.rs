use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

use crate::diag::{trace, Tracer};
use crate::version::Version;

/// Presence (any value) turns on `[py]` trace lines on stderr.
pub const DEBUG_VAR: &str = "PYLAUNCH_DEBUG";
/// Default version when no selector is given, e.g. `3.12`.
pub const DEFAULT_VERSION_VAR: &str = "PY_PYTHON";

/// A `PY_PYTHON*` variable as found in the environment.
///
/// Parsed only when a launch actually consults it, so a bad value cannot
/// break `--help`, `--list` or an explicit `-X.Y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDefault {
    pub name: String,
    pub value: OsString,
}

impl RawDefault {
    fn parse(&self) -> Result<Version, ConfigError> {
        let invalid = || ConfigError::InvalidDefault {
            name: self.name.clone(),
            value: self.value.to_string_lossy().into_owned(),
        };
        let text = self.value.to_str().ok_or_else(invalid)?;
        Version::parse(text.trim()).map_err(|_| invalid())
    }
}

#[derive(Debug, Default)]
pub struct LauncherConfig {
    pub search_path: Vec<PathBuf>, // PATH, empty entries dropped
    pub debug: bool,               // PYLAUNCH_DEBUG set
    pub default_version: Option<RawDefault>, // PY_PYTHON
    /// `PY_PYTHON3=3.11` and friends, keyed by major.
    pub major_defaults: BTreeMap<u64, RawDefault>,
    pub launcher_path: PathBuf, // for --help
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a version like 3 or 3.12, got '{value}'")]
    InvalidDefault { name: String, value: String },
}

/// Read the launcher's configuration from the process environment.
pub fn launcher_config() -> LauncherConfig {
    let mut config = LauncherConfig::from_vars(std::env::vars_os());
    config.launcher_path = std::env::current_exe()
        .ok()
        .or_else(|| std::env::args_os().next().map(PathBuf::from))
        .unwrap_or_default();
    config
}

impl LauncherConfig {
    /// Build a configuration from an explicit set of environment variables.
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut config = LauncherConfig::default();
        for (name, value) in vars {
            let Some(name) = name.to_str() else { continue };
            match name {
                "PATH" | "Path" => {
                    config.search_path = std::env::split_paths(&value)
                        .filter(|p| !p.as_os_str().is_empty())
                        .collect();
                }
                DEBUG_VAR => config.debug = true,
                DEFAULT_VERSION_VAR => {
                    config.default_version = Some(RawDefault {
                        name: name.to_string(),
                        value,
                    });
                }
                _ => {
                    let Some(major) = name
                        .strip_prefix(DEFAULT_VERSION_VAR)
                        .filter(|m| !m.is_empty() && m.bytes().all(|b| b.is_ascii_digit()))
                        .and_then(|m| m.parse::<u64>().ok())
                    else {
                        continue;
                    };
                    config.major_defaults.insert(
                        major,
                        RawDefault {
                            name: name.to_string(),
                            value,
                        },
                    );
                }
            }
        }
        config
    }

    /// Apply `PY_PYTHON` / `PY_PYTHON<X>` to what the command line asked for.
    ///
    /// Only the variables on the path taken are parsed. A `PY_PYTHON<X>`
    /// whose own major is not `X` is ignored.
    pub fn effective_version(
        &self,
        requested: Option<Version>,
        tracer: &Tracer,
    ) -> Result<Version, ConfigError> {
        let version = match (requested, &self.default_version) {
            (Some(v), _) => v,
            (None, Some(raw)) => raw.parse()?,
            (None, None) => Version::any(),
        };
        if version.is_exact() {
            return Ok(version);
        }
        let Some(major) = version.major_part() else {
            return Ok(version);
        };
        let Some(raw) = self.major_defaults.get(&major) else {
            return Ok(version);
        };
        let preferred = raw.parse()?;
        if preferred.major_part() != Some(major) {
            trace!(
                tracer,
                "ignoring {}={preferred}: not a Python {major} version",
                raw.name
            );
            return Ok(version);
        }
        Ok(preferred)
    }
}
