//! Launcher-level argument handling.
//!
//! Only the first argument is ever inspected; everything the launcher does not
//! consume is forwarded to the interpreter untouched.

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

use crate::scan::{Candidate, ListEntry};
use crate::version::{Version, VersionError};

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Help,
    List { json: bool },
    Launch {
        /// `None` when no selector was given.
        version: Option<Version>,
        args: Vec<OsString>,
    },
}

/// Split the launcher's arguments (without `argv[0]`).
///
/// A leading selector-shaped token is consumed even when it is malformed; the
/// error is returned rather than forwarding it.
pub fn classify<I>(args: I) -> Result<Action, VersionError>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let Some(first) = args.next() else {
        return Ok(Action::Launch {
            version: None,
            args: Vec::new(),
        });
    };

    let selector = match first.to_str() {
        Some("--help" | "-h") => return Ok(Action::Help),
        Some("--list") => {
            let json = args.next().is_some_and(|a| a == "--json");
            return Ok(Action::List { json });
        }
        Some(token) => Version::from_selector(token)?,
        // Not UTF-8, so not a valid selector; still refuse one that looks like an attempt.
        None if looks_like_selector(first.as_encoded_bytes()) => {
            return Err(VersionError::Malformed(first.to_string_lossy().into_owned()));
        }
        None => None,
    };

    let rest: Vec<OsString> = match selector {
        Some(_) => args.collect(),
        None => std::iter::once(first).chain(args).collect(),
    };
    Ok(Action::Launch {
        version: selector,
        args: rest,
    })
}

fn looks_like_selector(token: &[u8]) -> bool {
    matches!(token, [b'-', d, ..] if d.is_ascii_digit())
}

/// Usage text. `default` is what a bare `py` would run right now.
pub fn write_help(
    out: &mut impl Write,
    launcher: &Path,
    default: Option<&Path>,
) -> std::io::Result<()> {
    writeln!(out, "Python launcher {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(
        out,
        "usage: {} [-h | --help | --list [--json] | -X | -X.Y] [args...]",
        launcher.display()
    )?;
    writeln!(out)?;
    writeln!(out, "Launcher arguments (must come first):")?;
    writeln!(out, "  -h, --help    print this message and exit")?;
    writeln!(out, "  --list        list every interpreter found on PATH and exit")?;
    writeln!(out, "  --list --json same, as a JSON array")?;
    writeln!(out, "  -X            run the newest Python X.Y found on PATH")?;
    writeln!(out, "  -X.Y          run Python X.Y")?;
    writeln!(out)?;
    writeln!(out, "All other arguments are passed to the interpreter.")?;
    writeln!(out)?;
    writeln!(out, "Environment:")?;
    writeln!(out, "  PY_PYTHON       default version when no -X or -X.Y is given")?;
    writeln!(out, "  PY_PYTHON<X>    default X.Y for a bare -X")?;
    writeln!(out, "  PYLAUNCH_DEBUG  trace interpreter selection on stderr")?;
    writeln!(out)?;
    match default {
        Some(path) => writeln!(out, "Default interpreter: {}", path.display()),
        None => writeln!(out, "Default interpreter: none found on PATH"),
    }
}

/// One `<version> <path>` line per candidate; unversioned entries show `-`.
pub fn write_list<'a>(
    out: &mut impl Write,
    candidates: impl IntoIterator<Item = &'a Candidate>,
) -> std::io::Result<()> {
    for c in candidates {
        let version = if c.is_unversioned() {
            "-".to_string()
        } else {
            c.version.to_string()
        };
        writeln!(out, "{version:>6}  {}", c.path.display())?;
    }
    Ok(())
}

pub fn write_list_json(out: &mut impl Write, candidates: &[Candidate]) -> anyhow::Result<()> {
    let entries: Vec<ListEntry<'_>> = candidates.iter().map(ListEntry::from).collect();
    serde_json::to_writer_pretty(&mut *out, &entries)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn help_flags() {
        assert_eq!(classify(args(&["--help"])), Ok(Action::Help));
        assert_eq!(classify(args(&["-h", "ignored"])), Ok(Action::Help));
    }

    #[test]
    fn list_flags() {
        assert_eq!(classify(args(&["--list"])), Ok(Action::List { json: false }));
        assert_eq!(
            classify(args(&["--list", "--json"])),
            Ok(Action::List { json: true })
        );
        assert_eq!(
            classify(args(&["--list", "extra"])),
            Ok(Action::List { json: false })
        );
    }

    #[test]
    fn launcher_flags_only_count_in_front() {
        assert_eq!(
            classify(args(&["-3", "--help"])),
            Ok(Action::Launch {
                version: Some(Version::major(3)),
                args: args(&["--help"]),
            })
        );
        assert_eq!(
            classify(args(&["script.py", "--list"])),
            Ok(Action::Launch {
                version: None,
                args: args(&["script.py", "--list"]),
            })
        );
    }

    #[test]
    fn no_arguments() {
        assert_eq!(
            classify(Vec::<OsString>::new()),
            Ok(Action::Launch {
                version: None,
                args: Vec::new(),
            })
        );
    }

    #[test]
    fn selector_is_consumed() {
        assert_eq!(
            classify(args(&["-3.12", "-c", "pass"])),
            Ok(Action::Launch {
                version: Some(Version::exact(3, 12)),
                args: args(&["-c", "pass"]),
            })
        );
    }

    #[test]
    fn everything_forwarded_without_selector() {
        assert_eq!(
            classify(args(&["-c", "import sys; print(sys.version)"])),
            Ok(Action::Launch {
                version: None,
                args: args(&["-c", "import sys; print(sys.version)"]),
            })
        );
    }

    #[test]
    fn only_the_first_selector_is_taken() {
        assert_eq!(
            classify(args(&["-3", "-2.7"])),
            Ok(Action::Launch {
                version: Some(Version::major(3)),
                args: args(&["-2.7"]),
            })
        );
    }

    #[test]
    fn malformed_selector_is_an_error() {
        assert_eq!(
            classify(args(&["-3.", "-c", "pass"])),
            Err(VersionError::Malformed("-3.".to_string()))
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_first_argument_is_forwarded() {
        use std::os::unix::ffi::OsStringExt;
        let odd = OsString::from_vec(vec![b'-', 0xff]);
        assert_eq!(
            classify(vec![odd.clone()]),
            Ok(Action::Launch {
                version: None,
                args: vec![odd],
            })
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_selector_attempt_is_malformed() {
        use std::os::unix::ffi::OsStringExt;
        let odd = OsString::from_vec(vec![b'-', b'3', 0xff]);
        assert_eq!(
            classify(vec![odd, OsString::from("-c")]),
            Err(VersionError::Malformed("-3\u{fffd}".to_string()))
        );
    }

    #[test]
    fn help_mentions_launcher_and_default() {
        let mut out = Vec::new();
        write_help(
            &mut out,
            Path::new("/opt/bin/py"),
            Some(Path::new("/usr/bin/python3.12")),
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("/opt/bin/py"));
        assert!(text.contains("/usr/bin/python3.12"));

        let mut out = Vec::new();
        write_help(&mut out, Path::new("/opt/bin/py"), None).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("none found"));
    }

    #[test]
    fn list_lines() {
        let cs = vec![
            Candidate {
                path: PathBuf::from("/usr/bin/python"),
                version: Version::any(),
            },
            Candidate {
                path: PathBuf::from("/usr/bin/python3.12"),
                version: Version::exact(3, 12),
            },
        ];
        let mut out = Vec::new();
        write_list(&mut out, &cs).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["     -  /usr/bin/python", "  3.12  /usr/bin/python3.12"]);
    }

    #[test]
    fn list_json_is_an_array() {
        let cs = vec![Candidate {
            path: PathBuf::from("/usr/bin/python3"),
            version: Version::major(3),
        }];
        let mut out = Vec::new();
        write_list_json(&mut out, &cs).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["version"], "3");
        assert_eq!(value[0]["path"], "/usr/bin/python3");
    }
}
