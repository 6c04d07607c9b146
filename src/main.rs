// main.rs — orchestration and exit codes only.
// Parsing, scanning, selection and exec live in the modules below.
mod cli;
mod config;
mod diag;
mod exec;
mod resolve;
mod scan;
mod version;

use std::io::Write;

use cli::{classify, write_help, write_list, write_list_json, Action};
use config::{launcher_config, LauncherConfig};
use diag::{trace, Tracer};
use exec::{dispatch, ExecError, LaunchPlan};
use resolve::{resolve, ResolveError};
use scan::{scan, Candidate};
use version::{Version, VersionError};

const EXIT_FAILURE: i32 = 1;
const EXIT_MALFORMED_SPECIFIER: i32 = 2;
const EXIT_NO_MATCH: i32 = 3;
const EXIT_NOT_EXECUTABLE: i32 = 4;
const EXIT_LAUNCH_FAILURE: i32 = 5;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("py: {err}");
            std::process::exit(exit_code(&err));
        }
    }
}

fn run() -> anyhow::Result<i32> {
    let config = launcher_config();
    let tracer = Tracer::new(config.debug);
    trace!(tracer, "search path: {:?}", config.search_path);

    match classify(std::env::args_os().skip(1))? {
        Action::Help => {
            // A bad PY_PYTHON must not stop --help; report "none found" instead.
            let default = find_interpreter(&config, &tracer, None).ok();
            let mut out = std::io::stdout().lock();
            write_help(
                &mut out,
                &config.launcher_path,
                default.as_ref().map(|c| c.path.as_path()),
            )?;
            out.flush()?;
            Ok(0)
        }
        Action::List { json } => {
            let found: Vec<Candidate> = scan(&config.search_path).collect();
            trace!(tracer, "found {} interpreter(s)", found.len());
            let mut out = std::io::stdout().lock();
            if json {
                write_list_json(&mut out, &found)?;
            } else {
                write_list(&mut out, &found)?;
            }
            out.flush()?;
            Ok(0)
        }
        Action::Launch { version, args } => {
            let selected = find_interpreter(&config, &tracer, version)?;
            let plan = LaunchPlan::new(selected.path, args);
            trace!(tracer, "executing {} {:?}", plan.executable.display(), plan.args);
            Ok(dispatch(&plan)?)
        }
    }
}

/// Resolve `requested` (after `PY_PYTHON*` defaults) against a fresh scan.
fn find_interpreter(
    config: &LauncherConfig,
    tracer: &Tracer,
    requested: Option<Version>,
) -> anyhow::Result<Candidate> {
    let effective = config
        .effective_version(requested, tracer)
        .inspect_err(|e| trace!(tracer, "selection failed: {e}"))?;
    match requested {
        Some(v) if v == effective => trace!(tracer, "requested version: {v}"),
        Some(v) => trace!(tracer, "requested version: {v}, using {effective} from environment"),
        None => trace!(tracer, "no version requested, using {effective}"),
    }

    let candidates = scan(&config.search_path).inspect(|c| tracer.candidate(c));
    let outcome = resolve(&effective, candidates);
    match &outcome {
        Ok(c) => trace!(tracer, "selected {} (version {})", c.path.display(), c.version),
        Err(e) => trace!(tracer, "selection failed: {e}"),
    }
    Ok(outcome?)
}

fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<VersionError>().is_some() {
        return EXIT_MALFORMED_SPECIFIER;
    }
    if let Some(e) = err.downcast_ref::<ResolveError>() {
        return match e {
            ResolveError::NoMatch(_) => EXIT_NO_MATCH,
            ResolveError::NotExecutable(_) => EXIT_NOT_EXECUTABLE,
        };
    }
    if err.downcast_ref::<ExecError>().is_some() {
        return EXIT_LAUNCH_FAILURE;
    }
    EXIT_FAILURE
}
