use std::fmt;

use crate::scan::Candidate;

/// Writes `[py] ...` lines to stderr when `PYLAUNCH_DEBUG` is set.
///
/// Never writes to stdout, so traced and untraced runs produce the same
/// output and exit status.
#[derive(Debug, Clone, Copy)]
pub struct Tracer {
    enabled: bool,
}

impl Tracer {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn log(&self, args: fmt::Arguments<'_>) {
        if self.enabled {
            eprintln!("[py] {args}");
        }
    }

    pub fn candidate(&self, c: &Candidate) {
        self.log(format_args!(
            "considering {} (version {})",
            c.path.display(),
            c.version
        ));
    }
}

/// `trace!(tracer, "fmt", args...)`
macro_rules! trace {
    ($tracer:expr, $($arg:tt)*) => {
        $tracer.log(format_args!($($arg)*))
    };
}
pub(crate) use trace;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_macro_expands_for_both_states() {
        let value = 42;
        trace!(Tracer::new(false), "value {value}");
        trace!(Tracer::new(true), "value {}", value);
    }
}
