//! Hyperparameter sweep generators for the scooby prefetcher experiments.
//!
//! Two sweeps are provided, both printing one build rule per configuration:
//!
//! * [GridSweep]: every combination of geometrically spaced levels
//!   (20 levels for `alpha`, `gamma` and `epsilon` by default, hence 8000 rules),
//! * [LhsSweep]: a Latin hypercube design (20 samples in the unit cube by default).
//!
//! ```
//! use scooby_sweep::{GridSweep, Sweep, SweepConfig};
//!
//! let sweep = GridSweep::new(SweepConfig::grid().n_levels(2)).unwrap();
//! let rules = sweep.rules();
//! assert_eq!(rules.len(), 8);
//! assert_eq!(rules[0].id, "scooby_gs_a_0.005_g_0.5_e_0.001");
//! ```
pub mod config;
pub mod errors;
pub mod format;
pub mod sweep;

pub use config::*;
pub use errors::*;
pub use format::*;
pub use sweep::*;

use env_logger::{Builder, Env};
use log::debug;
use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::Path;

/// Environment variable used to set the log filter (default: [DEFAULT_LOG_FILTER])
pub const SWEEP_LOG: &str = "SCOOBY_SWEEP_LOG";
/// Log filter used when [SWEEP_LOG] is not set
pub const DEFAULT_LOG_FILTER: &str = "warn";

fn logger_builder() -> Builder {
    let env = Env::new().filter_or(SWEEP_LOG, DEFAULT_LOG_FILTER);
    let mut builder = Builder::from_env(env);
    builder.target(env_logger::Target::Stderr);
    builder
}

/// Initializes logging on stderr, stdout being reserved to build rules
pub fn init_logger() {
    logger_builder().try_init().ok();
}

/// Writes the build rules of `sweep` to `output` or to stdout when `None`.
///
/// Returns the number of rules written, or `None` when the consumer closed
/// the output early (e.g. `| head`), which is not an error.
pub fn emit<S: Sweep>(sweep: &S, output: Option<&Path>) -> Result<Option<usize>> {
    match output {
        Some(path) => emit_to(sweep, &mut BufWriter::new(File::create(path)?)),
        None => emit_to(sweep, &mut BufWriter::new(io::stdout().lock())),
    }
}

/// Writes the build rules of `sweep` to `out`, see [emit]
pub fn emit_to<S: Sweep, W: Write>(sweep: &S, out: &mut W) -> Result<Option<usize>> {
    match sweep.write_rules(out) {
        Ok(n) => Ok(Some(n)),
        Err(SweepError::IoError(e)) if e.kind() == ErrorKind::BrokenPipe => {
            debug!("Output closed early");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn test_logger_quiet_by_default() {
        std::env::remove_var(SWEEP_LOG);
        assert_eq!(logger_builder().build().filter(), LevelFilter::Warn);
    }

    /// Accepts `capacity` lines then fails like a closed pipe
    struct ClosingWriter {
        capacity: usize,
        lines: usize,
        kind: ErrorKind,
    }

    impl Write for ClosingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.lines >= self.capacity {
                return Err(io::Error::new(self.kind, "closed"));
            }
            self.lines += buf.iter().filter(|&&b| b == b'\n').count();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_emit_to_counts_rules() {
        let sweep = GridSweep::new(SweepConfig::grid().n_levels(2)).unwrap();
        let mut out = Vec::new();
        assert_eq!(emit_to(&sweep, &mut out).unwrap(), Some(8));
    }

    #[test]
    fn test_emit_to_closed_pipe() {
        let sweep = GridSweep::new(SweepConfig::grid().n_levels(3)).unwrap();
        let mut out = ClosingWriter {
            capacity: 1,
            lines: 0,
            kind: ErrorKind::BrokenPipe,
        };
        assert_eq!(emit_to(&sweep, &mut out).unwrap(), None);
        assert!(out.lines >= 1);
    }

    #[test]
    fn test_emit_to_other_io_error() {
        let sweep = GridSweep::new(SweepConfig::grid().n_levels(3)).unwrap();
        let mut out = ClosingWriter {
            capacity: 1,
            lines: 0,
            kind: ErrorKind::PermissionDenied,
        };
        assert!(matches!(
            emit_to(&sweep, &mut out),
            Err(SweepError::IoError(_))
        ));
    }
}
