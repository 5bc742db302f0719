//! Single-shot profiling: time one call, print it straight away.

use crate::render::format_float;
use crate::timing::monitor::{MemoryMonitor, MonitorMode};
use std::io::{self, Write};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ProfileOptions {
    /// Sampling period handed to the memory monitor.
    pub interval: Duration,
    pub mode: MonitorMode,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            mode: MonitorMode::Off,
        }
    }
}

/// Run `f` under a memory monitor and print `name:consumed time:\t<secs>` to
/// stdout.
pub fn profile<F, R>(name: &str, opts: &ProfileOptions, f: F) -> R
where
    F: FnOnce() -> R,
{
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    profile_into(&mut lock, name, opts, f)
}

/// `profile` writing its timing line to `out`.
pub fn profile_into<W, F, R>(out: &mut W, name: &str, opts: &ProfileOptions, f: F) -> R
where
    W: Write,
    F: FnOnce() -> R,
{
    let monitor = MemoryMonitor::start(&opts.mode, opts.interval);

    let start = Instant::now();
    let result = f();
    write_elapsed(out, name, start.elapsed());

    monitor.stop();
    result
}

/// Like `profile`, but an `Err` is passed through without printing a line.
pub fn try_profile<F, T, E>(name: &str, opts: &ProfileOptions, f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
{
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    try_profile_into(&mut lock, name, opts, f)
}

pub fn try_profile_into<W, F, T, E>(
    out: &mut W,
    name: &str,
    opts: &ProfileOptions,
    f: F,
) -> Result<T, E>
where
    W: Write,
    F: FnOnce() -> Result<T, E>,
{
    let monitor = MemoryMonitor::start(&opts.mode, opts.interval);

    let start = Instant::now();
    let value = f()?;
    write_elapsed(out, name, start.elapsed());

    monitor.stop();
    Ok(value)
}

fn write_elapsed<W: Write>(out: &mut W, name: &str, elapsed: Duration) {
    if let Err(e) = writeln!(
        out,
        "{}:consumed time:\t{}",
        name,
        format_float(elapsed.as_secs_f64())
    ) {
        tracing::warn!("failed to print profile line for {}: {}", name, e);
    }
}
