//! Cumulative per-operation timings.
//!
//! A unit that wants its operations timed holds a `TimingRecorder` and routes
//! calls through `measure` / `try_measure`. Samples are only recorded once the
//! call has returned successfully; an `Err` or a panic leaves the record as it
//! was before the call.

use crate::render::format_float;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Insertion-ordered map from operation name to cumulative elapsed time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingRecord {
    entries: Vec<(String, Duration)>,
}

impl TimingRecord {
    /// Add `elapsed` to `name`, creating the entry at zero if needed.
    pub fn add(&mut self, name: &str, elapsed: Duration) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, total)) => *total += elapsed,
            None => self.entries.push((name.to_string(), elapsed)),
        }
    }

    pub fn get(&self, name: &str) -> Option<Duration> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, total)| *total)
    }

    /// Cumulative seconds for `name`.
    pub fn seconds(&self, name: &str) -> Option<f64> {
        self.get(name).map(|d| d.as_secs_f64())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Duration)> {
        self.entries.iter().map(|(n, d)| (n.as_str(), *d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Owns the `TimingRecord` of one measured unit. The record is created on the
/// first recorded sample.
#[derive(Debug, Default)]
pub struct TimingRecorder {
    record: Option<TimingRecord>,
}

impl TimingRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` and add its wall-clock time under `name`.
    ///
    /// # Example
    /// ```
    /// use qutils::timing::TimingRecorder;
    ///
    /// let mut rec = TimingRecorder::new();
    /// let v = rec.measure("build", || 6 * 7);
    /// assert_eq!(v, 42);
    /// assert!(rec.record().unwrap().get("build").is_some());
    /// ```
    pub fn measure<F, R>(&mut self, name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        self.record_time(name, start.elapsed());
        result
    }

    /// Like `measure`, but an `Err` is passed through without recording.
    pub fn try_measure<F, T, E>(&mut self, name: &str, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let start = Instant::now();
        let value = f()?;
        self.record_time(name, start.elapsed());
        Ok(value)
    }

    pub fn record_time(&mut self, name: &str, elapsed: Duration) {
        self.record.get_or_insert_with(TimingRecord::default).add(name, elapsed);
    }

    /// `None` until something has been recorded.
    pub fn record(&self) -> Option<&TimingRecord> {
        self.record.as_ref()
    }

    pub fn reset(&mut self) {
        self.record = None;
    }

    /// Write `name\tseconds` lines in insertion order.
    pub fn report<W: Write>(&self, w: &mut W) -> io::Result<()> {
        match &self.record {
            Some(record) => {
                for (name, total) in record.iter() {
                    writeln!(w, "{}\t{}", name, format_float(total.as_secs_f64()))?;
                }
            }
            None => writeln!(w, "No statistics found!")?,
        }
        Ok(())
    }

    pub fn print_statistics(&self) {
        let stdout = io::stdout();
        if let Err(e) = self.report(&mut stdout.lock()) {
            tracing::warn!("failed to print timing statistics: {}", e);
        }
    }
}

/// Units that carry a `TimingRecorder`.
pub trait Instrumented {
    fn recorder(&self) -> &TimingRecorder;
}

impl Instrumented for TimingRecorder {
    fn recorder(&self) -> &TimingRecorder {
        self
    }
}

/// Print the statistics of any instrumented unit.
pub fn print_statistics<T: Instrumented + ?Sized>(unit: &T) {
    unit.recorder().print_statistics();
}
