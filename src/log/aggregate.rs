//! Directory-wide aggregation of parsed log records.
//!
//! Output (tab-separated, one line per file that produced a record):
//! key   v1   v2 ...
//! ...
//! avg   mean(v1)   mean(v2) ...

use crate::Result;
use crate::error::AggregateError;
use crate::log::parse::LogParser;
use crate::log::row::Record;
use crate::log::walk::collect_files;
use crate::render::format_row;
use crate::timing::{Instrumented, TimingRecorder};

use anyhow::Context;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Outcome of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Files that produced a record.
    pub count: usize,
    /// Files the parser skipped.
    pub skipped: usize,
    /// Per-field mean over the contributing files.
    pub average: Vec<f64>,
}

/// Per-field running sums of one run.
#[derive(Debug, Default)]
struct RunningSums {
    sums: Option<Vec<f64>>,
    count: usize,
}

impl RunningSums {
    /// The first record fixes the field count; later records must match it.
    fn fold(&mut self, path: &Path, record: &Record) -> std::result::Result<(), AggregateError> {
        let sums = self
            .sums
            .get_or_insert_with(|| vec![0.0; record.values.len()]);
        if sums.len() != record.values.len() {
            return Err(AggregateError::FieldCountMismatch {
                path: path.to_path_buf(),
                expected: sums.len(),
                actual: record.values.len(),
            });
        }
        for (sum, v) in sums.iter_mut().zip(&record.values) {
            *sum += *v;
        }
        self.count += 1;
        Ok(())
    }

    fn average(self, root: &Path) -> std::result::Result<Vec<f64>, AggregateError> {
        match self.sums {
            Some(sums) if self.count > 0 => {
                let n = self.count as f64;
                Ok(sums.into_iter().map(|s| s / n).collect())
            }
            _ => Err(AggregateError::NoRecords {
                root: root.to_path_buf(),
            }),
        }
    }
}

/// Walks `root`, parses every file with `P` and averages the results.
///
/// Time spent in `parse_one` and in whole runs is accumulated on the
/// aggregator's `TimingRecorder` under `parse_one` and `run`.
pub struct Aggregator<P> {
    root: PathBuf,
    parser: P,
    results: Vec<Record>,
    recorder: TimingRecorder,
}

impl<P: LogParser> Aggregator<P> {
    pub fn new(root: impl Into<PathBuf>, parser: P) -> Self {
        Self::with_recorder(root, parser, TimingRecorder::new())
    }

    pub fn with_recorder(root: impl Into<PathBuf>, parser: P, recorder: TimingRecorder) -> Self {
        Self {
            root: root.into(),
            parser,
            results: Vec::new(),
            recorder,
        }
    }

    /// Records accepted by the last run, in visit order.
    pub fn results(&self) -> &[Record] {
        &self.results
    }

    /// Run and print to stdout.
    pub fn run(&mut self) -> Result<Summary> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.run_into(&mut lock)
    }

    /// Run and print to `out`. Nothing after the failing file is printed if
    /// parsing fails; no avg line is printed if no file produced a record.
    pub fn run_into<W: Write>(&mut self, out: &mut W) -> Result<Summary> {
        let start = Instant::now();
        self.results.clear();

        let files = collect_files(&self.root)?;
        debug!(root = %self.root.display(), files = files.len(), "aggregating logs");

        let mut sums = RunningSums::default();
        let mut skipped = 0usize;
        for path in files {
            let parsed = self
                .recorder
                .try_measure("parse_one", || self.parser.parse_one(&path))
                .with_context(|| format!("parse {}", path.display()))?;

            let Some(record) = parsed else {
                debug!("skip {}", path.display());
                skipped += 1;
                continue;
            };

            sums.fold(&path, &record)?;
            writeln!(out, "{}", record.to_line())?;
            self.results.push(record);
        }

        let count = sums.count;
        let average = sums.average(&self.root)?;
        writeln!(out, "{}", format_row("avg", &average))?;

        self.recorder.record_time("run", start.elapsed());
        info!(count, skipped, "aggregation finished");
        Ok(Summary {
            count,
            skipped,
            average,
        })
    }
}

impl<P> Instrumented for Aggregator<P> {
    fn recorder(&self) -> &TimingRecorder {
        &self.recorder
    }
}
