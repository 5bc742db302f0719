//! Per-file parsers.
//!
//! `LogParser::parse_one` returns `Ok(None)` for files that are irrelevant or
//! do not contain everything the parser needs; the aggregator skips those.
//! Any `Err` aborts the whole run.

use crate::Result;
use crate::log::row::Record;
use anyhow::{Context, bail};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Turns one log file into at most one record.
///
/// Parser arguments live on the implementing type; every record produced in
/// one run must carry the same number of numeric fields.
pub trait LogParser {
    fn parse_one(&mut self, path: &Path) -> Result<Option<Record>>;
}

impl<F> LogParser for F
where
    F: FnMut(&Path) -> Result<Option<Record>>,
{
    fn parse_one(&mut self, path: &Path) -> Result<Option<Record>> {
        self(path)
    }
}

/// Key used for a file's record: its name without the extension.
fn record_key(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read log file {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// A named numeric field and the pattern that extracts it.
///
/// Written on the command line as `name=REGEX`; the first capture group of
/// the regex must hold the number.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    pub name: String,
    pub re: Regex,
}

impl FieldPattern {
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let re = Regex::new(pattern).with_context(|| format!("bad regex for field {}", name))?;
        if re.captures_len() < 2 {
            bail!("pattern for field {} has no capture group: {}", name, pattern);
        }
        Ok(Self { name, re })
    }
}

impl FromStr for FieldPattern {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('=') {
            Some((name, pattern)) if !name.trim().is_empty() => {
                FieldPattern::new(name.trim(), pattern)
            }
            _ => bail!("field must look like name=REGEX: {}", s),
        }
    }
}

/// Extracts one number per field from anywhere in the file.
///
/// The last match of each pattern wins, so a log that reports progress and
/// then a final value yields the final value. Files missing any field, or
/// with the wrong extension when one is configured, are skipped.
#[derive(Debug, Clone)]
pub struct RegexParser {
    fields: Vec<FieldPattern>,
    extension: Option<String>,
}

impl RegexParser {
    pub fn new(fields: Vec<FieldPattern>) -> Self {
        Self {
            fields,
            extension: None,
        }
    }

    /// Only parse files whose extension is `ext` (without the dot).
    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = Some(ext.into());
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

impl LogParser for RegexParser {
    fn parse_one(&mut self, path: &Path) -> Result<Option<Record>> {
        if let Some(ext) = &self.extension {
            if path.extension().and_then(|e| e.to_str()) != Some(ext.as_str()) {
                return Ok(None);
            }
        }

        let text = read_lossy(path)?;
        let mut values = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let Some(caps) = field.re.captures_iter(&text).last() else {
                debug!("{}: field {} not found, skipping", path.display(), field.name);
                return Ok(None);
            };
            let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let v: f64 = raw.trim().parse().with_context(|| {
                format!(
                    "field {} in {}: not a number: {:?}",
                    field.name,
                    path.display(),
                    raw
                )
            })?;
            values.push(v);
        }

        Ok(Some(Record::new(record_key(path), values)))
    }
}

/// Reads `name\tseconds` tables as written by `TimingRecorder::report` and
/// picks the requested names, in order.
///
/// Lines that do not look like a table row are ignored, so the table may be
/// embedded in other program output.
#[derive(Debug, Clone)]
pub struct TimingTableParser {
    names: Vec<String>,
    row_re: Regex,
}

impl TimingTableParser {
    pub fn new(names: Vec<String>) -> Result<Self> {
        // 1) name: no whitespace
        // 2) seconds: float, possibly in exponent form
        let row_re = Regex::new(r#"^\s*(\S+)\t([0-9][0-9.eE+-]*)\s*$"#)?;
        Ok(Self { names, row_re })
    }
}

impl LogParser for TimingTableParser {
    fn parse_one(&mut self, path: &Path) -> Result<Option<Record>> {
        let text = read_lossy(path)?;

        let mut seen: Vec<Option<f64>> = vec![None; self.names.len()];
        for (lineno, line) in text.lines().enumerate() {
            let Some(caps) = self.row_re.captures(line) else {
                continue;
            };
            let name = &caps[1];
            let Some(idx) = self.names.iter().position(|n| n == name) else {
                continue;
            };
            let secs: f64 = caps[2].parse().with_context(|| {
                format!(
                    "timing table parse error at {}:{}: {:?}",
                    path.display(),
                    lineno + 1,
                    line
                )
            })?;
            seen[idx] = Some(secs);
        }

        let values: Option<Vec<f64>> = seen.into_iter().collect();
        match values {
            Some(values) => Ok(Some(Record::new(record_key(path), values))),
            None => {
                debug!("{}: timing table incomplete, skipping", path.display());
                Ok(None)
            }
        }
    }
}
