//! Log parsing and aggregation.
//!
//! A `LogParser` turns one file into at most one `Record`; the `Aggregator`
//! walks a directory tree, prints every record and finishes with the
//! per-field average over the files that produced one.

pub mod aggregate;
pub mod parse;
pub mod row;
pub mod walk;

pub use aggregate::{Aggregator, Summary};
pub use parse::{FieldPattern, LogParser, RegexParser, TimingTableParser};
pub use row::Record;
pub use walk::collect_files;
