//! Plain-text renderers for records and nested documents.

pub mod tree;
pub mod tsv;

pub use tree::{pretty, write_pretty};
pub use tsv::{format_float, format_row};
