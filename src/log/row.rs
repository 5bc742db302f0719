use crate::render::format_row;

/// One parsed log file: a key followed by its numeric fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub key: String,
    pub values: Vec<f64>,
}

impl Record {
    pub fn new(key: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            key: key.into(),
            values,
        }
    }

    /// Tab-separated output line for this record.
    pub fn to_line(&self) -> String {
        format_row(&self.key, &self.values)
    }
}
