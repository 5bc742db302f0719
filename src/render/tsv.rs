//! Tab-separated record lines.

/// Render a float the way it reads in a log: shortest round-trip form,
/// integral values keep a trailing `.0`.
pub fn format_float(v: f64) -> String {
    format!("{:?}", v)
}

/// Join a key and its numeric fields with tabs.
pub fn format_row(key: &str, values: &[f64]) -> String {
    let mut line = String::from(key);
    for v in values {
        line.push('\t');
        line.push_str(&format_float(*v));
    }
    line
}
