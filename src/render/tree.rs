//! Tab-indented dump of nested JSON objects.
//!
//! Keys keep document order. Each key sits on its own line; a nested object
//! recurses one level deeper, any other value is printed one level below its
//! key.
//!
//! Example:
//! {"gate": {"cx": 0.01}, "name": "q"}  =>
//! gate
//! \tcx
//! \t\t0.01
//! name
//! \tq

use serde_json::{Map, Value};
use std::io::{self, Write};

/// Print `map` to stdout starting at `indent` tabs.
pub fn pretty(map: &Map<String, Value>, indent: usize) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_pretty(&mut lock, map, indent)
}

pub fn write_pretty<W: Write>(w: &mut W, map: &Map<String, Value>, indent: usize) -> io::Result<()> {
    for (key, value) in map {
        writeln!(w, "{}{}", "\t".repeat(indent), key)?;
        match value {
            Value::Object(inner) => write_pretty(w, inner, indent + 1)?,
            other => writeln!(w, "{}{}", "\t".repeat(indent + 1), scalar(other))?,
        }
    }
    Ok(())
}

// Strings print bare, everything else as compact JSON.
fn scalar(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
