use crate::Result;
use crate::qobj::instruction::Instruction;

use anyhow::{Context, anyhow, bail};
use serde::Serialize;
use serde_json::{Map, Value};
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::Path;

/// Read a Qobj JSON document.
pub fn load_qobj(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("read qobj file {}", path.display()))?;
    let qobj = serde_json::from_str(&text)
        .with_context(|| format!("parse qobj file {}", path.display()))?;
    Ok(qobj)
}

/// Instruction list of every experiment, in document order.
pub fn op_lists(qobj: &Value) -> Result<Vec<Vec<Instruction>>> {
    let experiments = qobj
        .get("experiments")
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("error processing qobj: no experiments"))?;

    let mut lists = Vec::with_capacity(experiments.len());
    for (idx, exp) in experiments.iter().enumerate() {
        let Some(instructions) = exp.get("instructions") else {
            bail!("error processing qobj: experiment {} has no instructions", idx);
        };
        let ops: Vec<Instruction> = serde_json::from_value(instructions.clone())
            .with_context(|| format!("bad instructions in experiment {}", idx))?;
        lists.push(ops);
    }
    Ok(lists)
}

/// `config.n_qubits`.
pub fn n_qubits(qobj: &Value) -> Result<u64> {
    qobj.get("config")
        .and_then(|c| c.get("n_qubits"))
        .and_then(Value::as_u64)
        .ok_or_else(|| anyhow!("error processing qobj: no n_qubits"))
}

/// Pretty JSON with sorted keys and four-space indentation.
pub fn to_pretty_json(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    sorted(value).serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Copy of `value` with every object's keys in sorted order.
fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::with_capacity(map.len());
            for key in keys {
                out.insert(key.clone(), sorted(&map[key]));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}
