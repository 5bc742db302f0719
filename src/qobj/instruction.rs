use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::{self, Write};

/// Operations that are printed by name only.
pub const BARRIER_OPS: [&str; 4] = ["measure", "reset", "barrier", "bfunc"];

/// One circuit instruction. Fields other than `name` and `qubits` are kept
/// verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Instruction {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qubits: Option<Vec<u32>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Instruction {
    pub fn new(name: impl Into<String>, qubits: Option<Vec<u32>>) -> Self {
        Self {
            name: name.into(),
            qubits,
            extra: Map::new(),
        }
    }

    pub fn is_measure(&self) -> bool {
        self.name == "measure"
    }
}

/// Copy of `ops`; with `without_measure`, measurements and instructions that
/// touch no qubits are dropped.
pub fn filter_ops(ops: &[Instruction], without_measure: bool) -> Vec<Instruction> {
    ops.iter()
        .filter(|op| !without_measure || (!op.is_measure() && op.qubits.is_some()))
        .cloned()
        .collect()
}

/// `cx:0,1` for gates, the bare name for barrier-like operations. A gate
/// without qubits renders as `name:`.
pub fn format_op(op: &Instruction) -> String {
    if BARRIER_OPS.contains(&op.name.as_str()) {
        return op.name.clone();
    }
    let qubits = op
        .qubits
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|q| q.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("{}:{}", op.name, qubits)
}

pub fn print_op_list<W: Write>(w: &mut W, ops: &[Instruction]) -> io::Result<()> {
    for op in ops {
        writeln!(w, "{}", format_op(op))?;
    }
    Ok(())
}
