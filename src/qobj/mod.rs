//! Helpers over Qobj job documents (JSON).
//!
//! Only the parts the helpers need are typed; everything else is kept as
//! `serde_json::Value` so documents can be dumped back unchanged.
//!
//! JSON shape:
//! {
//!   "config": { "n_qubits": 5, ... },
//!   "experiments": [
//!     { "instructions": [ { "name": "cx", "qubits": [0, 1] }, ... ], ... }
//!   ]
//! }

pub mod document;
pub mod instruction;

pub use document::{load_qobj, n_qubits, op_lists, to_pretty_json};
pub use instruction::{BARRIER_OPS, Instruction, filter_ops, format_op, print_op_list};
