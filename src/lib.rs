//! Helper utilities for quantum-circuit experiment tooling.
//!
//! Two pieces carry real behaviour:
//! - `timing`: cumulative per-operation timings and single-shot profiling
//! - `log`: directory-wide log parsing with a running per-field average
//!
//! The rest are small helpers over Qobj documents, coupling maps and JSON.

pub mod encode;
pub mod error;
pub mod log;
pub mod qobj;
pub mod render;
pub mod timing;
pub mod topology;

pub type Result<T> = anyhow::Result<T>;
