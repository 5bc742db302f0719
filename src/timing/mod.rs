//! Execution-time instrumentation.
//!
//! Two independent modes:
//! - `TimingRecorder`: cumulative seconds per named operation, owned by the
//!   measured unit and reported on demand
//! - `profile`: one measured call, printed immediately, with a memory monitor
//!   running for the duration of the call

pub mod monitor;
pub mod profile;
pub mod recorder;

pub use monitor::{MemoryMonitor, MonitorMode};
pub use profile::{ProfileOptions, profile, profile_into, try_profile, try_profile_into};
pub use recorder::{Instrumented, TimingRecord, TimingRecorder, print_statistics};
