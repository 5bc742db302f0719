//! Background memory monitoring bound to a guard's lifetime.
//!
//! `MemoryMonitor::start` never fails: if the monitor cannot be started the
//! problem is logged and the guard is inert. Dropping (or `stop`ping) the guard
//! ends the monitor and waits for it.

use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, info, warn};

const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// How memory is watched while a profiled call runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MonitorMode {
    #[default]
    Off,
    /// Sample this process's resident memory from a background thread.
    Sampler,
    /// Run an external monitor as `<program> <pid> <interval-seconds>`.
    Command(PathBuf),
}

enum Running {
    Sampler {
        stop: Sender<()>,
        handle: JoinHandle<Option<u64>>,
    },
    Child(Child),
}

pub struct MemoryMonitor {
    running: Option<Running>,
}

impl MemoryMonitor {
    pub fn start(mode: &MonitorMode, interval: Duration) -> Self {
        let interval = interval.max(MIN_INTERVAL);
        let running = match mode {
            MonitorMode::Off => None,
            MonitorMode::Sampler => spawn_sampler(interval),
            MonitorMode::Command(program) => spawn_command(program, interval),
        };
        Self { running }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Stop the monitor. Returns the peak resident bytes seen by the sampler.
    pub fn stop(mut self) -> Option<u64> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Option<u64> {
        match self.running.take()? {
            Running::Sampler { stop, handle } => {
                // The sampler may already be gone; a closed channel stops it too.
                let _ = stop.send(());
                match handle.join() {
                    Ok(peak) => {
                        if let Some(bytes) = peak {
                            info!(peak_bytes = bytes, "memory monitor stopped");
                        }
                        peak
                    }
                    Err(_) => {
                        warn!("memory sampler thread panicked");
                        None
                    }
                }
            }
            Running::Child(mut child) => {
                if let Err(e) = child.kill() {
                    debug!("memory monitor already exited: {}", e);
                }
                if let Err(e) = child.wait() {
                    warn!("failed to reap memory monitor: {}", e);
                }
                None
            }
        }
    }
}

impl Drop for MemoryMonitor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn_sampler(interval: Duration) -> Option<Running> {
    let (stop, rx) = mpsc::channel::<()>();
    let spawned = std::thread::Builder::new()
        .name("qutils-mem-sampler".to_string())
        .spawn(move || {
            let mut peak: Option<u64> = None;
            loop {
                match memory_stats::memory_stats() {
                    Some(stats) => {
                        let bytes = stats.physical_mem as u64;
                        debug!(resident_bytes = bytes, "memory sample");
                        peak = Some(peak.map_or(bytes, |p| p.max(bytes)));
                    }
                    None => debug!("memory stats unavailable on this platform"),
                }
                match rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    _ => break,
                }
            }
            peak
        });

    match spawned {
        Ok(handle) => Some(Running::Sampler { stop, handle }),
        Err(e) => {
            warn!("failed to start memory sampler: {}", e);
            None
        }
    }
}

fn spawn_command(program: &Path, interval: Duration) -> Option<Running> {
    let pid = std::process::id();
    match Command::new(program)
        .arg(pid.to_string())
        .arg(interval.as_secs().max(1).to_string())
        .spawn()
    {
        Ok(child) => {
            debug!(program = %program.display(), pid, "memory monitor spawned");
            Some(Running::Child(child))
        }
        Err(e) => {
            warn!("failed to spawn memory monitor {}: {}", program.display(), e);
            None
        }
    }
}
