//! System information report.
//!
//! Sample utility showing where reusable helpers live in the scaffold. The
//! entry point logs the report at debug level on startup.

use serde::Serialize;
use sysinfo::System;

/// A snapshot of the host environment.
#[derive(Debug, Clone, Serialize)]
pub struct SystemReport {
    pub os_name: String,
    pub os_version: String,
    pub kernel_version: String,
    pub host_name: String,
    pub arch: String,
    pub cpu_count: usize,
    pub total_memory_mib: u64,
}

/// Collect a [`SystemReport`] for the current host.
pub fn system_report() -> SystemReport {
    let sys = System::new_all();

    SystemReport {
        os_name: System::name().unwrap_or_else(|| "unknown".to_string()),
        os_version: System::os_version().unwrap_or_else(|| "unknown".to_string()),
        kernel_version: System::kernel_version().unwrap_or_else(|| "unknown".to_string()),
        host_name: System::host_name().unwrap_or_else(|| "unknown".to_string()),
        arch: std::env::consts::ARCH.to_string(),
        cpu_count: sys.cpus().len(),
        total_memory_mib: sys.total_memory() / (1024 * 1024),
    }
}

impl SystemReport {
    /// Trace the report at debug level.
    pub fn log(&self) {
        tracing::debug!(
            "System: {} {} (kernel {}), host {}, arch {}, {} cpus, {} MiB memory",
            self.os_name,
            self.os_version,
            self.kernel_version,
            self.host_name,
            self.arch,
            self.cpu_count,
            self.total_memory_mib
        );
    }
}
