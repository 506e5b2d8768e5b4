//! FFI boundary definitions for C interop

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::config::{self, Configuration};
use crate::display::Terminal;
use crate::monitor::DiskMonitor;
use crate::severity::Severity;

/// Opaque handle to the Rust core state
pub struct DiskStatusCore {
    monitor: DiskMonitor,
}

impl DiskStatusCore {
    fn boxed(config: Configuration) -> *mut DiskStatusCore {
        Box::into_raw(Box::new(DiskStatusCore {
            monitor: DiskMonitor::new(config),
        }))
    }
}

/// Severity codes
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CSeverity {
    Healthy = 0,
    Warning = 1,
    Critical = 2,
}

impl From<Severity> for CSeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Healthy => CSeverity::Healthy,
            Severity::Warning => CSeverity::Warning,
            Severity::Critical => CSeverity::Critical,
        }
    }
}

unsafe fn path_arg<'a>(path: *const c_char) -> Option<&'a str> {
    if path.is_null() {
        None
    } else {
        CStr::from_ptr(path).to_str().ok()
    }
}

/// Create a new core instance using the configuration under the home directory
///
/// # Safety
/// Returns a pointer that must be freed with `disk_status_core_free`
#[no_mangle]
pub extern "C" fn disk_status_core_new() -> *mut DiskStatusCore {
    DiskStatusCore::boxed(config::load_default())
}

/// Create a new core instance from a specific configuration file
///
/// A null or unreadable path yields the built-in defaults.
///
/// # Safety
/// `path` must be a valid C string or null. Returns a pointer that must be
/// freed with `disk_status_core_free`
#[no_mangle]
pub unsafe extern "C" fn disk_status_core_new_with_config(
    path: *const c_char,
) -> *mut DiskStatusCore {
    let config = match path_arg(path) {
        Some(p) => config::load(Path::new(p)),
        None => Configuration::default(),
    };
    DiskStatusCore::boxed(config)
}

/// Free the core instance
///
/// # Safety
/// `core` must be a valid pointer returned by `disk_status_core_new*`
#[no_mangle]
pub unsafe extern "C" fn disk_status_core_free(core: *mut DiskStatusCore) {
    if !core.is_null() {
        drop(Box::from_raw(core));
    }
}

/// Check disk space for `workspace` and print any notification to stdout
///
/// Never reports failure; a null handle, an invalid path or an unreadable
/// filesystem print nothing.
///
/// # Safety
/// `core` must be valid, `workspace` must be a valid C string
#[no_mangle]
pub unsafe extern "C" fn disk_status_core_check(
    core: *const DiskStatusCore,
    workspace: *const c_char,
    color: bool,
) {
    let core = match core.as_ref() {
        Some(c) => c,
        None => return,
    };
    let workspace = match path_arg(workspace) {
        Some(w) => w,
        None => return,
    };

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut out = Terminal::stdout(color);
        core.monitor.check(workspace, &mut out);
    }));
    if result.is_err() {
        tracing::error!("disk check panicked; output suppressed");
    }
}

/// Whether the configuration asks for a check at session start
///
/// # Safety
/// `core` must be valid
#[no_mangle]
pub unsafe extern "C" fn disk_status_core_check_on_session_start(
    core: *const DiskStatusCore,
) -> bool {
    match core.as_ref() {
        Some(c) => {
            let behavior = &c.monitor.config().behavior;
            behavior.enabled && behavior.check_on_session_start
        }
        None => false,
    }
}

/// Classify a usage percentage against the configured thresholds
///
/// # Safety
/// `core` must be valid
#[no_mangle]
pub unsafe extern "C" fn disk_status_core_classify(
    core: *const DiskStatusCore,
    pct: f64,
) -> CSeverity {
    match core.as_ref() {
        Some(c) => Severity::classify(pct, &c.monitor.config().thresholds).into(),
        None => CSeverity::Healthy,
    }
}
