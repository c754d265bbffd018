//! FFI bindings for Heatstrain
//!
//! This module provides C-compatible functions for driving a monitor from the
//! host app. All functions use C strings (null-terminated) and return allocated
//! memory that must be freed by the caller using `heatstrain_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::config::EngineConfig;
use crate::encoder::ReportEncoder;
use crate::pipeline::HeatRiskMonitor;
use crate::telemetry::FeedEvent;
use crate::types::{Channel, UserProfile};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

// ============================================================================
// Monitor API
// ============================================================================

/// Opaque handle to a HeatRiskMonitor
pub struct MonitorHandle {
    monitor: HeatRiskMonitor,
    encoder: ReportEncoder,
}

impl MonitorHandle {
    fn report_json(&self) -> *mut c_char {
        match self.encoder.encode_to_json(&self.monitor.snapshot()) {
            Ok(json) => string_to_cstr(&json),
            Err(e) => {
                set_last_error(&e.to_string());
                ptr::null_mut()
            }
        }
    }
}

/// Create a new monitor.
///
/// # Safety
/// - `config_json` may be NULL for the default configuration, otherwise it must
///   be a valid null-terminated C string.
/// - Returns a pointer that must be freed with `heatstrain_monitor_free`.
/// - Returns NULL on error; call `heatstrain_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn heatstrain_monitor_new(config_json: *const c_char) -> *mut MonitorHandle {
    clear_last_error();

    let config = if config_json.is_null() {
        EngineConfig::default()
    } else {
        let json = match cstr_to_string(config_json) {
            Some(s) => s,
            None => {
                set_last_error("Invalid config string pointer");
                return ptr::null_mut();
            }
        };
        match EngineConfig::from_json(&json) {
            Ok(config) => config,
            Err(e) => {
                set_last_error(&e.to_string());
                return ptr::null_mut();
            }
        }
    };

    let handle = Box::new(MonitorHandle {
        monitor: HeatRiskMonitor::with_config(config),
        encoder: ReportEncoder::new(),
    });
    Box::into_raw(handle)
}

/// Free a monitor.
///
/// # Safety
/// - `monitor` must be a valid pointer returned by `heatstrain_monitor_new`.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn heatstrain_monitor_free(monitor: *mut MonitorHandle) {
    if !monitor.is_null() {
        drop(Box::from_raw(monitor));
    }
}

/// Record a reading on a channel (`skin`, `ambient`, `humidity` or a feed path).
///
/// # Safety
/// - `monitor` must be a valid pointer returned by `heatstrain_monitor_new`.
/// - `channel` must be a valid null-terminated C string.
/// - Returns 0 on success, -1 on error.
#[no_mangle]
pub unsafe extern "C" fn heatstrain_monitor_observe(
    monitor: *mut MonitorHandle,
    channel: *const c_char,
    value: f64,
) -> i32 {
    clear_last_error();

    if monitor.is_null() {
        set_last_error("Null monitor pointer");
        return -1;
    }

    let handle = &mut *monitor;

    let channel = match cstr_to_string(channel).map(|s| s.parse::<Channel>()) {
        Some(Ok(channel)) => channel,
        Some(Err(e)) => {
            set_last_error(&e.to_string());
            return -1;
        }
        None => {
            set_last_error("Invalid channel string pointer");
            return -1;
        }
    };

    handle.monitor.observe(channel, value);
    0
}

/// Apply one feed event given as JSON.
///
/// # Safety
/// - `monitor` must be a valid pointer returned by `heatstrain_monitor_new`.
/// - `event_json` must be a valid null-terminated C string.
/// - Returns 0 on success, -1 on error.
#[no_mangle]
pub unsafe extern "C" fn heatstrain_monitor_ingest(
    monitor: *mut MonitorHandle,
    event_json: *const c_char,
) -> i32 {
    clear_last_error();

    if monitor.is_null() {
        set_last_error("Null monitor pointer");
        return -1;
    }

    let handle = &mut *monitor;

    let json = match cstr_to_string(event_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid event string pointer");
            return -1;
        }
    };

    match serde_json::from_str::<FeedEvent>(&json) {
        Ok(event) => {
            handle.monitor.ingest(&event);
            0
        }
        Err(e) => {
            set_last_error(&e.to_string());
            -1
        }
    }
}

/// Let the baseline tracker fold in the current skin temperature.
///
/// # Safety
/// - `monitor` must be a valid pointer returned by `heatstrain_monitor_new`.
/// - Returns 1 if the baseline was refreshed, 0 if not, -1 on error.
#[no_mangle]
pub unsafe extern "C" fn heatstrain_monitor_tick(monitor: *mut MonitorHandle, now_ms: u64) -> i32 {
    clear_last_error();

    if monitor.is_null() {
        set_last_error("Null monitor pointer");
        return -1;
    }

    let handle = &mut *monitor;
    i32::from(handle.monitor.tick(now_ms))
}

/// Compute scores for a user profile and return the report JSON.
///
/// # Safety
/// - `monitor` must be a valid pointer returned by `heatstrain_monitor_new`.
/// - `profile_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `heatstrain_free_string`.
/// - Returns NULL on error; call `heatstrain_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn heatstrain_monitor_compute(
    monitor: *mut MonitorHandle,
    profile_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if monitor.is_null() {
        set_last_error("Null monitor pointer");
        return ptr::null_mut();
    }

    let handle = &mut *monitor;

    let json = match cstr_to_string(profile_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid profile string pointer");
            return ptr::null_mut();
        }
    };

    let profile = match UserProfile::from_json(&json) {
        Ok(profile) => profile,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    handle.monitor.compute(&profile);
    handle.report_json()
}

/// Return the report JSON for the current state without computing.
///
/// # Safety
/// - `monitor` must be a valid pointer returned by `heatstrain_monitor_new`.
/// - Returns a newly allocated string that must be freed with `heatstrain_free_string`.
/// - Returns NULL on error; call `heatstrain_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn heatstrain_monitor_report(monitor: *mut MonitorHandle) -> *mut c_char {
    clear_last_error();

    if monitor.is_null() {
        set_last_error("Null monitor pointer");
        return ptr::null_mut();
    }

    let handle = &*monitor;
    handle.report_json()
}

/// Discard the held result.
///
/// # Safety
/// - `monitor` must be a valid pointer returned by `heatstrain_monitor_new`.
/// - Returns 1 if a result was discarded, 0 if the monitor was idle, -1 on error.
#[no_mangle]
pub unsafe extern "C" fn heatstrain_monitor_reset(monitor: *mut MonitorHandle) -> i32 {
    clear_last_error();

    if monitor.is_null() {
        set_last_error("Null monitor pointer");
        return -1;
    }

    let handle = &mut *monitor;
    i32::from(handle.monitor.reset().is_some())
}

/// Save the monitor baseline to JSON.
///
/// # Safety
/// - `monitor` must be a valid pointer returned by `heatstrain_monitor_new`.
/// - Returns a newly allocated string that must be freed with `heatstrain_free_string`.
/// - Returns NULL on error; call `heatstrain_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn heatstrain_monitor_save_baseline(
    monitor: *mut MonitorHandle,
) -> *mut c_char {
    clear_last_error();

    if monitor.is_null() {
        set_last_error("Null monitor pointer");
        return ptr::null_mut();
    }

    let handle = &*monitor;

    match handle.monitor.save_baseline() {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Load the monitor baseline from JSON.
///
/// # Safety
/// - `monitor` must be a valid pointer returned by `heatstrain_monitor_new`.
/// - `json` must be a valid null-terminated C string.
/// - Returns 0 on success, -1 on error.
#[no_mangle]
pub unsafe extern "C" fn heatstrain_monitor_load_baseline(
    monitor: *mut MonitorHandle,
    json: *const c_char,
) -> i32 {
    clear_last_error();

    if monitor.is_null() {
        set_last_error("Null monitor pointer");
        return -1;
    }

    let handle = &mut *monitor;

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return -1;
        }
    };

    match handle.monitor.load_baseline(&json_str) {
        Ok(()) => 0,
        Err(e) => {
            set_last_error(&e.to_string());
            -1
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Heatstrain functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Heatstrain function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn heatstrain_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next Heatstrain call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn heatstrain_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the Heatstrain library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn heatstrain_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
