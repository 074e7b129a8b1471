//! Convenience macros for the lineage log channels.
//!
//! The `lineage_*` macros log on the `openlineage::client` target, so records
//! land on the client channel. [`log_critical!`] tags an error event with
//! `critical = true`, which the channels report as `CRITICAL`.

/// Log a debug record on the client channel
///
/// # Example
///
/// ```ignore
/// lineage_debug!(run_id = %run_id, "Emitting START event");
/// ```
#[macro_export]
macro_rules! lineage_debug {
    ($($arg:tt)+) => {
        $crate::tracing::debug!(target: $crate::CLIENT_TARGET, $($arg)+)
    };
}

/// Log an info record on the client channel
#[macro_export]
macro_rules! lineage_info {
    ($($arg:tt)+) => {
        $crate::tracing::info!(target: $crate::CLIENT_TARGET, $($arg)+)
    };
}

/// Log a warning on the client channel
#[macro_export]
macro_rules! lineage_warn {
    ($($arg:tt)+) => {
        $crate::tracing::warn!(target: $crate::CLIENT_TARGET, $($arg)+)
    };
}

/// Log an error on the client channel
#[macro_export]
macro_rules! lineage_error {
    ($($arg:tt)+) => {
        $crate::tracing::error!(target: $crate::CLIENT_TARGET, $($arg)+)
    };
}

/// Log a critical error, optionally on an explicit target
///
/// # Example
///
/// ```ignore
/// log_critical!(target: olkit_observability::PARENT_TARGET, "transport unusable");
/// log_critical!("lineage disabled for this run");
/// ```
#[macro_export]
macro_rules! log_critical {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::tracing::error!(target: $target, critical = true, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::tracing::error!(critical = true, $($arg)+)
    };
}
