//! Operation boundary macros
//!
//! Each query logs exactly one `start` and one `end` or `end_error` event.
//! The macros reach `tracing` through this crate, so callers do not need
//! their own dependency on it.

/// Log the start of an operation with optional extra fields.
///
/// ```
/// # use pkgdiff_core::log_op_start;
/// log_op_start!("compare");
/// log_op_start!("compare", package = "lodash", from_version = "4.17.20");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::logging_facility::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            $($($field)*)?
        )
    };
}

/// Log the successful end of an operation.
///
/// `duration_ms` is required; result sizes may follow it.
///
/// ```
/// # use pkgdiff_core::log_op_end;
/// log_op_end!("compare", duration_ms = 42);
/// log_op_end!("compare", duration_ms = 42, change_count = 7, truncated = false);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::logging_facility::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        )
    };
}

/// Log a failed operation.
///
/// Takes anything convertible into [`ExError`](crate::errors::ExError) and
/// records its kind, stable code, and whatever package, version and path
/// context the error carries.
///
/// ```
/// # use pkgdiff_core::{log_op_error, errors::PkgDiffError};
/// let err = PkgDiffError::InvalidTree { reason: "not an array".to_string() };
/// log_op_error!("compare", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::logging_facility::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            package = ex_err.package(),
            version = ex_err.version(),
            path = ex_err.path(),
            $($($field)*)?
        );
    }};
}
