//! Structured logging facility for pkgdiff
//!
//! - `init(profile)` installs the process-wide subscriber once, writing to
//!   stderr so stdout stays clean for results
//! - `log_op_start!`, `log_op_end!` and `log_op_error!` bracket every engine
//!   query with canonical `component`/`op`/`event` fields from
//!   [`schema`](crate::schema)
//! - `test_capture` records events in memory for assertions
//!
//! ```rust
//! use pkgdiff_core::logging_facility::{init, Profile};
//!
//! init(Profile::for_cli(true));
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile, LOG_ENV};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

#[doc(hidden)]
pub use tracing;
