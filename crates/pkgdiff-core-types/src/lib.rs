//! Core types shared across pkgdiff facilities
//!
//! This crate holds the canonical schema constants used by the logging
//! facility and by anything that asserts on captured log events:
//!
//! - **Field keys**: component, op, event, duration and error fields
//! - **Domain fields**: package, version, path and collection sizes
//! - **Event names**: start, end, end_error

pub mod schema;
