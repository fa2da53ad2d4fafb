//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Package identifiers
pub const FIELD_PACKAGE: &str = "package";
pub const FIELD_FROM_VERSION: &str = "from_version";
pub const FIELD_TO_VERSION: &str = "to_version";
pub const FIELD_VERSION: &str = "version";
pub const FIELD_PATH: &str = "path";

// Collection sizes
pub const FIELD_FILE_COUNT: &str = "file_count";
pub const FIELD_HUNK_COUNT: &str = "hunk_count";
pub const FIELD_CHANGE_COUNT: &str = "change_count";
pub const FIELD_TRUNCATED: &str = "truncated";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
