//! Operation lifecycle events
//!
//! Every instrumented engine operation (`add_panel`, `build_panel_graph`,
//! `compute`, `fetch_sitemap`, `fetch_panel`) emits one `start` event and then
//! exactly one of `end` or `end_error`. All three carry `component` (the
//! emitting module path), `op` and `event`; trailing `key = value` fields are
//! passed through to `tracing` unchanged.

/// Shared body of the lifecycle macros
#[doc(hidden)]
#[macro_export]
macro_rules! __log_op {
    ($level:ident, $op:expr, $event:ident $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::$event,
            $($($field)*)?
        )
    };
}

/// Emit the `start` event of an operation at info level
///
/// ```
/// # use wiki_core::log_op_start;
/// log_op_start!("compute");
/// log_op_start!("fetch_panel", domain = "fed.wiki.org", slug = "welcome-visitors");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op!(info, $op, EVENT_START $(, $($field)*)?)
    };
}

/// Emit the `end` event of an operation; `duration_ms` is required
///
/// ```
/// # use wiki_core::log_op_end;
/// log_op_end!("compute", duration_ms = 3, evaluated = 12, rejected = 0);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op!(info, $op, EVENT_END, duration_ms = $duration $(, $($field)*)?)
    };
}

/// Emit the `end_error` event of an operation at error level
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError);
/// its kind and stable code are logged as `err.kind` and `err.code`.
///
/// ```
/// # use wiki_core::{log_op_error, errors::WikiError};
/// let err = WikiError::ReplaceNotImplemented { replace_id: "p1".to_string() };
/// log_op_error!("add_panel", err, duration_ms = 0, lineup_len = 4);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op!(
            error,
            $op,
            EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}
