//! This module provides observability and diagnostics capabilities for the codec.
//!
//! The engine never writes to a sink directly; it emits structured key-value
//! events through the `log` facade and the host process decides where they
//! go. The `log_event!` macro is the primary tool.

/// Logs a structured key-value event through the `log` facade at debug level.
///
/// # Example
/// ```
/// use fixrec_codec::log_event;
/// let rows = 42;
/// log_event!("event" = "decode", "rows" = &rows);
/// ```
#[macro_export]
macro_rules! log_event {
    ($($key:literal = $value:expr),+ $(,)?) => {
        {
            // Collect each pair as a JSON string fragment
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+

            log::debug!("FIXREC_EVENT: {{ {} }}", parts.join(", "));
        }
    };
}
