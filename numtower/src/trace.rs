//! Debug tracing for promotion and demotion decisions.
//!
//! Set `NUMTOWER_TRACE=1` to log every place where a value changes
//! representation (SmallInt overflow, BigInt demotion, BigFloat precision
//! widening). Only available in debug builds; release builds compile the
//! macro to nothing.

/// Check if tracing is enabled via the `NUMTOWER_TRACE` env var.
#[cfg(debug_assertions)]
pub fn trace_enabled() -> bool {
    use std::sync::OnceLock;
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| std::env::var("NUMTOWER_TRACE").is_ok())
}

/// Release builds never trace.
#[cfg(not(debug_assertions))]
pub fn trace_enabled() -> bool {
    false
}

/// Emit one trace line without relying on `eprintln!`.
#[cfg(debug_assertions)]
pub fn trace_log(args: std::fmt::Arguments<'_>) {
    use std::io::Write;
    let _ = writeln!(std::io::stderr(), "[numtower] {args}");
}

/// Log a representation change when `NUMTOWER_TRACE` is set.
#[macro_export]
macro_rules! numtower_trace {
    ($($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            if $crate::trace::trace_enabled() {
                $crate::trace::trace_log(format_args!($($arg)*));
            }
        }
    };
}
