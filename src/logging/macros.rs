//! Formatting front ends for [`Logger`](crate::logging::Logger).
//!
//! The gate is checked before `format_args!` runs, so arguments of a
//! disabled level are never evaluated.

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.debug_enabled() {
            logger.debug($ctx, format_args!($($arg)+));
        }
    }};
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.info_enabled() {
            logger.info($ctx, format_args!($($arg)+));
        }
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.warn_enabled() {
            logger.warn($ctx, format_args!($($arg)+));
        }
    }};
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.error_enabled() {
            logger.error($ctx, format_args!($($arg)+));
        }
    }};
}

/// Logs the line and exits the process with status 1.
#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.fatal_exit($ctx, format_args!($($arg)+))
    };
}
