// Conditional tracing support. With the `tracing` feature disabled every macro
// expands to nothing and its arguments are never evaluated.

/// Enter a tracing span for an engine stage.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("linkrank_stage", stage = $name).entered();
    };
}

macro_rules! log_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

macro_rules! log_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::warn!($($arg)*);
    };
}
