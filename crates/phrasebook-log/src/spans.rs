//! Span and timing helpers shared by the Phrasebook crates.

use tracing::{debug_span, Span};

/// Create a span for a catalog operation on one locale.
pub fn catalog_span(locale: &str, operation: &str) -> Span {
    debug_span!("catalog", locale = %locale, op = %operation)
}

/// Create a span for a storage operation.
pub fn storage_span(operation: &str, path: &str) -> Span {
    debug_span!("storage", op = %operation, path = %path, error = tracing::field::Empty)
}

/// Create a span for locale negotiation of one request.
pub fn negotiation_span(url: Option<&str>) -> Span {
    debug_span!("negotiate", url = url.unwrap_or("-"))
}

/// Record an error on the current span.
pub fn record_error(error: &dyn std::error::Error) {
    Span::current().record("error", tracing::field::display(error));
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Complete the timer and record duration.
    pub fn finish(self) {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_us = %duration.as_micros(),
            "operation completed"
        );
    }
}

/// Macro for timing a block of code.
#[macro_export]
macro_rules! timed {
    ($name:expr, $body:expr) => {{
        let _timer = $crate::spans::Timer::start($name);
        let result = $body;
        _timer.finish();
        result
    }};
}
