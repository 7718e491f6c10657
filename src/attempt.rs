use serde::Serialize;
use std::fmt;

/// Outcome of one timed TCP handshake.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptResult {
    pub host: String,
    pub port: u16,
    /// Connect timeout in seconds that applied to this attempt.
    pub timeout: u64,
    /// Position in the run, starting at 0.
    pub sequence: usize,
    /// Handshake time in milliseconds. Zero when the attempt failed.
    pub latency_ms: f64,
    pub failed: bool,
}

impl fmt::Display for AttemptResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.failed {
            return write!(
                f,
                "{} via tcp seq={} port={} timeout={} failed",
                self.host, self.sequence, self.port, self.timeout
            );
        }
        write!(
            f,
            "{} via tcp seq={} port={} timeout={} time={:.2} ms",
            self.host, self.sequence, self.port, self.timeout, self.latency_ms
        )
    }
}
