//! tcplatency measures network latency to a host and port by timing
//! repeated TCP handshakes, ping style.
//!
//! ```no_run
//! # async fn demo() {
//! use tcplatency::{measure, MeasurementConfig};
//!
//! let result = measure(MeasurementConfig::new("example.com", 443, 5, 5, 1)).await;
//! println!("avg {:.2} ms over {} attempts", result.average, result.count);
//! # }
//! ```

pub mod attempt;
pub mod config;
pub mod measurement;
pub mod prober;
pub mod report;
pub mod stats;
pub mod util;

pub use attempt::AttemptResult;
pub use config::{MeasurementConfig, ProbeConfig};
pub use measurement::{measure, Measurement};
pub use report::OutputFormat;
pub use stats::AggregateResult;
