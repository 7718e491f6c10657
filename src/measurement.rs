use tokio::time::sleep;
use tracing::{debug, info};

use crate::attempt::AttemptResult;
use crate::config::MeasurementConfig;
use crate::prober::probe_tcp;
use crate::stats::AggregateResult;

/// Sequential TCP latency measurement against a single target.
///
/// Attempts run one after another. The run is finished once `runs`
/// attempts have been recorded, and it stays finished.
pub struct Measurement {
    config: MeasurementConfig,

    data: Vec<AttemptResult>,
    count: usize,
    successful: usize,
    failed: usize,
}

impl Measurement {
    pub fn new(config: MeasurementConfig) -> Self {
        Self {
            config,
            data: Vec::new(),
            count: 0,
            successful: 0,
            failed: 0,
        }
    }

    pub fn config(&self) -> &MeasurementConfig {
        &self.config
    }

    /// Performs one timed connection attempt and records it.
    ///
    /// A failure of any kind is recorded as a failed attempt with zero
    /// latency; nothing is retried.
    pub async fn dial(&mut self) -> AttemptResult {
        let mut result = AttemptResult {
            host: self.config.host.clone(),
            port: self.config.port,
            timeout: self.config.timeout_secs,
            sequence: self.count,
            latency_ms: 0.0,
            failed: false,
        };

        match probe_tcp(&self.config.host, self.config.port, self.config.timeout()).await {
            Ok(latency) => {
                result.latency_ms = latency.as_secs_f64() * 1000.0;
                debug!(seq = result.sequence, latency_ms = result.latency_ms, "tcp connect {}:{} success", self.config.host, self.config.port);
                self.append_successful(result.clone());
            }
            Err(e) => {
                debug!(seq = result.sequence, "tcp connect {}:{} failed: {:?}", self.config.host, self.config.port, e);
                self.append_failed(result.clone());
            }
        }

        result
    }

    pub fn is_finished(&self) -> bool {
        self.count >= self.config.runs
    }

    /// Drives the run to completion, waiting before every attempt and
    /// handing each recorded attempt to `on_attempt`.
    pub async fn run<F>(&mut self, mut on_attempt: F)
    where
        F: FnMut(&AttemptResult),
    {
        info!(
            "measuring {}:{} runs={} timeout={}s wait={}s",
            self.config.host, self.config.port, self.config.runs, self.config.timeout_secs, self.config.wait_secs
        );
        let wait = self.config.wait();
        while !self.is_finished() {
            sleep(wait).await;
            let attempt = self.dial().await;
            on_attempt(&attempt);
        }
        info!(
            "finished {}:{} successful={} failed={}",
            self.config.host, self.config.port, self.successful, self.failed
        );
    }

    /// Statistics over everything recorded so far.
    pub fn result(&self) -> AggregateResult {
        AggregateResult::from_results(&self.data)
    }

    pub fn results(&self) -> &[AttemptResult] {
        &self.data
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn successful(&self) -> usize {
        self.successful
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    fn append_failed(&mut self, mut response: AttemptResult) {
        response.failed = true;

        self.count += 1;
        self.failed += 1;
        self.data.push(response);
    }

    fn append_successful(&mut self, mut response: AttemptResult) {
        response.failed = false;

        self.count += 1;
        self.successful += 1;
        self.data.push(response);
    }
}

/// Runs a complete measurement and returns only the aggregate.
pub async fn measure(config: MeasurementConfig) -> AggregateResult {
    let mut m = Measurement::new(config);
    m.run(|_| {}).await;
    m.result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(runs: usize) -> MeasurementConfig {
        MeasurementConfig::new("example.com", 443, 5, runs, 1)
    }

    fn response(m: &Measurement, sequence: usize, latency_ms: f64) -> AttemptResult {
        AttemptResult {
            host: m.config.host.clone(),
            port: m.config.port,
            timeout: m.config.timeout_secs,
            sequence,
            latency_ms,
            failed: false,
        }
    }

    fn with_test_data() -> Measurement {
        let mut m = Measurement::new(config(3));
        for (seq, latency) in [21.50, 24.50, 23.00].into_iter().enumerate() {
            let r = response(&m, seq, latency);
            m.append_successful(r);
        }
        let r = response(&m, 3, 0.0);
        m.append_failed(r);
        m
    }

    #[test]
    fn new_measurement_is_empty() {
        let m = Measurement::new(config(5));
        assert_eq!(m.config().host, "example.com");
        assert_eq!(m.config().runs, 5);
        assert_eq!(m.count(), 0);
        assert!(m.results().is_empty());
        assert!(!m.is_finished());
    }

    #[test]
    fn append_successful_counts_once() {
        let mut m = Measurement::new(config(3));
        let r = response(&m, 0, 21.50);
        m.append_successful(r);

        assert_eq!(m.count(), 1);
        assert_eq!(m.successful(), 1);
        assert_eq!(m.failed(), 0);
        assert_eq!(m.results().len(), 1);
        assert!(!m.results()[0].failed);
    }

    #[test]
    fn append_failed_counts_once() {
        let mut m = Measurement::new(config(3));
        let r = response(&m, 0, 0.0);
        m.append_failed(r);

        assert_eq!(m.count(), 1);
        assert_eq!(m.successful(), 0);
        assert_eq!(m.failed(), 1);
        assert_eq!(m.results().len(), 1);
        assert!(m.results()[0].failed);
    }

    #[test]
    fn result_over_test_data() {
        let m = with_test_data();
        let res = m.result();

        assert_eq!(res.count, 4);
        assert_eq!(res.successful, 3);
        assert_eq!(res.failed, 1);
        assert_eq!(res.average, 23.00);
        assert_eq!(res.max, 24.50);
        assert_eq!(res.min, 21.50);
        assert!((res.std_dev - 13.335_416_503_931_677).abs() < 1e-9);
    }

    #[test]
    fn finished_once_runs_reached() {
        let mut m = Measurement::new(config(2));
        let r = response(&m, 0, 1.0);
        m.append_successful(r);
        assert!(!m.is_finished());

        let r = response(&m, 1, 0.0);
        m.append_failed(r);
        assert!(m.is_finished());
        assert!(m.is_finished());
    }

    #[test]
    fn zero_runs_is_finished_immediately() {
        assert!(Measurement::new(config(0)).is_finished());
    }
}
