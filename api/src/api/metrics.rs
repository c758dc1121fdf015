use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Simple counter used to log the amount of upstream requests performed.
#[derive(Debug)]
pub struct RequestMetrics {
    start: Instant,
    count: AtomicU64,
    name: &'static str,
}

impl RequestMetrics {
    pub fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            count: AtomicU64::new(0),
            name,
        })
    }

    pub fn inc(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Average requests per minute since creation.
    pub fn per_minute(&self) -> f64 {
        let elapsed_min = self.start.elapsed().as_secs_f64() / 60.0;
        if elapsed_min > 0.0 {
            self.total() as f64 / elapsed_min
        } else {
            0.0
        }
    }

    pub fn log_summary(&self) {
        tracing::info!(
            client = self.name,
            "📊 {} requests executed (avg {:.2} req/min)",
            self.total(),
            self.per_minute()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn inc_increases_count() {
        let metrics = RequestMetrics::new("test");
        metrics.inc();
        metrics.inc();

        let metrics = Arc::try_unwrap(metrics).expect("arc should be unique");
        assert_eq!(metrics.count.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn fresh_metrics_are_empty() {
        let metrics = RequestMetrics::new("test");
        assert_eq!(metrics.total(), 0);
        assert_eq!(metrics.per_minute(), 0.0);
        metrics.log_summary();
    }

    #[tokio::test]
    async fn counter_is_shared_between_tasks() {
        let metrics = RequestMetrics::new("test");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let metrics = metrics.clone();
                tokio::spawn(async move { metrics.inc() })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(metrics.total(), 8);
    }
}
