/// Rate limiter for histogram redraws.
///
/// A request inside the interval is deferred instead of dropped. Only one deferred
/// refresh is tracked, so a burst of requests collapses into a single trailing one.
#[derive(Clone, Debug)]
pub struct RefreshLimiter {
    interval: f64,
    last_refresh: Option<f64>,
    pending: bool,
}

impl RefreshLimiter {
    pub fn new(interval: f64) -> Self {
        Self {
            interval: interval.max(0.0),
            last_refresh: None,
            pending: false,
        }
    }

    /// Ask for a refresh at `now` (seconds). Returns true when the caller should refresh
    /// immediately; otherwise a trailing refresh is scheduled.
    pub fn request(&mut self, now: f64) -> bool {
        if self.due(now) {
            self.fire(now);
            true
        } else {
            self.pending = true;
            false
        }
    }

    /// Returns true once, when a deferred refresh has come due.
    pub fn poll(&mut self, now: f64) -> bool {
        if self.pending && self.due(now) {
            self.fire(now);
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    fn due(&self, now: f64) -> bool {
        match self.last_refresh {
            Some(last) => now - last >= self.interval,
            None => true,
        }
    }

    fn fire(&mut self, now: f64) {
        self.last_refresh = Some(now);
        self.pending = false;
    }
}

impl Default for RefreshLimiter {
    fn default() -> Self {
        Self::new(crate::config::HISTOGRAM_REFRESH_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_request_refreshes_immediately() {
        let mut limiter = RefreshLimiter::new(0.2);
        assert!(limiter.request(10.0));
        assert!(!limiter.is_pending());
    }

    #[test]
    fn burst_collapses_into_one_trailing_refresh() {
        let mut limiter = RefreshLimiter::new(0.2);
        assert!(limiter.request(0.0));
        for i in 1..50 {
            assert!(!limiter.request(i as f64 * 0.001));
        }
        assert!(limiter.is_pending());
        assert!(!limiter.poll(0.1));
        assert!(limiter.poll(0.25));
        // nothing left to fire
        assert!(!limiter.poll(1.0));
    }

    #[test]
    fn request_after_interval_is_immediate() {
        let mut limiter = RefreshLimiter::new(0.2);
        assert!(limiter.request(0.0));
        assert!(limiter.request(0.3));
        assert!(!limiter.request(0.35));
        assert!(limiter.request(0.6));
        assert!(!limiter.is_pending());
    }

    #[test]
    fn cancel_drops_pending_refresh() {
        let mut limiter = RefreshLimiter::default();
        limiter.request(0.0);
        limiter.request(0.05);
        limiter.cancel();
        assert!(!limiter.poll(5.0));
    }
}
