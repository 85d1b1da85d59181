use std::time::{Duration, Instant};

/// Holds the latest value until `delay` has passed without a newer one.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.deadline().is_some_and(|deadline| now >= deadline) {
            self.flush()
        } else {
            None
        }
    }

    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|(value, _)| value)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.push("w", start);
        debouncer.push("wi", start + Duration::from_millis(100));
        debouncer.push("win", start + Duration::from_millis(200));

        assert_eq!(debouncer.poll(start + Duration::from_millis(450)), None);
        assert_eq!(debouncer.pending(), Some(&"win"));
        assert_eq!(debouncer.poll(start + Duration::from_millis(500)), Some("win"));
        assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
    }

    #[test]
    fn flush_skips_the_wait() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_secs(60));
        debouncer.push(3, start);
        assert_eq!(debouncer.deadline(), Some(start + Duration::from_secs(60)));
        assert_eq!(debouncer.flush(), Some(3));
        assert_eq!(debouncer.pending(), None);
    }
}
