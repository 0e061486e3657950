use std::time::Duration;

/// Wall-clock times of repeated solves.
#[derive(Clone, Debug, Default)]
pub struct Timings {
    runs: Vec<Duration>,
}

impl Timings {
    pub fn with_capacity(repetitions: usize) -> Self {
        Timings {
            runs: Vec::with_capacity(repetitions),
        }
    }

    pub fn push(&mut self, elapsed: Duration) {
        self.runs.push(elapsed);
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn total(&self) -> Duration {
        self.runs.iter().sum()
    }

    pub fn average(&self) -> Option<Duration> {
        if self.runs.is_empty() {
            return None;
        }
        Some(self.total() / self.runs.len() as u32)
    }

    pub fn fastest(&self) -> Option<Duration> {
        self.runs.iter().min().copied()
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn empty_timings() {
        let t = Timings::default();
        assert!(t.is_empty());
        assert_eq!(t.average(), None);
        assert_eq!(t.fastest(), None);
        assert_eq!(t.total(), Duration::ZERO);
    }

    #[test]
    fn average_and_fastest() {
        let mut t = Timings::with_capacity(3);
        t.push(Duration::from_millis(30));
        t.push(Duration::from_millis(10));
        t.push(Duration::from_millis(20));
        assert_eq!(t.len(), 3);
        assert_eq!(t.total(), Duration::from_millis(60));
        assert_eq!(t.average(), Some(Duration::from_millis(20)));
        assert_eq!(t.fastest(), Some(Duration::from_millis(10)));
    }
}
