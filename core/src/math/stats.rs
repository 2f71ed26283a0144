/// Running arithmetic mean that does not retain individual samples beyond the first.
///
/// The first value is kept so it can be withdrawn once; every other value is
/// folded into the sum.
#[derive(Debug, Clone, Default)]
pub struct RunningMean {
    sum: f64,
    count: usize,
    pushed: usize,
    first: Option<f64>,
}

impl RunningMean {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        if self.pushed == 0 {
            self.first = Some(value);
        }
        self.sum += value;
        self.count += 1;
        self.pushed += 1;
    }

    /// Withdraws the first value ever pushed. Returns `None` if it was already withdrawn.
    pub fn remove_first(&mut self) -> Option<f64> {
        let first = self.first.take()?;
        self.sum -= first;
        self.count -= 1;
        Some(first)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn mean(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.sum / self.count as f64
    }
}
