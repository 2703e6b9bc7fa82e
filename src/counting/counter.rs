use crate::counting::line::CrossingDirection;

/// Per-session crossing tally. Only ever grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    total: u64,
    positive: u64,
    negative: u64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Crossings from the negative to the positive side.
    pub fn positive(&self) -> u64 {
        self.positive
    }

    /// Crossings from the positive to the negative side.
    pub fn negative(&self) -> u64 {
        self.negative
    }

    pub(crate) fn record(&mut self, direction: CrossingDirection) {
        self.total += 1;
        match direction {
            CrossingDirection::Positive => self.positive += 1,
            CrossingDirection::Negative => self.negative += 1,
        }
    }
}
