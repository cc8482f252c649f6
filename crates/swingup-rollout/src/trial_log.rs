//! Append-only record of real-world policy trials.
//!
//! One [`TrialEntry`] per non-exploratory [`RealRollout`](crate::RealRollout)
//! execution, in execution order. Writers need `&mut TrialLog`, so there is
//! exactly one writer at a time; the Monte Carlo evaluator never touches it.

/// Parameters of a policy and the total real reward it earned.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialEntry {
    /// Policy parameters at execution time.
    pub parameters: Vec<f64>,
    /// Sum of the per-step rewards of the rollout.
    pub total_reward: f64,
}

/// Chronological, unbounded, undeduplicated trial record.
#[derive(Clone, Debug, Default)]
pub struct TrialLog {
    entries: Vec<TrialEntry>,
}

impl TrialLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one trial.
    pub fn record(&mut self, parameters: Vec<f64>, total_reward: f64) {
        self.entries.push(TrialEntry {
            parameters,
            total_reward,
        });
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[TrialEntry] {
        &self.entries
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, TrialEntry> {
        self.entries.iter()
    }

    /// Number of recorded trials.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent trial.
    pub fn last(&self) -> Option<&TrialEntry> {
        self.entries.last()
    }

    /// Trial with the highest total reward. Ties go to the earliest entry.
    pub fn best(&self) -> Option<&TrialEntry> {
        let mut iter = self.entries.iter();
        let first = iter.next()?;
        Some(iter.fold(first, |best, e| {
            if e.total_reward > best.total_reward {
                e
            } else {
                best
            }
        }))
    }
}

impl<'a> IntoIterator for &'a TrialLog {
    type Item = &'a TrialEntry;
    type IntoIter = std::slice::Iter<'a, TrialEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_log() {
        let log = TrialLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert!(log.last().is_none());
        assert!(log.best().is_none());
    }

    #[test]
    fn preserves_insertion_order_and_duplicates() {
        let mut log = TrialLog::new();
        log.record(vec![1.0], 3.0);
        log.record(vec![1.0], 3.0);
        log.record(vec![2.0], -1.0);

        assert_eq!(log.len(), 3);
        let rewards: Vec<f64> = log.iter().map(|e| e.total_reward).collect();
        assert_eq!(rewards, vec![3.0, 3.0, -1.0]);
        assert_eq!(log.entries()[2].parameters, vec![2.0]);
        assert_eq!(log.last().map(|e| e.total_reward), Some(-1.0));
    }

    #[test]
    fn best_prefers_earliest_on_ties() {
        let mut log = TrialLog::new();
        log.record(vec![0.0], 1.0);
        log.record(vec![1.0], 5.0);
        log.record(vec![2.0], 5.0);
        log.record(vec![3.0], 2.0);
        assert_eq!(log.best().map(|e| e.parameters.clone()), Some(vec![1.0]));
    }

    #[test]
    fn borrowed_iteration() {
        let mut log = TrialLog::new();
        log.record(vec![], 0.5);
        let mut n = 0;
        for entry in &log {
            assert_eq!(entry.total_reward, 0.5);
            n += 1;
        }
        assert_eq!(n, 1);
    }
}
