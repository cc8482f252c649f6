//! Summary statistics over a per-step reward sequence.

/// Aggregate view of one rollout's rewards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RewardSummary {
    /// Number of steps.
    pub steps: usize,
    /// Sum of rewards, accumulated in step order.
    pub total: f64,
    /// `total / steps`, or 0 for an empty rollout.
    pub mean: f64,
    /// Smallest per-step reward.
    pub min: f64,
    /// Largest per-step reward.
    pub max: f64,
    /// Reward of the final step.
    pub last: f64,
}

impl RewardSummary {
    /// Summarize `rewards`. An empty slice yields all zeros.
    pub fn from_rewards(rewards: &[f64]) -> Self {
        let Some(&last) = rewards.last() else {
            return Self::default();
        };
        let total: f64 = rewards.iter().sum();
        Self {
            steps: rewards.len(),
            total,
            mean: total / rewards.len() as f64,
            min: rewards.iter().copied().fold(f64::INFINITY, f64::min),
            max: rewards.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_zero() {
        assert_eq!(RewardSummary::from_rewards(&[]), RewardSummary::default());
    }

    #[test]
    fn summarizes_sequence() {
        let s = RewardSummary::from_rewards(&[0.5, 0.25, 1.0, 0.25]);
        assert_eq!(s.steps, 4);
        assert_eq!(s.total, 2.0);
        assert_eq!(s.mean, 0.5);
        assert_eq!(s.min, 0.25);
        assert_eq!(s.max, 1.0);
        assert_eq!(s.last, 0.25);
    }
}
