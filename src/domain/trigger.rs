// ============================================================
// Layer 3 — Evaluation Trigger
// ============================================================
// Decides when the training loop stops to evaluate on the
// validation split. Counters are 1-based: with interval 2 the
// trigger fires after epoch (or iteration) 2, 4, 6, ...

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Epoch,
    Iter,
}

/// A trigger unit paired with its interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalSchedule {
    pub trigger:  Trigger,
    pub interval: usize,
}

impl EvalSchedule {
    pub fn new(trigger: Trigger, interval: usize) -> Self {
        Self { trigger, interval }
    }

    /// True when evaluation should run after finishing `epoch`.
    pub fn after_epoch(&self, epoch: usize) -> bool {
        self.trigger == Trigger::Epoch && self.fires(epoch)
    }

    /// True when evaluation should run after optimizer step `iteration`.
    pub fn after_iteration(&self, iteration: usize) -> bool {
        self.trigger == Trigger::Iter && self.fires(iteration)
    }

    fn fires(&self, counter: usize) -> bool {
        self.interval > 0 && counter > 0 && counter % self.interval == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_schedule() {
        let s = EvalSchedule::new(Trigger::Epoch, 2);
        let fired: Vec<usize> = (1..=6).filter(|&e| s.after_epoch(e)).collect();
        assert_eq!(fired, vec![2, 4, 6]);
        // Iteration counters never fire an epoch schedule
        assert!(!s.after_iteration(2));
    }

    #[test]
    fn test_iteration_schedule() {
        let s = EvalSchedule::new(Trigger::Iter, 3);
        assert!(s.after_iteration(3));
        assert!(!s.after_iteration(4));
        assert!(!s.after_epoch(3));
    }

    #[test]
    fn test_zero_interval_never_fires() {
        let s = EvalSchedule::new(Trigger::Epoch, 0);
        assert!(!(1..10).any(|e| s.after_epoch(e)));
    }
}
