//! Summary of a completed run

use super::UpdateResult;
use serde::Serialize;

/// All results of a run, in arrival order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    /// Number of dependencies dispatched
    pub total: usize,
    /// One result per dependency, in completion order
    pub results: Vec<UpdateResult>,
}

impl CheckSummary {
    /// Creates an empty summary for `total` dependencies
    pub fn new(total: usize) -> Self {
        Self {
            total,
            results: Vec::with_capacity(total),
        }
    }

    /// Records a result
    pub fn push(&mut self, result: UpdateResult) {
        self.results.push(result);
    }

    /// Number of results received so far
    pub fn completed(&self) -> usize {
        self.results.len()
    }

    /// Returns true once every dependency produced a result
    pub fn is_complete(&self) -> bool {
        self.results.len() == self.total
    }

    /// Results with a newer version available
    pub fn updatable(&self) -> impl Iterator<Item = &UpdateResult> {
        self.results.iter().filter(|r| r.updatable)
    }

    /// Results without an update
    pub fn skipped(&self) -> impl Iterator<Item = &UpdateResult> {
        self.results.iter().filter(|r| !r.updatable)
    }

    /// Number of updatable dependencies
    pub fn update_count(&self) -> usize {
        self.updatable().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dependency, SkipReason};

    #[test]
    fn test_summary_counts() {
        let a = Dependency::new("a", "1.0.0");
        let b = Dependency::new("b", "1.0.0");

        let mut summary = CheckSummary::new(2);
        assert!(!summary.is_complete());

        summary.push(UpdateResult::update(&a, "1.1.0"));
        summary.push(UpdateResult::skip(&b, None, SkipReason::NoVersionTags));

        assert!(summary.is_complete());
        assert_eq!(summary.completed(), 2);
        assert_eq!(summary.update_count(), 1);
        assert_eq!(summary.skipped().count(), 1);
        assert_eq!(summary.updatable().next().unwrap().name, "a");
    }

    #[test]
    fn test_empty_summary_is_complete() {
        let summary = CheckSummary::new(0);
        assert!(summary.is_complete());
        assert_eq!(summary.update_count(), 0);
    }
}
