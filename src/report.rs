use crate::checks::{CheckKind, CheckResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    AllPassed,
    Partial,
    AllFailed,
}

/// Ordered results of one run. Checks skipped by a short-circuit are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestReport {
    results: Vec<CheckResult>,
}

impl TestReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn get(&self, kind: CheckKind) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.kind == kind)
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn all_passed(&self) -> bool {
        self.verdict() == Verdict::AllPassed
    }

    pub fn verdict(&self) -> Verdict {
        match self.passed() {
            p if p == self.total() && p > 0 => Verdict::AllPassed,
            0 => Verdict::AllFailed,
            _ => Verdict::Partial,
        }
    }

    /// 0 when every attempted check passed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::FailureKind;

    fn pass(kind: CheckKind) -> CheckResult {
        CheckResult::pass(kind, "ok")
    }

    fn fail(kind: CheckKind) -> CheckResult {
        CheckResult::fail(kind, FailureKind::Unexpected, "bad")
    }

    #[test]
    fn test_all_passed() {
        let mut report = TestReport::new();
        for kind in CheckKind::ALL {
            report.push(pass(kind));
        }
        assert_eq!(report.passed(), 4);
        assert_eq!(report.total(), 4);
        assert_eq!(report.verdict(), Verdict::AllPassed);
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_partial() {
        let mut report = TestReport::new();
        report.push(pass(CheckKind::Format));
        report.push(fail(CheckKind::Connectivity));
        assert_eq!(report.verdict(), Verdict::Partial);
        assert_eq!(report.exit_code(), 1);
        assert!(report.get(CheckKind::Connectivity).is_some());
        assert!(report.get(CheckKind::Completion).is_none());
    }

    #[test]
    fn test_all_failed_and_empty() {
        let mut report = TestReport::new();
        report.push(fail(CheckKind::Format));
        assert_eq!(report.verdict(), Verdict::AllFailed);

        let empty = TestReport::new();
        assert_eq!(empty.verdict(), Verdict::AllFailed);
        assert_eq!(empty.exit_code(), 1);
    }
}
