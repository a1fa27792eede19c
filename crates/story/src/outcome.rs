//! Step outcomes and the ordered result log.

/// Tri-state result of one step.
///
/// `Skipped` marks a recoverable missing-precondition condition (a chained
/// read with nothing to chain from); the runner proceeds past it. Only
/// `Failure` halts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Failure(String),
    Skipped(String),
}

impl Outcome {
    pub fn success(detail: impl Into<String>) -> Self {
        Outcome::Success(detail.into())
    }

    pub fn failure(detail: impl Into<String>) -> Self {
        Outcome::Failure(detail.into())
    }

    pub fn skipped(detail: impl Into<String>) -> Self {
        Outcome::Skipped(detail.into())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    pub fn detail(&self) -> &str {
        match self {
            Outcome::Success(d) | Outcome::Failure(d) | Outcome::Skipped(d) => d,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "ok",
            Outcome::Failure(_) => "failed",
            Outcome::Skipped(_) => "skipped",
        }
    }
}

/// One executed step's record: the run's audit trail is the ordered
/// sequence of these.
#[derive(Debug, Clone)]
pub struct TestResult {
    pub description: String,
    pub outcome: Outcome,
}

/// Append-only, ordered result store. Summarization and rendering are a
/// presentation concern and live with the CLI.
#[derive(Debug, Default)]
pub struct Reporter {
    results: Vec<TestResult>,
}

impl Reporter {
    pub fn new() -> Self {
        Reporter::default()
    }

    pub fn record(&mut self, result: TestResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<TestResult> {
        self.results
    }

    pub fn failure_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome.is_failure())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reporter_preserves_insertion_order() {
        let mut reporter = Reporter::new();
        reporter.record(TestResult {
            description: "first".into(),
            outcome: Outcome::success("a"),
        });
        reporter.record(TestResult {
            description: "second".into(),
            outcome: Outcome::failure("b"),
        });
        let descriptions: Vec<_> = reporter
            .results()
            .iter()
            .map(|r| r.description.as_str())
            .collect();
        assert_eq!(descriptions, ["first", "second"]);
        assert_eq!(reporter.failure_count(), 1);
    }
}
