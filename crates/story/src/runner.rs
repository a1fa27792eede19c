//! Fail-fast step sequencing.
//!
//! The runner is pure control flow: it performs no network I/O, retries
//! nothing, and never invokes a step twice. Steps after the first failure
//! are implicitly skipped and do not appear in the result sequence.
//!
//! Each step declares the context keys it reads and writes;
//! [`lint_steps`] verifies before the first call that no step reads a key
//! absent from every earlier step's writes, so ordering mistakes surface
//! at startup instead of mid-run against a live system.

use std::collections::BTreeSet;

use crate::context::Key;
use crate::env::StoryEnv;
use crate::outcome::{Outcome, Reporter, TestResult};

/// One named unit of work: a description, the declared context
/// dependencies, and the executable body.
pub struct Step {
    pub description: &'static str,
    pub reads: &'static [Key],
    pub writes: &'static [Key],
    pub run: fn(&mut StoryEnv) -> Outcome,
}

/// A step list whose declared reads precede any write of that key.
#[derive(Debug, thiserror::Error)]
#[error("step {index} (\"{description}\") reads key '{key}' which no earlier step writes")]
pub struct LintError {
    pub index: usize,
    pub description: &'static str,
    pub key: &'static str,
}

pub fn lint_steps(steps: &[Step]) -> Result<(), LintError> {
    let mut written: BTreeSet<&'static str> = BTreeSet::new();
    for (index, step) in steps.iter().enumerate() {
        for key in step.reads {
            if !written.contains(key.0) {
                return Err(LintError {
                    index,
                    description: step.description,
                    key: key.0,
                });
            }
        }
        for key in step.writes {
            written.insert(key.0);
        }
    }
    Ok(())
}

/// Run the steps in order against a shared env, stopping at the first
/// failure. The returned sequence holds every executed step up to and
/// including the failing one.
pub fn run(env: &mut StoryEnv, steps: &[Step]) -> Vec<TestResult> {
    let mut reporter = Reporter::new();
    for step in steps {
        let outcome = (step.run)(env);
        match &outcome {
            Outcome::Success(detail) => {
                tracing::info!(step = step.description, detail = %detail, "step passed");
            }
            Outcome::Skipped(detail) => {
                tracing::warn!(step = step.description, detail = %detail, "step skipped");
            }
            Outcome::Failure(detail) => {
                tracing::error!(step = step.description, detail = %detail, "step failed");
            }
        }
        let failed = outcome.is_failure();
        reporter.record(TestResult {
            description: step.description.to_string(),
            outcome,
        });
        if failed {
            break;
        }
    }
    reporter.into_results()
}
