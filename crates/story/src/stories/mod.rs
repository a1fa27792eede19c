//! Named stories: ordered step pipelines ready to run.

pub mod login;
pub mod onboarding;
pub mod public_routes;

use crate::env::StoryEnv;
use crate::outcome::TestResult;
use crate::runner::{self, lint_steps, LintError, Step};

/// One runnable story: a stable name for CLI selection, a human title,
/// and the ordered steps.
pub struct Story {
    pub name: &'static str,
    pub title: &'static str,
    pub steps: &'static [Step],
}

impl Story {
    /// Lint the pipeline, then run it fail-fast. The lint rejects the
    /// step list before any network call when a step reads a context key
    /// no earlier step writes.
    pub fn execute(&self, env: &mut StoryEnv) -> Result<Vec<TestResult>, LintError> {
        lint_steps(self.steps)?;
        tracing::info!(story = self.name, steps = self.steps.len(), "starting story");
        Ok(runner::run(env, self.steps))
    }
}

static REGISTRY: [Story; 3] = [
    Story {
        name: "restaurant_onboarding",
        title: "Full Restaurant Onboarding and Operation",
        steps: onboarding::STEPS,
    },
    Story {
        name: "public_routes",
        title: "Public Routes Accessibility and Chained Logic",
        steps: public_routes::STEPS,
    },
    Story {
        name: "keycloak_login",
        title: "Keycloak Direct Grant Authentication",
        steps: login::STEPS,
    },
];

pub fn all() -> &'static [Story] {
    &REGISTRY
}

pub fn find(name: &str) -> Option<&'static Story> {
    REGISTRY.iter().find(|story| story.name == name)
}
