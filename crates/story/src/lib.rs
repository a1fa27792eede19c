//! Story engine for exercising the ComandaLivre API end-to-end.
//!
//! A *story* is an ordered pipeline of dependent steps run against a live
//! deployment. Steps share a mutable [`Context`], act through injected
//! collaborators ([`StoryEnv`]), and return a tri-state [`Outcome`]; the
//! runner records results in order and halts at the first failure.
//!
//! Module map:
//! - [`context`] — the typed key/value state threaded across steps
//! - [`outcome`] — step outcomes, per-step results, the ordered reporter
//! - [`runner`] — fail-fast sequencing + the startup read-before-write lint
//! - [`actors`] — per-role credential cache and token refresh
//! - [`extract`] — identifier extraction from heterogeneous responses
//! - [`lifecycle`] — the Command state machine and rejection signatures
//! - [`steps`] — the step library (one function per business operation)
//! - [`stories`] — the assembled, named stories

pub mod actors;
pub mod context;
pub mod env;
pub mod extract;
pub mod lifecycle;
pub mod outcome;
pub mod runner;
pub mod steps;
pub mod stories;

pub use actors::{ActorCredential, ActorManager, Role};
pub use context::{Context, Key};
pub use env::StoryEnv;
pub use outcome::{Outcome, Reporter, TestResult};
pub use runner::{lint_steps, run, LintError, Step};
pub use stories::Story;
