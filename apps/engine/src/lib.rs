//! Candidate evaluation engine.
//!
//! Two complementary scoring paths over the same `Job`/`Candidate` inputs:
//!
//! - [`screening`]: deterministic rule-based scoring (keyword overlap,
//!   experience, education), free and instant, for ranking whole pools.
//! - [`evaluation`]: AI-assisted scoring that sends a structured prompt to a
//!   pluggable [`providers::Provider`] backend and parses the free-text
//!   reply against the A-T-Q rubric (Accomplishments 50%, Trajectory 30%,
//!   Qualifications 20%) into a well-typed, bounded [`models::Evaluation`].
//!
//! The engine performs no persistence and no HTTP routing of its own;
//! hosting code passes plain data in and gets plain results back.

pub mod config;
pub mod errors;
pub mod evaluation;
pub mod models;
pub mod providers;
pub mod screening;

pub use config::EngineConfig;
pub use errors::EngineError;
pub use evaluation::{BatchOutcome, Evaluator};
pub use models::{
    Candidate, Evaluation, EvaluationReport, Job, MatchStatus, RequirementMatch, Usage,
};
pub use providers::{
    build_provider, provider_catalog, Provider, ProviderError, ProviderResponse,
};
pub use screening::{screen_all, screen_candidate, ScreeningResult, ScreeningSummary};
