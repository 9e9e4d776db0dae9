pub mod candidate;
pub mod evaluation;
pub mod job;

pub use candidate::Candidate;
pub use evaluation::{
    Evaluation, EvaluationReport, MatchStatus, RequirementMatch, Usage,
};
pub use job::Job;
