//! AI evaluation demo: one stage-1 screening call against the configured
//! provider. Needs the matching credential in the environment (or a running
//! local Ollama daemon with `EVAL_PROVIDER=ollama`).
//!
//! Run with `cargo run --example ai_evaluate`.

use engine::{Candidate, EngineConfig, Evaluator, Job};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = EngineConfig::from_env()?;
    let evaluator = Evaluator::new(config);

    let job = Job {
        title: "Platform Engineer".to_string(),
        department: "Infrastructure".to_string(),
        location: "Remote (US)".to_string(),
        must_have_requirements: vec![
            "5+ years building distributed systems".to_string(),
            "Production Rust or Go".to_string(),
        ],
        preferred_requirements: vec!["Kubernetes operations".to_string()],
        summary: "Own the job-queue and scheduling layer.".to_string(),
        ..Default::default()
    };

    let candidate = Candidate {
        name: "Sam Rivera".to_string(),
        email: "sam@example.com".to_string(),
        resume_text: "Staff engineer, 8 years experience. Built a sharded \
                      work-queue in Rust handling 40k jobs/min. 2016-2020 at \
                      Datalith, 2020-present at Ferrous."
            .to_string(),
    };

    let report = evaluator.evaluate(&job, &candidate, 1).await?;

    println!("score:          {}", report.evaluation.score);
    println!(
        "a/t/q:          {}/{}/{}",
        report.evaluation.a_score, report.evaluation.t_score, report.evaluation.q_score
    );
    println!("recommendation: {}", report.evaluation.recommendation);
    println!("reasoning:\n{}", report.evaluation.reasoning);
    println!(
        "usage: {} in / {} out tokens, ${:.6} ({} / {})",
        report.usage.input_tokens,
        report.usage.output_tokens,
        report.usage.cost,
        report.usage.provider,
        report.usage.model
    );

    Ok(())
}
