//! Rule-based screening demo: ranks a small applicant pool without any
//! model call. Run with `cargo run --example screen_pool`.

use engine::{screen_all, Candidate, Job};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let job = Job {
        title: "Senior Accountant".to_string(),
        requirements: vec![
            "5+ years experience".to_string(),
            "CPA".to_string(),
            "NetSuite".to_string(),
        ],
        education: Some("Bachelor's degree in Accounting".to_string()),
        ..Default::default()
    };

    let candidates = vec![
        Candidate {
            name: "Avery".to_string(),
            email: "avery@example.com".to_string(),
            resume_text: "CPA with 7 years experience. NetSuite admin. B.S. in Accounting, 2014-2016 controller at Widgets.".to_string(),
        },
        Candidate {
            name: "Blake".to_string(),
            email: "blake@example.com".to_string(),
            resume_text: "Bookkeeper, QuickBooks, 3 years experience.".to_string(),
        },
    ];

    let (results, summary) = screen_all(&job, &candidates);

    for result in &results {
        println!(
            "{:<8} {:>3}  {}  (keywords {:.1}, experience {:.1}, education {:.1})",
            result.name,
            result.score,
            result.recommendation,
            result.breakdown.required_keywords,
            result.breakdown.experience_years,
            result.breakdown.education_match,
        );
    }
    println!(
        "{} screened: {} advance, {} phone screen, {} declined",
        summary.total_candidates,
        summary.advance_to_interview,
        summary.phone_screen,
        summary.declined
    );
}
