// tests/evaluate_scenarios.rs
//
// End-to-end scoring scenarios through the public `Evaluator`, offline.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;

use credibility_assistant::factcheck::{FactCheckCorrelator, GoogleFactCheckClient};
use credibility_assistant::prompts::is_known_prompt;
use credibility_assistant::{EvaluateOptions, Evaluator, ReasonType, ReferenceLists, Status};

fn lists() -> Arc<ReferenceLists> {
    Arc::new(ReferenceLists::default_seed())
}

fn as_of(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn offline_opts() -> EvaluateOptions {
    EvaluateOptions {
        skip_fact_check: true,
        as_of: Some(as_of(2025, 3, 10)),
        ..Default::default()
    }
}

#[tokio::test]
async fn trusted_fresh_well_sourced_is_reliable() {
    let text = "https://www.reuters.com/world/health-report Published March 8, 2025. According to the World Health Organization, vaccination coverage rose to 84% last year. The findings were published in the journal Vaccine, and a spokesperson for the agency told reporters that \"coverage gains were broad across regions,\" the organization said in a statement.";
    let r = Evaluator::offline(lists())
        .evaluate_with_rng(text, offline_opts(), &mut StdRng::seed_from_u64(11))
        .await
        .unwrap();
    let b = &r.analysis_breakdown;

    assert_eq!(b.domain.detail.detected.as_deref(), Some("reuters.com"));
    assert_eq!(b.domain.score, 30);
    assert_eq!(b.emotional.score, 25);
    assert_eq!(b.sensationalism.score, 20);
    assert_eq!(b.evidence.score, 25);
    assert_eq!(b.temporal.score, 5);
    assert_eq!(b.temporal.detail.age_in_days, Some(3));
    assert_eq!(b.raw_total, 105);
    assert_eq!(r.score, 100);
    assert_eq!(r.status, Status::Reliable);
    assert_eq!(r.status_label, "Likely Reliable");
    assert!(r.summary.contains("trusted source"));
    // Trusted, calm and well sourced: only the general pool applies.
    assert_eq!(r.thinking_prompts.len(), 1);
    assert!(r.reasons.iter().all(|x| x.kind == ReasonType::Positive));
}

#[tokio::test]
async fn shouting_text_scores_zero_sensationalism() {
    let text = "THIS IS THE BIGGEST STORY EVER TOLD!!!!!!!!";
    let r = Evaluator::offline(lists())
        .evaluate_with_rng(text, offline_opts(), &mut StdRng::seed_from_u64(2))
        .await
        .unwrap();
    let s = &r.analysis_breakdown.sensationalism;
    assert_eq!(s.score, 0);
    assert_eq!(s.reason.as_ref().unwrap().kind, ReasonType::Negative);
    assert!(r.score <= 100 && r.score >= 0);
    // Negative reasons lead.
    assert_eq!(r.reasons[0].kind, ReasonType::Negative);
}

#[tokio::test]
async fn missing_fact_check_key_still_completes_with_links() {
    let client =
        GoogleFactCheckClient::with_base_url(None, "http://127.0.0.1:9/claims:search", Duration::from_millis(200))
            .unwrap();
    let evaluator = Evaluator::new(lists(), FactCheckCorrelator::with_service(Arc::new(client)));
    let text = "Officials said that the new reservoir will supply water to every district by summer.";
    let r = evaluator
        .evaluate(
            text,
            EvaluateOptions {
                as_of: Some(as_of(2025, 3, 10)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let fc = &r.analysis_breakdown.fact_check;
    assert_eq!(fc.score, 0);
    assert!(!fc.detail.has_api_key);
    assert_eq!(fc.detail.queries_attempted, 0);
    assert_eq!(fc.detail.search_urls.len(), 6);
    assert_eq!(fc.reason.as_ref().unwrap().title, "No Direct Fact-Checks Found");
}

#[tokio::test]
async fn same_seed_gives_identical_reports() {
    let text = "Experts say the miracle supplement is shocking doctors everywhere. You won't believe what happens next!";
    let e = Evaluator::offline(lists());
    let a = e
        .evaluate_with_rng(text, offline_opts(), &mut StdRng::seed_from_u64(99))
        .await
        .unwrap();
    let b = e
        .evaluate_with_rng(text, offline_opts(), &mut StdRng::seed_from_u64(99))
        .await
        .unwrap();
    assert_eq!(a, b);
    assert!(a.thinking_prompts.iter().all(|p| is_known_prompt(p)));
    assert!(a.thinking_prompts.len() <= 4);
}

#[tokio::test]
async fn date_hint_replaces_text_dates() {
    let text = "Back in 2012 the harbour authority first proposed the new ferry terminal for the island.";
    let opts = EvaluateOptions {
        published_date_hint: Some("2025-03-09T08:30:00Z".to_string()),
        ..offline_opts()
    };
    let r = Evaluator::offline(lists()).evaluate(text, opts).await.unwrap();
    let t = &r.analysis_breakdown.temporal;
    assert!(t.detail.used_hint);
    assert_eq!(t.score, 5);
    assert!(!t.detail.is_very_old);
}

#[tokio::test]
async fn score_is_always_clamped() {
    let samples = [
        "SHOCKING!!! BOMBSHELL EXPOSED!!! You won't believe the TRUTH they don't want you to know!!! Share before deleted!!!",
        "Visit worldnewsdailyreport.com for the shocking secret doctors hate, published in 2001.",
        "The library will open at nine on weekdays and at ten on weekends starting next month.",
    ];
    let e = Evaluator::offline(lists());
    for text in samples {
        let r = e.evaluate(text, offline_opts()).await.unwrap();
        assert!((0..=100).contains(&r.score), "{text}");
        assert_eq!(r.score, r.analysis_breakdown.raw_total.clamp(0, 100));
    }
}
