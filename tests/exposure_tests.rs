// Trigger matching, jurisdiction stacking rules, and the executive summary

use taskguard::classify::ThreatClassifier;
use taskguard::penalty::{Jurisdiction, PenaltySchedule, Severity, TotalExposure};

fn classify(text: &str) -> taskguard::ThreatClassification {
    ThreatClassifier::builtin()
        .expect("builtin taxonomy should build")
        .classify(&[], Some(text), None)
}

#[test]
fn penalty_requires_domain_and_keyword() {
    let schedule = PenaltySchedule::embedded_fallback();

    // Privacy domain detected but without any EU AI Act trigger keyword:
    // Article 5 must not match.
    let classification = classify("facial recognition at the building entrance");
    let matches = schedule.applicable_penalties(&classification);
    assert!(!matches.iter().any(|m| m.id == "eu_ai_act_prohibited_practices"));
}

#[test]
fn fallback_only_classification_matches_nothing() {
    let schedule = PenaltySchedule::embedded_fallback();
    let classification = classify("publish the sprint retrospective");
    assert!(classification.is_fallback());
    assert!(schedule.applicable_penalties(&classification).is_empty());
}

#[test]
fn matches_sort_critical_first_then_by_max_fine() {
    let schedule = PenaltySchedule::embedded_fallback();
    // Triggers Article 5 (CRITICAL) and GDPR PII (HIGH).
    let classification = classify("social scoring built on personal data profiles");
    let matches = schedule.applicable_penalties(&classification);
    assert!(matches.len() >= 2);
    assert_eq!(matches[0].severity, Severity::Critical);
    for pair in matches.windows(2) {
        assert!(pair[0].severity <= pair[1].severity);
        if pair[0].severity == pair[1].severity {
            assert!(pair[0].max_fine >= pair[1].max_fine);
        }
    }
}

#[test]
fn eu_penalties_do_not_stack() {
    let schedule = PenaltySchedule::embedded_fallback();
    let classification = classify("social scoring built on personal data profiles");
    let matches = schedule.applicable_penalties(&classification);

    let eu: Vec<_> = matches
        .iter()
        .filter(|m| m.jurisdiction == Jurisdiction::Eu)
        .collect();
    assert!(eu.len() >= 2, "scenario must trigger at least two EU entries");

    let exposure = schedule.total_exposure(&matches);
    // The most severe single entry, never the sum.
    assert_eq!(exposure.total_min_eur, 20_000_000.0);
    assert_eq!(exposure.total_max_eur, 35_000_000.0);
}

#[test]
fn us_penalties_stack_additively() {
    let schedule = PenaltySchedule::embedded_fallback();
    // "zip code" satisfies both ECOA and Fair Housing Act triggers.
    let classification = classify("deny applications sorted by zip code");
    let matches = schedule.applicable_penalties(&classification);

    let us: Vec<_> = matches
        .iter()
        .filter(|m| m.jurisdiction == Jurisdiction::Us)
        .collect();
    assert_eq!(us.len(), 2);

    let exposure = schedule.total_exposure(&matches);
    assert_eq!(exposure.total_min_usd, 10_000.0 + 16_000.0);
    assert_eq!(exposure.total_max_usd, 500_000.0 + 105_000.0);
    assert!(exposure.stacking_applied);
}

#[test]
fn single_us_match_does_not_set_stacking_flag() {
    let schedule = PenaltySchedule::embedded_fallback();
    // "disparate impact" triggers ECOA but not Fair Housing.
    let classification = classify("model shows disparate impact in screening");
    let matches = schedule.applicable_penalties(&classification);

    let us_count = matches
        .iter()
        .filter(|m| m.jurisdiction == Jurisdiction::Us)
        .count();
    assert_eq!(us_count, 1);
    assert!(!schedule.total_exposure(&matches).stacking_applied);
}

#[test]
fn critical_summary_names_terms_and_ranges() {
    let schedule = PenaltySchedule::embedded_fallback();
    let classification = classify("emotion recognition pilot");
    let matches = schedule.applicable_penalties(&classification);
    let exposure = schedule.total_exposure(&matches);
    let summary = schedule.executive_summary(&matches, &exposure);

    assert!(summary.starts_with("CRITICAL REGULATORY EXPOSURE"));
    assert!(summary.contains("emotion recognition"));
    assert!(summary.contains("EUR 20,000,000-35,000,000"));
}

#[test]
fn high_summary_warns() {
    let schedule = PenaltySchedule::embedded_fallback();
    let classification = classify("deny applications sorted by zip code");
    let matches = schedule.applicable_penalties(&classification);
    let exposure = schedule.total_exposure(&matches);
    let summary = schedule.executive_summary(&matches, &exposure);

    assert!(summary.starts_with("WARNING"));
    assert!(summary.contains("USD"));
}

#[test]
fn summary_never_panics_on_zeroed_exposure() {
    let schedule = PenaltySchedule::embedded_fallback();
    let classification = classify("emotion recognition pilot");
    let matches = schedule.applicable_penalties(&classification);
    let summary = schedule.executive_summary(&matches, &TotalExposure::default());
    assert!(summary.contains("none quantified"));
}
