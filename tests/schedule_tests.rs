// Penalty schedule loading: external YAML, degradation to fallback,
// tolerant trigger parsing

use std::fs;

use taskguard::penalty::{Jurisdiction, PenaltySchedule, Severity};
use taskguard::taxonomy::ThreatDomain;
use tempfile::TempDir;

const SAMPLE_SCHEDULE: &str = r#"
metadata:
  version: "2026.2"
  last_updated: "2026-08-01"
  legal_review_date: "2026-08-01"
penalties:
  eu_ai_act_art5:
    jurisdiction: EU
    regulation: "EU AI Act"
    article: "Article 5"
    penalty:
      currency: EUR
      min_fine: 20000000
      max_fine: 35000000
    triggers:
      threat_domains: [privacy, biases]
      specific_violations:
        - keyword: "emotion recognition"
        - keyword: "social scoring"
    severity: CRITICAL
  state_privacy_act:
    jurisdiction: US
    regulation: "CCPA"
    article: "§1798.150"
    penalty:
      currency: USD
      min_fine: 100
      max_fine: 750
    triggers:
      threat_domains: [privacy]
      specific_violations:
        - keyword: "personal data"
    severity: LOW
"#;

#[test]
fn loads_external_yaml_schedule() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("penalties.yaml");
    fs::write(&path, SAMPLE_SCHEDULE)?;

    let schedule = PenaltySchedule::load(Some(&path));
    assert!(!schedule.is_fallback());
    assert_eq!(schedule.entries().len(), 2);
    assert_eq!(schedule.metadata().version, "2026.2");

    let art5 = schedule
        .entries()
        .iter()
        .find(|e| e.id == "eu_ai_act_art5")
        .unwrap();
    assert_eq!(art5.entry.jurisdiction, Jurisdiction::Eu);
    assert_eq!(art5.entry.severity, Severity::Critical);
    assert_eq!(art5.entry.penalty.max_fine, 35_000_000.0);
    assert_eq!(
        art5.domains,
        vec![ThreatDomain::Privacy, ThreatDomain::Biases]
    );
    Ok(())
}

#[test]
fn missing_file_degrades_to_fallback() {
    let dir = TempDir::new().unwrap();
    let schedule = PenaltySchedule::load(Some(&dir.path().join("absent.yaml")));
    assert!(schedule.is_fallback());
    assert!(!schedule.entries().is_empty());
}

#[test]
fn unparseable_yaml_degrades_to_fallback() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("penalties.yaml");
    fs::write(&path, "penalties: [not, a, map").unwrap();

    let schedule = PenaltySchedule::load(Some(&path));
    assert!(schedule.is_fallback());
}

#[test]
fn unknown_trigger_domain_is_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("penalties.yaml");
    let doc = SAMPLE_SCHEDULE.replace(
        "threat_domains: [privacy, biases]",
        "threat_domains: [privacy, quantum_risk]",
    );
    fs::write(&path, doc).unwrap();

    let schedule = PenaltySchedule::load(Some(&path));
    assert!(!schedule.is_fallback());
    let art5 = schedule
        .entries()
        .iter()
        .find(|e| e.id == "eu_ai_act_art5")
        .unwrap();
    // The unknown domain is dropped; the known one still triggers.
    assert_eq!(art5.domains, vec![ThreatDomain::Privacy]);
}

#[test]
fn stale_legal_review_still_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("penalties.yaml");
    let doc = SAMPLE_SCHEDULE.replace("legal_review_date: \"2026-08-01\"", "legal_review_date: \"2020-01-01\"");
    fs::write(&path, doc).unwrap();

    // Staleness is a warning, never an error.
    let schedule = PenaltySchedule::load(Some(&path));
    assert!(!schedule.is_fallback());
    assert_eq!(schedule.entries().len(), 2);
}

#[test]
fn fallback_covers_the_highest_severity_triggers() {
    let schedule = PenaltySchedule::embedded_fallback();
    let ids: Vec<&str> = schedule.entries().iter().map(|e| e.id.as_str()).collect();
    assert!(ids.contains(&"eu_ai_act_prohibited_practices"));
    assert!(ids.contains(&"gdpr_unlawful_pii_processing"));
    assert!(ids.contains(&"ecoa_proxy_discrimination"));
    assert!(schedule
        .entries()
        .iter()
        .any(|e| e.entry.severity == Severity::Critical));
}
