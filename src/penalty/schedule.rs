//! Regulatory penalty schedule: external YAML with an embedded fallback.
//!
//! Loading never fails. A missing, unreadable, or unparseable schedule file
//! degrades to the embedded fallback with a warning, because enforcement
//! must stay usable without external configuration.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::taxonomy::ThreatDomain;

/// Days after `legal_review_date` before a staleness warning is logged.
pub const STALE_REVIEW_DAYS: i64 = 90;

/// Jurisdictions with defined exposure-stacking rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Jurisdiction {
    #[serde(rename = "EU")]
    Eu,
    #[serde(rename = "US")]
    Us,
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Jurisdiction::Eu => write!(f, "EU"),
            Jurisdiction::Us => write!(f, "US"),
        }
    }
}

/// Penalty severity tier. Declaration order is the sort order: CRITICAL
/// compares lowest so ascending sorts put it first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// Schedule file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    pub version: String,
    pub last_updated: String,
    pub legal_review_date: String,
}

/// Fine range for one penalty entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FineSpec {
    pub currency: String,
    pub min_fine: f64,
    pub max_fine: f64,
}

/// One required-keyword trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolationSpec {
    pub keyword: String,
}

/// Trigger predicate: required domains plus required keyword matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerSpec {
    pub threat_domains: Vec<String>,
    pub specific_violations: Vec<ViolationSpec>,
}

/// One penalty entry as it appears in the schedule file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyEntry {
    pub jurisdiction: Jurisdiction,
    pub regulation: String,
    pub article: String,
    pub penalty: FineSpec,
    pub triggers: TriggerSpec,
    pub severity: Severity,
}

/// The schedule file as deserialized. `BTreeMap` keeps iteration order
/// deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDoc {
    pub metadata: ScheduleMetadata,
    pub penalties: BTreeMap<String, PenaltyEntry>,
}

/// A schedule entry with its trigger domains resolved to taxonomy values.
#[derive(Debug, Clone)]
pub struct ScheduleEntry {
    pub id: String,
    pub entry: PenaltyEntry,
    /// Resolved required domains. Unknown domain strings were skipped at
    /// load time and logged as configuration defects.
    pub domains: Vec<ThreatDomain>,
}

/// The loaded, read-only penalty schedule.
///
/// Built once and never mutated; a hot-reload constructs a new schedule
/// and swaps the reference, so in-flight calls keep a consistent view.
#[derive(Debug, Clone)]
pub struct PenaltySchedule {
    metadata: ScheduleMetadata,
    entries: Vec<ScheduleEntry>,
    fallback: bool,
}

impl PenaltySchedule {
    /// Load a schedule from the given path, degrading to the embedded
    /// fallback on any failure. Never returns an error.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            info!("no penalty schedule configured; using embedded fallback");
            return Self::embedded_fallback();
        };

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %path.display(), %err, "cannot read penalty schedule; using embedded fallback");
                return Self::embedded_fallback();
            }
        };

        let doc: ScheduleDoc = match serde_yaml::from_str(&content) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(path = %path.display(), %err, "cannot parse penalty schedule; using embedded fallback");
                return Self::embedded_fallback();
            }
        };

        check_review_staleness(&doc.metadata);
        info!(path = %path.display(), entries = doc.penalties.len(), "loaded penalty schedule");
        Self::from_doc(doc, false)
    }

    /// Build a schedule directly from a deserialized document.
    pub fn from_doc(doc: ScheduleDoc, fallback: bool) -> Self {
        let mut entries = Vec::with_capacity(doc.penalties.len());
        for (id, entry) in doc.penalties {
            let mut domains = Vec::new();
            for name in &entry.triggers.threat_domains {
                match ThreatDomain::parse(name) {
                    Some(domain) => domains.push(domain),
                    // Configuration defect, not a crash: the entry stays
                    // loaded minus the unknown domain.
                    None => warn!(
                        entry = %id,
                        domain = %name,
                        "unknown threat domain in penalty trigger; skipping"
                    ),
                }
            }
            entries.push(ScheduleEntry { id, entry, domains });
        }
        Self {
            metadata: doc.metadata,
            entries,
            fallback,
        }
    }

    /// The embedded fallback: the highest-severity, highest-confidence
    /// triggers, available even with no external configuration.
    pub fn embedded_fallback() -> Self {
        Self::from_doc(fallback_doc(), true)
    }

    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// True when this schedule is the embedded fallback.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

/// Warn when the schedule's legal review is older than [`STALE_REVIEW_DAYS`].
/// Non-fatal in every case; an unparseable date also only warns.
fn check_review_staleness(metadata: &ScheduleMetadata) {
    match NaiveDate::parse_from_str(&metadata.legal_review_date, "%Y-%m-%d") {
        Ok(reviewed) => {
            let age = (Utc::now().date_naive() - reviewed).num_days();
            if age > STALE_REVIEW_DAYS {
                warn!(
                    legal_review_date = %metadata.legal_review_date,
                    age_days = age,
                    "penalty schedule legal review is stale"
                );
            }
        }
        Err(err) => {
            warn!(
                legal_review_date = %metadata.legal_review_date,
                %err,
                "cannot parse legal_review_date"
            );
        }
    }
}

fn fallback_entry(
    jurisdiction: Jurisdiction,
    regulation: &str,
    article: &str,
    currency: &str,
    min_fine: f64,
    max_fine: f64,
    domains: &[&str],
    keywords: &[&str],
    severity: Severity,
) -> PenaltyEntry {
    PenaltyEntry {
        jurisdiction,
        regulation: regulation.to_string(),
        article: article.to_string(),
        penalty: FineSpec {
            currency: currency.to_string(),
            min_fine,
            max_fine,
        },
        triggers: TriggerSpec {
            threat_domains: domains.iter().map(|d| d.to_string()).collect(),
            specific_violations: keywords
                .iter()
                .map(|k| ViolationSpec {
                    keyword: k.to_string(),
                })
                .collect(),
        },
        severity,
    }
}

fn fallback_doc() -> ScheduleDoc {
    let mut penalties = BTreeMap::new();
    penalties.insert(
        "eu_ai_act_prohibited_practices".to_string(),
        fallback_entry(
            Jurisdiction::Eu,
            "EU AI Act",
            "Article 5",
            "EUR",
            20_000_000.0,
            35_000_000.0,
            &["privacy", "biases", "misuse"],
            &[
                "emotion recognition",
                "social scoring",
                "biometric categorization",
                "predictive policing",
            ],
            Severity::Critical,
        ),
    );
    penalties.insert(
        "gdpr_unlawful_pii_processing".to_string(),
        fallback_entry(
            Jurisdiction::Eu,
            "GDPR",
            "Article 83(5)",
            "EUR",
            10_000_000.0,
            20_000_000.0,
            &["privacy"],
            &[
                "personal data",
                "pii",
                "biometric",
                "health record",
                "social security number",
            ],
            Severity::High,
        ),
    );
    penalties.insert(
        "gdpr_security_of_processing".to_string(),
        fallback_entry(
            Jurisdiction::Eu,
            "GDPR",
            "Article 32",
            "EUR",
            5_000_000.0,
            10_000_000.0,
            &["misuse", "privacy"],
            &["private key", "credential", "api key", "password", "token"],
            Severity::High,
        ),
    );
    penalties.insert(
        "ecoa_proxy_discrimination".to_string(),
        fallback_entry(
            Jurisdiction::Us,
            "ECOA",
            "15 U.S.C. §1691",
            "USD",
            10_000.0,
            500_000.0,
            &["biases"],
            &[
                "zip code",
                "proxy",
                "redlining",
                "protected class",
                "disparate impact",
            ],
            Severity::High,
        ),
    );
    penalties.insert(
        "fair_housing_act".to_string(),
        fallback_entry(
            Jurisdiction::Us,
            "Fair Housing Act",
            "42 U.S.C. §3604",
            "USD",
            16_000.0,
            105_000.0,
            &["biases"],
            &["redlining", "zip code", "housing", "neighborhood"],
            Severity::High,
        ),
    );
    penalties.insert(
        "ftc_act_deceptive_practices".to_string(),
        fallback_entry(
            Jurisdiction::Us,
            "FTC Act",
            "Section 5",
            "USD",
            0.0,
            50_120.0,
            &["misinformation", "unreliable_outputs"],
            &["deepfake", "undisclosed", "synthetic media", "fabricated"],
            Severity::Medium,
        ),
    );

    ScheduleDoc {
        metadata: ScheduleMetadata {
            version: "builtin-2025.1".to_string(),
            last_updated: "2025-06-01".to_string(),
            legal_review_date: "2025-06-01".to_string(),
        },
        penalties,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_schedule_has_six_entries() {
        let schedule = PenaltySchedule::embedded_fallback();
        assert!(schedule.is_fallback());
        assert_eq!(schedule.entries().len(), 6);
    }

    #[test]
    fn fallback_entries_resolve_all_domains() {
        let schedule = PenaltySchedule::embedded_fallback();
        for entry in schedule.entries() {
            assert!(!entry.domains.is_empty(), "entry {} lost its domains", entry.id);
            assert_eq!(entry.domains.len(), entry.entry.triggers.threat_domains.len());
        }
    }

    #[test]
    fn missing_path_uses_fallback() {
        let schedule = PenaltySchedule::load(Some(Path::new("/nonexistent/penalties.yaml")));
        assert!(schedule.is_fallback());
    }

    #[test]
    fn no_path_uses_fallback() {
        let schedule = PenaltySchedule::load(None);
        assert!(schedule.is_fallback());
    }

    #[test]
    fn severity_sorts_critical_first() {
        let mut tiers = vec![Severity::Low, Severity::Critical, Severity::Medium, Severity::High];
        tiers.sort();
        assert_eq!(
            tiers,
            vec![Severity::Critical, Severity::High, Severity::Medium, Severity::Low]
        );
    }
}
