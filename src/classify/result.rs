//! Classification result types.
//!
//! Everything here is an immutable value: created once per `classify` call,
//! serializable for the audit trail, and free of any time-dependent field so
//! identical input always produces byte-identical output.

use serde::{Deserialize, Serialize};

use crate::taxonomy::{LossCategory, SubThreat, ThreatDomain};

/// A single piece of matching evidence inside one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    /// A weighted keyword found in the task text.
    Keyword { term: String, weight: f64 },
    /// A structural pattern signal (regex) that fired.
    Pattern { name: String, weight: f64 },
    /// No keyword matched; the misuse statistical prior was applied.
    StatisticalFallback,
}

impl Evidence {
    /// The matchable term this evidence contributes to penalty triggers.
    /// The fallback marker carries none, so fallback-only classifications
    /// can never trigger a penalty.
    pub fn term(&self) -> Option<&str> {
        match self {
            Evidence::Keyword { term, .. } => Some(term),
            Evidence::Pattern { name, .. } => Some(name),
            Evidence::StatisticalFallback => None,
        }
    }
}

/// Per-domain match detail: what matched and how confident the domain is,
/// before and after the prevalence multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainFinding {
    pub domain: ThreatDomain,
    pub evidence: Vec<Evidence>,
    /// Saturated confidence in [0,1] before the prevalence multiplier.
    pub raw_confidence: f64,
    /// Confidence after the prevalence multiplier, re-capped at 1.0.
    pub weighted_confidence: f64,
}

/// The weighted threat profile of one piece of task text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatClassification {
    /// Detected domains in priority order, each with its evidence.
    pub findings: Vec<DomainFinding>,
    /// Domain with the highest weighted confidence, ties broken by
    /// priority order. `None` only for empty input.
    pub primary_threat: Option<ThreatDomain>,
    /// More specific label resolved by the sub-threat rules, if any.
    pub sub_threat: Option<SubThreat>,
    /// The primary domain's weighted confidence, always in [0,1].
    pub weighted_score: f64,
    /// Union of loss categories over detected domains, declaration order.
    pub loss_categories: Vec<LossCategory>,
    /// Union of regulatory citations: domain citations in priority order,
    /// then sub-threat citations, deduplicated.
    pub regulatory_risks: Vec<String>,
}

impl ThreatClassification {
    /// The empty result for empty input.
    pub fn empty() -> Self {
        Self {
            findings: Vec::new(),
            primary_threat: None,
            sub_threat: None,
            weighted_score: 0.0,
            loss_categories: Vec::new(),
            regulatory_risks: Vec::new(),
        }
    }

    /// True when no domain was detected.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// True when the given domain was detected.
    pub fn detected(&self, domain: ThreatDomain) -> bool {
        self.findings.iter().any(|f| f.domain == domain)
    }

    /// Detected domains in priority order.
    pub fn detected_domains(&self) -> Vec<ThreatDomain> {
        self.findings.iter().map(|f| f.domain).collect()
    }

    /// All matchable evidence terms across detected domains.
    pub fn evidence_terms(&self) -> impl Iterator<Item = &str> {
        self.findings
            .iter()
            .flat_map(|f| f.evidence.iter())
            .filter_map(Evidence::term)
    }

    /// True when the only evidence is the statistical-fallback marker.
    pub fn is_fallback(&self) -> bool {
        !self.findings.is_empty()
            && self
                .findings
                .iter()
                .all(|f| f.evidence.iter().all(|e| e == &Evidence::StatisticalFallback))
    }
}
