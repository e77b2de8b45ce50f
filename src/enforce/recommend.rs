//! Deterministic recommendation generation, keyed by outcome, detected
//! domains, and the declared system profile.

use crate::classify::ThreatClassification;
use crate::taxonomy::ThreatDomain;

use super::types::{Outcome, RiskClass, SystemProfile};

const LEGAL_REVIEW: &str = "Engage legal review before this task proceeds.";
const COMPLIANCE_LEDGER: &str =
    "Log this decision to the compliance ledger with full classification evidence.";
const CONFORMITY_ASSESSMENT: &str =
    "High-risk system classification requires a conformity assessment before deployment.";
const ROUTINE_MONITORING: &str =
    "Continue routine monitoring; no additional controls required at this risk level.";

/// Fixed advisory text per domain.
fn domain_advisory(domain: ThreatDomain) -> &'static str {
    match domain {
        ThreatDomain::Misuse => {
            "Restrict task execution to approved tooling and monitor for policy-violating use."
        }
        ThreatDomain::UnreliableOutputs => {
            "Require human review of model outputs before they reach downstream consumers."
        }
        ThreatDomain::Privacy => {
            "Run a data protection impact assessment and minimize personal data in scope."
        }
        ThreatDomain::Biases => {
            "Audit decision variables for proxy discrimination and document fairness testing."
        }
        ThreatDomain::Misinformation => {
            "Label generated content as synthetic and verify provenance before distribution."
        }
        ThreatDomain::SupplyChain => {
            "Pin and verify model and dependency provenance before deployment."
        }
        ThreatDomain::Drift => {
            "Schedule periodic revalidation of model performance against fresh data."
        }
        ThreatDomain::Opacity => {
            "Document the decision logic and provide a recourse channel for affected parties."
        }
        ThreatDomain::Adversarial => {
            "Harden the model against extraction and inversion probes before exposure."
        }
    }
}

/// Assemble the ordered recommendation list for a decision.
pub fn recommendations(
    classification: &ThreatClassification,
    outcome: Outcome,
    system: &SystemProfile,
) -> Vec<String> {
    let mut out = Vec::new();

    if matches!(outcome, Outcome::Blocked | Outcome::Escalate) {
        out.push(LEGAL_REVIEW.to_string());
        out.push(COMPLIANCE_LEDGER.to_string());
    }

    for finding in &classification.findings {
        out.push(domain_advisory(finding.domain).to_string());
    }

    if matches!(system.risk_class, RiskClass::High | RiskClass::Unacceptable) {
        out.push(CONFORMITY_ASSESSMENT.to_string());
    }
    if system.sector.is_regulated() && !classification.is_empty() {
        out.push(format!(
            "Route for {} sector compliance review before release.",
            system.sector.as_str()
        ));
    }

    if matches!(outcome, Outcome::Approved | Outcome::Conditional) {
        out.push(ROUTINE_MONITORING.to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enforce::types::Sector;

    fn system(sector: Sector, risk_class: RiskClass) -> SystemProfile {
        SystemProfile {
            sector,
            risk_class,
            jurisdiction: "EU".to_string(),
        }
    }

    #[test]
    fn blocked_always_leads_with_legal_review() {
        let recs = recommendations(
            &ThreatClassification::empty(),
            Outcome::Blocked,
            &system(Sector::General, RiskClass::Minimal),
        );
        assert_eq!(recs[0], LEGAL_REVIEW);
        assert_eq!(recs[1], COMPLIANCE_LEDGER);
    }

    #[test]
    fn approved_ends_with_monitoring_reminder() {
        let recs = recommendations(
            &ThreatClassification::empty(),
            Outcome::Approved,
            &system(Sector::General, RiskClass::Minimal),
        );
        assert_eq!(recs.last().map(String::as_str), Some(ROUTINE_MONITORING));
    }

    #[test]
    fn regulated_sector_without_findings_adds_no_sector_line() {
        let recs = recommendations(
            &ThreatClassification::empty(),
            Outcome::Approved,
            &system(Sector::Finance, RiskClass::Limited),
        );
        assert!(!recs.iter().any(|r| r.contains("sector compliance review")));
    }
}
