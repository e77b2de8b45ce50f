//! Mitigating controls: fixed multiplicative risk reductions keyed by
//! detected domain.

use crate::taxonomy::ThreatDomain;

/// A named control with its risk-reduction factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Control {
    pub name: &'static str,
    pub factor: f64,
}

/// The control a domain triggers, if any. Each domain maps to at most one
/// control; domains without a standing control return `None`.
pub fn control_for(domain: ThreatDomain) -> Option<Control> {
    match domain {
        ThreatDomain::Biases => Some(Control {
            name: "bias_filter",
            factor: 0.7,
        }),
        ThreatDomain::Privacy => Some(Control {
            name: "pii_detection",
            factor: 0.6,
        }),
        ThreatDomain::Misuse => Some(Control {
            name: "shadow_credential_blocker",
            factor: 0.3,
        }),
        _ => None,
    }
}

/// Apply the controls triggered by the detected domains. Factors compound
/// multiplicatively. Returns the residual risk (rounded to 2 decimals)
/// and the control names in domain priority order.
pub fn apply_controls(baseline_risk: f64, domains: &[ThreatDomain]) -> (f64, Vec<String>) {
    let mut product = 1.0;
    let mut applied = Vec::new();
    for domain in domains {
        if let Some(control) = control_for(*domain) {
            product *= control.factor;
            applied.push(control.name.to_string());
        }
    }
    let residual = round2(baseline_risk * product);
    (residual, applied)
}

/// Round to two decimals; the scoring contract for every published score.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
