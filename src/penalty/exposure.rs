//! Penalty trigger matching, jurisdiction-aware exposure aggregation, and
//! the executive summary template.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::ThreatClassification;

use super::schedule::{Jurisdiction, PenaltySchedule, Severity};

/// One penalty entry that applies to a classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyMatch {
    pub id: String,
    pub jurisdiction: Jurisdiction,
    pub regulation: String,
    pub article: String,
    pub currency: String,
    pub min_fine: f64,
    pub max_fine: f64,
    pub severity: Severity,
    /// Trigger keywords satisfied by the classification's evidence.
    pub matched_keywords: Vec<String>,
}

/// Aggregated financial exposure across matched penalties.
///
/// Field names are the stable serialization contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalExposure {
    pub total_min_eur: f64,
    pub total_max_eur: f64,
    pub total_min_usd: f64,
    pub total_max_usd: f64,
    /// True when more than one US penalty matched and their fines were
    /// summed.
    pub stacking_applied: bool,
}

impl PenaltySchedule {
    /// Penalty entries applicable to a classification.
    ///
    /// An entry applies only if at least one of its required domains was
    /// detected AND at least one of its trigger keywords appears inside
    /// some matched evidence term. Sorted by severity (CRITICAL first),
    /// then descending maximum fine.
    pub fn applicable_penalties(&self, classification: &ThreatClassification) -> Vec<PenaltyMatch> {
        let mut matches = Vec::new();

        for entry in self.entries() {
            if !entry.domains.iter().any(|d| classification.detected(*d)) {
                continue;
            }

            let matched_keywords: Vec<String> = entry
                .entry
                .triggers
                .specific_violations
                .iter()
                .map(|v| v.keyword.to_lowercase())
                .filter(|keyword| {
                    classification
                        .evidence_terms()
                        .any(|term| term.contains(keyword.as_str()))
                })
                .collect();
            if matched_keywords.is_empty() {
                continue;
            }

            debug!(entry = %entry.id, keywords = ?matched_keywords, "penalty trigger matched");
            matches.push(PenaltyMatch {
                id: entry.id.clone(),
                jurisdiction: entry.entry.jurisdiction,
                regulation: entry.entry.regulation.clone(),
                article: entry.entry.article.clone(),
                currency: entry.entry.penalty.currency.clone(),
                min_fine: entry.entry.penalty.min_fine,
                max_fine: entry.entry.penalty.max_fine,
                severity: entry.entry.severity,
                matched_keywords,
            });
        }

        matches.sort_by(|a, b| {
            a.severity.cmp(&b.severity).then(
                b.max_fine
                    .partial_cmp(&a.max_fine)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
        });
        matches
    }

    /// Aggregate exposure under jurisdiction-specific stacking rules.
    ///
    /// EU penalties do not stack: regulators apply the single most severe
    /// applicable fine, so EU exposure is the range of the largest matched
    /// entry. US penalties stack: distinct legal bases can be charged
    /// cumulatively, so US exposure sums mins and maxes.
    pub fn total_exposure(&self, matches: &[PenaltyMatch]) -> TotalExposure {
        let mut exposure = TotalExposure::default();

        let mut eu_top: Option<&PenaltyMatch> = None;
        let mut us_count = 0usize;
        for m in matches {
            match m.jurisdiction {
                Jurisdiction::Eu => {
                    let bigger = match eu_top {
                        None => true,
                        Some(top) => {
                            m.max_fine > top.max_fine
                                || (m.max_fine == top.max_fine && m.min_fine > top.min_fine)
                        }
                    };
                    if bigger {
                        eu_top = Some(m);
                    }
                }
                Jurisdiction::Us => {
                    us_count += 1;
                    exposure.total_min_usd += m.min_fine;
                    exposure.total_max_usd += m.max_fine;
                }
            }
        }

        if let Some(top) = eu_top {
            exposure.total_min_eur = top.min_fine;
            exposure.total_max_eur = top.max_fine;
        }
        exposure.stacking_applied = us_count > 1;
        exposure
    }

    /// Render the fixed three-tier summary. Never panics; absent exposure
    /// amounts render as zero.
    pub fn executive_summary(&self, matches: &[PenaltyMatch], exposure: &TotalExposure) -> String {
        if matches.is_empty() {
            return "No regulatory penalties matched this task.".to_string();
        }

        let ranges = exposure_ranges(exposure);
        let criticals: Vec<&PenaltyMatch> = matches
            .iter()
            .filter(|m| m.severity == Severity::Critical)
            .collect();
        if !criticals.is_empty() {
            let terms: Vec<&str> = criticals
                .iter()
                .flat_map(|m| m.matched_keywords.iter().map(String::as_str))
                .collect();
            return format!(
                "CRITICAL REGULATORY EXPOSURE: task matches prohibited terms ({}) under {}; estimated fines {}. Do not proceed without legal sign-off.",
                terms.join(", "),
                cite(criticals[0]),
                ranges,
            );
        }

        if let Some(high) = matches.iter().find(|m| m.severity == Severity::High) {
            return format!(
                "WARNING: task triggers {} with estimated fines {}. Legal review is recommended before proceeding.",
                cite(high),
                ranges,
            );
        }

        format!(
            "Advisory: {} lower-severity regulatory trigger(s) matched; estimated fines {}. Track in the compliance backlog.",
            matches.len(),
            ranges,
        )
    }
}

fn cite(m: &PenaltyMatch) -> String {
    format!("{} {}", m.regulation, m.article)
}

/// Render the non-zero currency ranges, or "none quantified" when both
/// jurisdictions aggregate to zero.
fn exposure_ranges(exposure: &TotalExposure) -> String {
    let mut parts = Vec::new();
    if exposure.total_max_eur > 0.0 {
        parts.push(format!(
            "EUR {}-{}",
            fmt_amount(exposure.total_min_eur),
            fmt_amount(exposure.total_max_eur)
        ));
    }
    if exposure.total_max_usd > 0.0 {
        parts.push(format!(
            "USD {}-{}",
            fmt_amount(exposure.total_min_usd),
            fmt_amount(exposure.total_max_usd)
        ));
    }
    if parts.is_empty() {
        "none quantified".to_string()
    } else {
        parts.join(" and ")
    }
}

/// Whole-unit amount with thousands separators.
fn fmt_amount(value: f64) -> String {
    let whole = value.max(0.0).round() as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_format_with_separators() {
        assert_eq!(fmt_amount(0.0), "0");
        assert_eq!(fmt_amount(999.0), "999");
        assert_eq!(fmt_amount(1_000.0), "1,000");
        assert_eq!(fmt_amount(20_000_000.0), "20,000,000");
        assert_eq!(fmt_amount(50_120.0), "50,120");
    }

    #[test]
    fn summary_handles_default_exposure() {
        let schedule = PenaltySchedule::embedded_fallback();
        let summary = schedule.executive_summary(&[], &TotalExposure::default());
        assert!(summary.contains("No regulatory penalties"));
    }
}
