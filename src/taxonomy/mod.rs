//! Threat taxonomy: the closed set of AI-risk domains, their loss-category
//! and citation mappings, sub-threat labels, and the compiled matching tables
//! built from the static keyword data in [`keywords`].

pub(crate) mod keywords;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;


/// A fixed AI-risk threat category.
///
/// Declaration order is the domain priority order: when two domains tie on
/// weighted confidence, the one declared first wins the primary-threat slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatDomain {
    /// Deliberate harmful or policy-violating use of an AI system.
    Misuse,
    /// Incorrect, fabricated, or unsupervised model output.
    UnreliableOutputs,
    /// Processing of personal or biometric data beyond lawful bounds.
    Privacy,
    /// Discriminatory treatment, direct or via proxy variables.
    Biases,
    /// Synthetic media and deceptive generated content.
    Misinformation,
    /// Compromised or unvetted models, weights, and dependencies.
    SupplyChain,
    /// Silent degradation of a deployed model over time.
    Drift,
    /// Unexplainable automated decisions without recourse.
    Opacity,
    /// Attacks on the model itself (inversion, poisoning, evasion).
    Adversarial,
}

impl ThreatDomain {
    /// All domains in priority order.
    pub const ALL: [ThreatDomain; 9] = [
        ThreatDomain::Misuse,
        ThreatDomain::UnreliableOutputs,
        ThreatDomain::Privacy,
        ThreatDomain::Biases,
        ThreatDomain::Misinformation,
        ThreatDomain::SupplyChain,
        ThreatDomain::Drift,
        ThreatDomain::Opacity,
        ThreatDomain::Adversarial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatDomain::Misuse => "misuse",
            ThreatDomain::UnreliableOutputs => "unreliable_outputs",
            ThreatDomain::Privacy => "privacy",
            ThreatDomain::Biases => "biases",
            ThreatDomain::Misinformation => "misinformation",
            ThreatDomain::SupplyChain => "supply_chain",
            ThreatDomain::Drift => "drift",
            ThreatDomain::Opacity => "opacity",
            ThreatDomain::Adversarial => "adversarial",
        }
    }

    /// Parse the snake_case form used in penalty schedules.
    pub fn parse(s: &str) -> Option<ThreatDomain> {
        ThreatDomain::ALL.iter().copied().find(|d| d.as_str() == s)
    }

    /// The fixed profile for this domain. The mapping is a closed match, so
    /// adding a domain without a profile is a compile error.
    pub fn profile(&self) -> DomainProfile {
        match self {
            ThreatDomain::Misuse => DomainProfile {
                prevalence: 1.4,
                loss_categories: &[
                    LossCategory::Integrity,
                    LossCategory::Availability,
                    LossCategory::Reputation,
                ],
                citations: &["EU AI Act Article 5", "CFAA 18 U.S.C. §1030"],
            },
            ThreatDomain::UnreliableOutputs => DomainProfile {
                prevalence: 1.3,
                loss_categories: &[LossCategory::Integrity, LossCategory::Reputation],
                citations: &["EU AI Act Article 15"],
            },
            ThreatDomain::Privacy => DomainProfile {
                prevalence: 1.2,
                loss_categories: &[
                    LossCategory::Confidentiality,
                    LossCategory::Legal,
                    LossCategory::Reputation,
                ],
                citations: &[
                    "GDPR Article 5",
                    "GDPR Article 83",
                    "CCPA §1798.150",
                ],
            },
            ThreatDomain::Biases => DomainProfile {
                prevalence: 1.1,
                loss_categories: &[
                    LossCategory::Integrity,
                    LossCategory::Legal,
                    LossCategory::Reputation,
                ],
                citations: &["ECOA 15 U.S.C. §1691", "EU AI Act Article 10"],
            },
            ThreatDomain::Misinformation => DomainProfile {
                prevalence: 1.1,
                loss_categories: &[
                    LossCategory::Integrity,
                    LossCategory::Legal,
                    LossCategory::Reputation,
                ],
                citations: &["EU AI Act Article 50", "DSA Article 34"],
            },
            ThreatDomain::SupplyChain => DomainProfile {
                prevalence: 1.0,
                loss_categories: &[
                    LossCategory::Confidentiality,
                    LossCategory::Integrity,
                    LossCategory::Availability,
                ],
                citations: &["NIS2 Article 21", "EO 14028"],
            },
            ThreatDomain::Drift => DomainProfile {
                prevalence: 0.9,
                loss_categories: &[LossCategory::Integrity, LossCategory::Availability],
                citations: &["EU AI Act Article 72"],
            },
            ThreatDomain::Opacity => DomainProfile {
                prevalence: 0.8,
                loss_categories: &[LossCategory::Legal, LossCategory::Reputation],
                citations: &["GDPR Article 22", "EU AI Act Article 13"],
            },
            ThreatDomain::Adversarial => DomainProfile {
                prevalence: 0.6,
                loss_categories: &[LossCategory::Integrity, LossCategory::Availability],
                citations: &["NIS2 Article 21"],
            },
        }
    }
}

impl std::fmt::Display for ThreatDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A dimension of harm a detected threat contributes to (CIA-L-R).
///
/// Declaration order is the canonical emission order for category unions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossCategory {
    Confidentiality,
    Integrity,
    Availability,
    Legal,
    Reputation,
}

impl LossCategory {
    pub const ALL: [LossCategory; 5] = [
        LossCategory::Confidentiality,
        LossCategory::Integrity,
        LossCategory::Availability,
        LossCategory::Legal,
        LossCategory::Reputation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LossCategory::Confidentiality => "confidentiality",
            LossCategory::Integrity => "integrity",
            LossCategory::Availability => "availability",
            LossCategory::Legal => "legal",
            LossCategory::Reputation => "reputation",
        }
    }
}

impl std::fmt::Display for LossCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A label more specific than a domain, resolved by dedicated predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubThreat {
    ShadowAiCredentialExposure,
    ProhibitedBiometricPractice,
    ProxyDiscrimination,
    ModelInversion,
    PiiLeakage,
    SyntheticMediaAbuse,
}

impl SubThreat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubThreat::ShadowAiCredentialExposure => "shadow_ai_credential_exposure",
            SubThreat::ProhibitedBiometricPractice => "prohibited_biometric_practice",
            SubThreat::ProxyDiscrimination => "proxy_discrimination",
            SubThreat::ModelInversion => "model_inversion",
            SubThreat::PiiLeakage => "pii_leakage",
            SubThreat::SyntheticMediaAbuse => "synthetic_media_abuse",
        }
    }

    /// Severity boost added to the baseline risk score.
    ///
    /// This is the single authoritative tier table: CRITICAL sub-threats add
    /// 2.0, HIGH sub-threats add 1.0, everything else adds nothing. Scoring
    /// must not maintain a second membership list anywhere.
    pub fn severity_boost(&self) -> f64 {
        match self {
            SubThreat::ShadowAiCredentialExposure | SubThreat::ProhibitedBiometricPractice => 2.0,
            SubThreat::ProxyDiscrimination | SubThreat::ModelInversion | SubThreat::PiiLeakage => {
                1.0
            }
            SubThreat::SyntheticMediaAbuse => 0.0,
        }
    }

    /// Regulatory citations attached to this sub-threat.
    pub fn citations(&self) -> &'static [&'static str] {
        match self {
            SubThreat::ShadowAiCredentialExposure => &["GDPR Article 32", "NIS2 Article 21"],
            SubThreat::ProhibitedBiometricPractice => &["EU AI Act Article 5"],
            SubThreat::ProxyDiscrimination => &[
                "ECOA 15 U.S.C. §1691",
                "Fair Housing Act 42 U.S.C. §3604",
            ],
            SubThreat::ModelInversion => &["GDPR Article 32"],
            SubThreat::PiiLeakage => &["GDPR Article 5", "GDPR Article 83"],
            SubThreat::SyntheticMediaAbuse => &["EU AI Act Article 50"],
        }
    }
}

impl std::fmt::Display for SubThreat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed per-domain data: prevalence multiplier, loss mapping, citations.
#[derive(Debug, Clone, Copy)]
pub struct DomainProfile {
    /// Multiplier reflecting observed real-world incident frequency.
    /// Frequent domains sit above 1.0, over-studied-but-rare ones below.
    pub prevalence: f64,
    pub loss_categories: &'static [LossCategory],
    pub citations: &'static [&'static str],
}

/// Errors from taxonomy construction.
#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("failed to compile pattern signal '{name}': {source}")]
    InvalidPattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("failed to compile sub-threat pattern for '{label}': {source}")]
    InvalidSubThreatPattern {
        label: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("domain '{0}' has an empty keyword table")]
    EmptyKeywords(ThreatDomain),

    #[error("keyword '{term}' in domain '{domain}' has weight {weight} outside (0.0, 10.0]")]
    InvalidWeight {
        domain: ThreatDomain,
        term: &'static str,
        weight: f64,
    },

    #[error("domain '{domain}' has non-positive prevalence multiplier {value}")]
    InvalidPrevalence { domain: ThreatDomain, value: f64 },
}

/// A structural pattern signal with its compiled regex.
#[derive(Debug)]
pub struct CompiledSignal {
    pub name: &'static str,
    pub domain: ThreatDomain,
    pub weight: f64,
    pub regex: Regex,
}

/// A sub-threat rule with its predicate compiled and ready to evaluate.
#[derive(Debug)]
pub struct CompiledSubThreat {
    pub sub_threat: SubThreat,
    regex: Option<Regex>,
    all_of: &'static [&'static [&'static str]],
}

impl CompiledSubThreat {
    /// True when the predicate holds for the given case-folded text.
    ///
    /// A rule matches if its structural pattern matches, or if it carries
    /// keyword groups and every group has at least one term in the text.
    pub fn matches(&self, folded: &str) -> bool {
        if let Some(re) = &self.regex {
            if re.is_match(folded) {
                return true;
            }
        }
        !self.all_of.is_empty()
            && self
                .all_of
                .iter()
                .all(|group| group.iter().any(|term| folded.contains(term)))
    }
}

/// The immutable matching configuration the classifier is built from.
///
/// Constructed once (regexes compiled, static tables validated) and shared
/// read-only for the lifetime of an engine. Holding it behind an `Arc` makes
/// a hot-reload a whole-object replacement, never an in-place edit.
#[derive(Debug)]
pub struct Taxonomy {
    signals: Vec<CompiledSignal>,
    sub_threats: Vec<CompiledSubThreat>,
}

impl Taxonomy {
    /// Build the built-in taxonomy, validating the static data tables and
    /// compiling every pattern. Fails fast on any defect instead of matching
    /// with a silently incomplete table.
    pub fn builtin() -> Result<Self, TaxonomyError> {
        for domain in ThreatDomain::ALL {
            let profile = domain.profile();
            if profile.prevalence <= 0.0 {
                return Err(TaxonomyError::InvalidPrevalence {
                    domain,
                    value: profile.prevalence,
                });
            }
            let table = keywords::domain_keywords(domain);
            if table.is_empty() {
                return Err(TaxonomyError::EmptyKeywords(domain));
            }
            for spec in table {
                if spec.weight <= 0.0 || spec.weight > 10.0 {
                    return Err(TaxonomyError::InvalidWeight {
                        domain,
                        term: spec.term,
                        weight: spec.weight,
                    });
                }
            }
        }

        let mut signals = Vec::with_capacity(keywords::PATTERN_SIGNALS.len());
        for spec in keywords::PATTERN_SIGNALS {
            let regex = Regex::new(spec.pattern).map_err(|source| {
                TaxonomyError::InvalidPattern {
                    name: spec.name,
                    source,
                }
            })?;
            signals.push(CompiledSignal {
                name: spec.name,
                domain: spec.domain,
                weight: spec.weight,
                regex,
            });
        }

        let mut sub_threats = Vec::with_capacity(keywords::SUB_THREAT_RULES.len());
        for spec in keywords::SUB_THREAT_RULES {
            let regex = match spec.pattern {
                Some(pattern) => Some(Regex::new(pattern).map_err(|source| {
                    TaxonomyError::InvalidSubThreatPattern {
                        label: spec.sub_threat.as_str(),
                        source,
                    }
                })?),
                None => None,
            };
            sub_threats.push(CompiledSubThreat {
                sub_threat: spec.sub_threat,
                regex,
                all_of: spec.all_of,
            });
        }

        Ok(Self {
            signals,
            sub_threats,
        })
    }

    /// Weighted keyword table for a domain.
    pub fn keywords(&self, domain: ThreatDomain) -> &'static [KeywordSpec] {
        keywords::domain_keywords(domain)
    }

    /// Compiled structural pattern signals.
    pub fn signals(&self) -> &[CompiledSignal] {
        &self.signals
    }

    /// Sub-threat rules in resolution order (first match wins).
    pub fn sub_threat_rules(&self) -> &[CompiledSubThreat] {
        &self.sub_threats
    }
}

// Re-export the table entry types so callers can inspect the raw data.
pub use keywords::{
    KeywordSpec, PatternSpec as PatternSignalSpec, SubThreatSpec as SubThreatRuleSpec,
};
