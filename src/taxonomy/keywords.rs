//! Static matching data: weighted keyword tables per domain, structural
//! pattern signals, and the ordered sub-threat rule table.
//!
//! All terms are lowercase because the classifier case-folds input before
//! matching. Weights range 1.0 for generic indicators to 10.0 for legally
//! dispositive terms. This file is data, not logic; `Taxonomy::builtin`
//! validates it at construction.

use super::{SubThreat, ThreatDomain};

/// A weighted keyword belonging to one domain.
#[derive(Debug, Clone, Copy)]
pub struct KeywordSpec {
    pub term: &'static str,
    pub weight: f64,
}

/// A high-confidence structural signal matched by regex.
#[derive(Debug, Clone, Copy)]
pub struct PatternSpec {
    pub name: &'static str,
    pub domain: ThreatDomain,
    pub weight: f64,
    pub pattern: &'static str,
}

/// A sub-threat predicate: an optional structural pattern, plus keyword
/// groups where every group must contribute at least one term.
#[derive(Debug, Clone, Copy)]
pub struct SubThreatSpec {
    pub sub_threat: SubThreat,
    pub pattern: Option<&'static str>,
    pub all_of: &'static [&'static [&'static str]],
}

const fn kw(term: &'static str, weight: f64) -> KeywordSpec {
    KeywordSpec { term, weight }
}

const MISUSE: &[KeywordSpec] = &[
    kw("weaponiz", 8.0),
    kw("malware", 9.0),
    kw("phishing", 8.0),
    kw("jailbreak", 7.0),
    kw("bypass safeguard", 8.0),
    kw("unauthorized access", 7.0),
    kw("credential harvest", 9.0),
    kw("scrape credentials", 9.0),
    kw("shadow ai", 8.0),
    kw("unapproved tool", 6.0),
    kw("dark web", 7.0),
    kw("exfiltrat", 8.0),
    kw("mass surveillance", 7.0),
    kw("fraud scheme", 6.0),
];

const UNRELIABLE_OUTPUTS: &[KeywordSpec] = &[
    kw("hallucinat", 8.0),
    kw("fabricated citation", 9.0),
    kw("confabulat", 7.0),
    kw("factual error", 5.0),
    kw("unverified output", 5.0),
    kw("no human review", 6.0),
    kw("autonomous decision", 6.0),
    kw("medical advice", 6.0),
    kw("overconfident", 4.0),
    kw("silent failure", 5.0),
];

const PRIVACY: &[KeywordSpec] = &[
    kw("emotion recognition", 10.0),
    kw("social scoring", 10.0),
    kw("biometric categorization", 10.0),
    kw("micro-expression", 8.0),
    kw("facial recognition", 8.0),
    kw("biometric", 7.0),
    kw("personal data", 6.0),
    kw("pii", 7.0),
    kw("social security number", 9.0),
    kw("health record", 8.0),
    kw("de-anonymiz", 8.0),
    kw("re-identif", 8.0),
    kw("location tracking", 6.0),
    kw("data subject", 4.0),
];

const BIASES: &[KeywordSpec] = &[
    kw("redlining", 10.0),
    kw("disparate impact", 9.0),
    kw("discriminat", 8.0),
    kw("protected class", 8.0),
    kw("zip code", 8.0),
    kw("proxy variable", 7.0),
    kw("low-income", 6.0),
    kw("screen out", 6.0),
    kw("biased training data", 6.0),
    kw("fairness violation", 6.0),
    kw("credit scoring", 5.0),
    kw("demographic skew", 5.0),
];

const MISINFORMATION: &[KeywordSpec] = &[
    kw("deepfake", 10.0),
    kw("voice clone", 9.0),
    kw("election manipulation", 9.0),
    kw("synthetic media", 8.0),
    kw("face swap", 8.0),
    kw("fabricated evidence", 8.0),
    kw("impersonat", 7.0),
    kw("fake news", 7.0),
    kw("astroturf", 7.0),
    kw("undisclosed synthetic", 7.0),
];

const SUPPLY_CHAIN: &[KeywordSpec] = &[
    kw("typosquat", 9.0),
    kw("dependency confusion", 9.0),
    kw("unvetted model", 8.0),
    kw("poisoned checkpoint", 8.0),
    kw("tampered weights", 8.0),
    kw("compromised dependency", 8.0),
    kw("unsigned artifact", 7.0),
    kw("third-party model", 5.0),
    kw("provenance unknown", 5.0),
    kw("sbom", 5.0),
];

const DRIFT: &[KeywordSpec] = &[
    kw("model drift", 9.0),
    kw("concept drift", 9.0),
    kw("data drift", 8.0),
    kw("distribution shift", 7.0),
    kw("degraded accuracy", 6.0),
    kw("stale training data", 6.0),
    kw("retraining overdue", 6.0),
    kw("performance decay", 6.0),
];

const OPACITY: &[KeywordSpec] = &[
    kw("right to explanation", 8.0),
    kw("black box", 7.0),
    kw("unexplainable", 7.0),
    kw("opaque model", 6.0),
    kw("no explanation", 6.0),
    kw("no recourse", 6.0),
    kw("uninterpretable", 6.0),
    kw("automated decision", 5.0),
];

const ADVERSARIAL: &[KeywordSpec] = &[
    kw("prompt injection", 9.0),
    kw("adversarial example", 9.0),
    kw("model inversion", 9.0),
    kw("membership inference", 9.0),
    kw("model extraction", 8.0),
    kw("data poisoning", 8.0),
    kw("evasion attack", 8.0),
    kw("gradient attack", 7.0),
    kw("adversarial perturbation", 6.0),
];

/// The keyword table for a domain. Closed match, so a domain without a
/// table is a compile error.
pub fn domain_keywords(domain: ThreatDomain) -> &'static [KeywordSpec] {
    match domain {
        ThreatDomain::Misuse => MISUSE,
        ThreatDomain::UnreliableOutputs => UNRELIABLE_OUTPUTS,
        ThreatDomain::Privacy => PRIVACY,
        ThreatDomain::Biases => BIASES,
        ThreatDomain::Misinformation => MISINFORMATION,
        ThreatDomain::SupplyChain => SUPPLY_CHAIN,
        ThreatDomain::Drift => DRIFT,
        ThreatDomain::Opacity => OPACITY,
        ThreatDomain::Adversarial => ADVERSARIAL,
    }
}

/// Token shapes for leaked credentials: PEM private keys, OpenAI-style
/// `sk-` keys, AWS access key IDs, GitHub personal tokens, Slack tokens.
const CREDENTIAL_PATTERN: &str = r"begin [a-z ]*private key|\b(sk-[a-z0-9]{20,}|akia[0-9a-z]{16}|ghp_[a-z0-9]{36}|xox[baprs]-[0-9a-z-]{10,})";

/// Structural signals. Both fold into the misuse domain at maximal weight:
/// credential material in task text is definitive regardless of phrasing.
pub const PATTERN_SIGNALS: &[PatternSpec] = &[
    PatternSpec {
        name: "private key material",
        domain: ThreatDomain::Misuse,
        weight: 10.0,
        pattern: r"begin [a-z ]*private key",
    },
    PatternSpec {
        name: "api credential pattern",
        domain: ThreatDomain::Misuse,
        weight: 10.0,
        pattern: r"\b(sk-[a-z0-9]{20,}|akia[0-9a-z]{16}|ghp_[a-z0-9]{36}|xox[baprs]-[0-9a-z-]{10,})",
    },
];

/// Sub-threat rules in resolution order; the first matching rule wins.
pub const SUB_THREAT_RULES: &[SubThreatSpec] = &[
    SubThreatSpec {
        sub_threat: SubThreat::ShadowAiCredentialExposure,
        pattern: Some(CREDENTIAL_PATTERN),
        all_of: &[
            &[
                "shadow ai",
                "chatgpt",
                "claude",
                "copilot",
                "unapproved tool",
                "personal account",
            ],
            &[
                "credential",
                "password",
                "api key",
                "secret key",
                "access token",
                "private key",
            ],
        ],
    },
    SubThreatSpec {
        sub_threat: SubThreat::ProhibitedBiometricPractice,
        pattern: None,
        all_of: &[&[
            "emotion recognition",
            "social scoring",
            "biometric categorization",
            "micro-expression",
            "predictive policing",
        ]],
    },
    SubThreatSpec {
        sub_threat: SubThreat::ProxyDiscrimination,
        pattern: None,
        all_of: &[
            &[
                "zip code",
                "postal code",
                "neighborhood",
                "low-income",
                "proxy variable",
                "surname",
            ],
            &[
                "deny", "denial", "reject", "screen", "score", "premium", "approve",
            ],
        ],
    },
    SubThreatSpec {
        sub_threat: SubThreat::ModelInversion,
        pattern: None,
        all_of: &[&[
            "model inversion",
            "membership inference",
            "training data extraction",
            "reconstruct training data",
        ]],
    },
    SubThreatSpec {
        sub_threat: SubThreat::PiiLeakage,
        pattern: None,
        all_of: &[
            &[
                "pii",
                "personal data",
                "social security number",
                "health record",
                "personally identifiable",
            ],
            &[
                "leak",
                "expose",
                "exfiltrat",
                "dump",
                "unencrypted",
                "publicly",
            ],
        ],
    },
    SubThreatSpec {
        sub_threat: SubThreat::SyntheticMediaAbuse,
        pattern: None,
        all_of: &[
            &["deepfake", "synthetic media", "voice clone", "face swap"],
            &[
                "impersonat",
                "undisclosed",
                "without consent",
                "without disclosure",
                "mislead",
            ],
        ],
    },
];
