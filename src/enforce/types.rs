//! Input and output records for the enforcement engine.

use serde::{Deserialize, Serialize};

use crate::classify::ThreatClassification;
use crate::penalty::{PenaltyMatch, TotalExposure};
use crate::taxonomy::{LossCategory, SubThreat};

/// A task submitted for governance review. Only the free text matters to
/// the engine; `artifact_type` is recorded but not scored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub artifact_type: Option<String>,
}

/// Sector the owning system operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Finance,
    Healthcare,
    Hiring,
    Education,
    LawEnforcement,
    Marketing,
    General,
}

impl Sector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Finance => "finance",
            Sector::Healthcare => "healthcare",
            Sector::Hiring => "hiring",
            Sector::Education => "education",
            Sector::LawEnforcement => "law_enforcement",
            Sector::Marketing => "marketing",
            Sector::General => "general",
        }
    }

    /// Sectors whose output requires a dedicated compliance review.
    pub fn is_regulated(&self) -> bool {
        matches!(self, Sector::Finance | Sector::Healthcare | Sector::Hiring)
    }
}

/// Declared risk classification of the owning system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskClass {
    Minimal,
    Limited,
    High,
    Unacceptable,
}

/// The system a task belongs to, as declared by the caller's registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemProfile {
    pub sector: Sector,
    pub risk_class: RiskClass,
    pub jurisdiction: String,
}

/// Final disposition of an enforcement call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Approved,
    Conditional,
    Escalate,
    Blocked,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Approved => write!(f, "APPROVED"),
            Outcome::Conditional => write!(f, "CONDITIONAL"),
            Outcome::Escalate => write!(f, "ESCALATE"),
            Outcome::Blocked => write!(f, "BLOCKED"),
        }
    }
}

/// Applicable penalties plus aggregated exposure and summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegulatoryImpact {
    pub penalties: Vec<PenaltyMatch>,
    pub total_exposure: TotalExposure,
    pub executive_summary: String,
}

/// The engine's decision, with every intermediate value retained for
/// auditability. Contains no timestamp: identical input against an
/// identical schedule serializes byte-identically. Timestamps belong to
/// the ledger envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub outcome: Outcome,
    /// Residual risk after controls, 0-10, two decimals.
    pub risk_score: f64,
    /// Pre-control risk, 0-10, two decimals.
    pub baseline_risk: f64,
    /// Names of controls triggered, in domain priority order.
    pub controls_applied: Vec<String>,
    pub regulatory_impact: Option<RegulatoryImpact>,
    pub sub_threat_type: Option<SubThreat>,
    pub loss_categories: Vec<LossCategory>,
    pub reason: String,
    pub recommendations: Vec<String>,
    /// The full classification that produced this decision.
    pub classification: ThreatClassification,
}
