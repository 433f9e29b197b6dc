use serde::{Deserialize, Serialize};

/// Risk tier for a classified diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Map an accumulated heuristic score onto a tier.
    /// Bands are inclusive lower bounds, checked high to low.
    pub fn from_score(score: u32) -> Self {
        if score >= 5 {
            RiskLevel::High
        } else if score >= 2 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Severity of a single flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    Danger,
    Warning,
    Info,
}

impl std::fmt::Display for FlagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlagKind::Danger => write!(f, "danger"),
            FlagKind::Warning => write!(f, "warning"),
            FlagKind::Info => write!(f, "info"),
        }
    }
}

/// A detected pattern of interest.
///
/// On the wire this must stay `{"type": ..., "msg": ...}`: the existing web
/// client reads `flag.type` and `flag.msg`. Renaming the serialized fields to
/// `kind`/`message` breaks that client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    #[serde(rename = "type")]
    pub kind: FlagKind,
    #[serde(rename = "msg")]
    pub message: String,
}

impl Flag {
    pub fn new(kind: FlagKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Complete result of classifying one diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Tier derived from the internal score
    pub risk_level: RiskLevel,
    /// Human-readable description, in the order the heuristics ran; never empty
    pub summary: Vec<String>,
    /// Detected patterns, in detection order
    pub flags: Vec<Flag>,
    /// Category labels for the kinds of files touched (not deduplicated)
    pub file_types: Vec<String>,
}
