pub mod file_types;
pub mod risk;
pub mod summary;

use thiserror::Error;
use tracing::{debug, trace};

use crate::config::RuleConfig;
use crate::report::types::{AnalysisReport, Flag, RiskLevel};

use file_types::FileTypeRule;
use risk::RiskRule;
use summary::{DefaultSummary, SummaryRule};

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Invalid pattern for rule {rule}: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },
}

/// Running state threaded through the heuristics, in order.
///
/// The score never leaves the classifier; only the tier derived from it does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
    pub score: u32,
    pub flags: Vec<Flag>,
    pub file_types: Vec<String>,
    pub summary: Vec<String>,
}

impl Accumulator {
    fn into_report(self) -> AnalysisReport {
        AnalysisReport {
            risk_level: RiskLevel::from_score(self.score),
            summary: self.summary,
            flags: self.flags,
            file_types: self.file_types,
        }
    }
}

/// A single pattern check over raw diff text.
///
/// Implementations are pure: they read the text and the accumulator so far
/// and return the next accumulator. They must not look at anything else.
pub trait Heuristic: Send + Sync {
    /// Short identifier used in logs (e.g., "destructive-database")
    fn name(&self) -> &str;

    fn apply(&self, diff: &str, acc: Accumulator) -> Accumulator;
}

/// Maps raw diff text to an [`AnalysisReport`] by folding an ordered list of
/// heuristics over it.
///
/// Order: file-type detection, built-in risk groups, configured extra risk
/// rules, summary lines, and finally the default summary line.
pub struct Classifier {
    heuristics: Vec<Box<dyn Heuristic>>,
}

impl Classifier {
    /// Classifier with only the built-in heuristics.
    pub fn new() -> Self {
        Self::assemble(Vec::new())
    }

    /// Classifier with the built-in heuristics plus extra risk rules from config.
    /// Fails if any rule's regex does not compile.
    pub fn with_rules(rules: &[RuleConfig]) -> Result<Self, ClassifierError> {
        let extra = rules
            .iter()
            .map(RiskRule::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::assemble(extra))
    }

    fn assemble(extra: Vec<RiskRule>) -> Self {
        let mut heuristics: Vec<Box<dyn Heuristic>> = Vec::new();
        for rule in FileTypeRule::builtin() {
            heuristics.push(Box::new(rule));
        }
        for rule in RiskRule::builtin().into_iter().chain(extra) {
            heuristics.push(Box::new(rule));
        }
        for rule in SummaryRule::builtin() {
            heuristics.push(Box::new(rule));
        }
        heuristics.push(Box::new(DefaultSummary));
        Self { heuristics }
    }

    /// Number of heuristics in the pipeline.
    pub fn heuristic_count(&self) -> usize {
        self.heuristics.len()
    }

    /// Classify a diff. Total over all inputs, including the empty string.
    pub fn classify(&self, diff: &str) -> AnalysisReport {
        let acc = self
            .heuristics
            .iter()
            .fold(Accumulator::default(), |acc, heuristic| {
                let acc = heuristic.apply(diff, acc);
                trace!(heuristic = heuristic.name(), score = acc.score, "heuristic applied");
                acc
            });
        debug!(
            score = acc.score,
            flags = acc.flags.len(),
            file_types = acc.file_types.len(),
            "classification complete"
        );
        acc.into_report()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
