use regex::Regex;
use tracing::debug;

use super::{Accumulator, ClassifierError, Heuristic};
use crate::config::RuleConfig;
use crate::report::types::{Flag, FlagKind};

/// How a risk rule decides whether it matches.
pub enum Matcher {
    /// Any keyword present, compared with ASCII case folding only.
    Keywords(&'static [&'static str]),
    /// User-supplied regex from config, used as written.
    Pattern(Regex),
}

impl Matcher {
    fn is_match(&self, text: &str) -> bool {
        match self {
            Matcher::Keywords(keywords) => keywords
                .iter()
                .any(|k| contains_ignore_ascii_case(text, k)),
            Matcher::Pattern(re) => re.is_match(text),
        }
    }
}

/// Substring search that folds ASCII letters only. Non-ASCII characters such
/// as `ſ` or the Kelvin sign never match their ASCII look-alikes.
pub fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return true;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

/// Risk heuristic: when its matcher fires, append one flag and add its weight
/// to the score. Fires at most once per diff.
pub struct RiskRule {
    name: String,
    matcher: Matcher,
    kind: FlagKind,
    message: String,
    weight: u32,
}

impl RiskRule {
    /// The three built-in groups, in evaluation order.
    pub fn builtin() -> Vec<RiskRule> {
        vec![
            Self::keywords(
                "destructive-database",
                &["DROP TABLE", "ALTER TABLE", "DELETE FROM"],
                FlagKind::Danger,
                "Destructive Database Operation detected.",
                5,
            ),
            Self::keywords(
                "auth-privacy",
                &["Auth::", "PrivacyCheck", "ViewerContext"],
                FlagKind::Warning,
                "Modifies Authentication or Privacy logic.",
                2,
            ),
            Self::keywords(
                "debug-residue",
                &["console.log", "var_dump"],
                FlagKind::Info,
                "Debug code (console.log) detected.",
                0,
            ),
        ]
    }

    fn keywords(
        name: &str,
        keywords: &'static [&'static str],
        kind: FlagKind,
        message: &str,
        weight: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            matcher: Matcher::Keywords(keywords),
            kind,
            message: message.to_string(),
            weight,
        }
    }

    /// Build an extra rule from config. The rule is named after its `name`
    /// field, or its pattern when unnamed.
    pub fn from_config(rule: &RuleConfig) -> Result<Self, ClassifierError> {
        let name = rule.name.clone().unwrap_or_else(|| rule.pattern.clone());
        let re = Regex::new(&rule.pattern).map_err(|source| ClassifierError::InvalidPattern {
            rule: name.clone(),
            source,
        })?;
        Ok(Self {
            name,
            matcher: Matcher::Pattern(re),
            kind: rule.kind,
            message: rule.message.clone(),
            weight: rule.weight,
        })
    }
}

impl Heuristic for RiskRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, diff: &str, mut acc: Accumulator) -> Accumulator {
        if self.matcher.is_match(diff) {
            acc.flags.push(Flag::new(self.kind, self.message.as_str()));
            acc.score = acc.score.saturating_add(self.weight);
            debug!(heuristic = %self.name, kind = %self.kind, score = acc.score, "risk pattern matched");
        }
        acc
    }
}
