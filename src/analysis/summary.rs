use tracing::debug;

use super::{Accumulator, Heuristic};

/// Appends a summary line when any marker is present (case-sensitive).
///
/// With `requires_zero_score`, the line is only added while the accumulated
/// risk score is exactly zero. Rules are independent of each other, so more
/// than one line can be added.
pub struct SummaryRule {
    name: &'static str,
    markers: &'static [&'static str],
    requires_zero_score: bool,
    line: &'static str,
}

impl SummaryRule {
    pub fn builtin() -> [SummaryRule; 2] {
        [
            SummaryRule {
                name: "lifecycle",
                markers: &["useEffect", "componentDidMount"],
                requires_zero_score: false,
                line: "Modifies component lifecycle methods.",
            },
            SummaryRule {
                name: "ui-styling",
                markers: &["className="],
                requires_zero_score: true,
                line: "Appears to be primarily a UI/Styling update.",
            },
        ]
    }
}

impl Heuristic for SummaryRule {
    fn name(&self) -> &str {
        self.name
    }

    fn apply(&self, diff: &str, mut acc: Accumulator) -> Accumulator {
        if self.requires_zero_score && acc.score != 0 {
            return acc;
        }
        if self.markers.iter().any(|m| diff.contains(m)) {
            debug!(heuristic = self.name, "summary line added");
            acc.summary.push(self.line.to_string());
        }
        acc
    }
}

/// Fallback line so the summary is never empty. Must run last.
pub struct DefaultSummary;

impl Heuristic for DefaultSummary {
    fn name(&self) -> &str {
        "default-summary"
    }

    fn apply(&self, _diff: &str, mut acc: Accumulator) -> Accumulator {
        if acc.summary.is_empty() {
            acc.summary.push("General logic update.".to_string());
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> SummaryRule {
        SummaryRule::builtin()
            .into_iter()
            .find(|r| r.name == name)
            .unwrap()
    }

    #[test]
    fn test_lifecycle_markers() {
        let rule = rule("lifecycle");
        for diff in ["useEffect(() => {})", "componentDidMount() {"] {
            let acc = rule.apply(diff, Accumulator::default());
            assert_eq!(acc.summary, vec!["Modifies component lifecycle methods."]);
        }
    }

    #[test]
    fn test_lifecycle_ignores_score() {
        let acc = Accumulator {
            score: 7,
            ..Accumulator::default()
        };
        let acc = rule("lifecycle").apply("useEffect", acc);
        assert_eq!(acc.summary.len(), 1);
    }

    #[test]
    fn test_styling_requires_zero_score() {
        let rule = rule("ui-styling");
        let quiet = rule.apply("className=\"x\"", Accumulator::default());
        assert_eq!(quiet.summary.len(), 1);

        let risky = Accumulator {
            score: 1,
            ..Accumulator::default()
        };
        assert!(rule.apply("className=\"x\"", risky).summary.is_empty());
    }

    #[test]
    fn test_styling_marker_is_case_sensitive() {
        let acc = rule("ui-styling").apply("classname=\"x\"", Accumulator::default());
        assert!(acc.summary.is_empty());
    }

    #[test]
    fn test_default_summary_only_when_empty() {
        let empty = DefaultSummary.apply("", Accumulator::default());
        assert_eq!(empty.summary, vec!["General logic update."]);

        let filled = Accumulator {
            summary: vec!["Modifies component lifecycle methods.".to_string()],
            ..Accumulator::default()
        };
        let filled = DefaultSummary.apply("", filled);
        assert_eq!(filled.summary.len(), 1);
    }
}
