use serde::Serialize;

/// A built-in sample diff for trying the tool without pasting anything.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Demo {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub diff: &'static str,
}

pub const DEMOS: &[Demo] = &[
    Demo {
        key: "high-risk-auth",
        name: "High Risk: Auth Bypass Change",
        description: "Security-critical authentication modification",
        diff: include_str!("../tests/fixtures/high_risk_auth.patch"),
    },
    Demo {
        key: "high-risk-database",
        name: "High Risk: Database Migration",
        description: "Destructive database operations",
        diff: include_str!("../tests/fixtures/high_risk_database.patch"),
    },
    Demo {
        key: "low-risk-styling",
        name: "Low Risk: UI Styling Update",
        description: "Harmless CSS/className change",
        diff: include_str!("../tests/fixtures/low_risk_styling.patch"),
    },
    Demo {
        key: "medium-risk-lifecycle",
        name: "Medium Risk: React Lifecycle Change",
        description: "Component lifecycle modification",
        diff: include_str!("../tests/fixtures/medium_risk_lifecycle.patch"),
    },
    Demo {
        key: "debug-code",
        name: "Info: Debug Code Detected",
        description: "Console logs and debug statements",
        diff: include_str!("../tests/fixtures/debug_code.patch"),
    },
    Demo {
        key: "complex-multi-file",
        name: "Complex: Multi-File Change",
        description: "Multiple file types, mixed risk",
        diff: include_str!("../tests/fixtures/complex_multi_file.patch"),
    },
];

pub fn find(key: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|d| d.key == key)
}
