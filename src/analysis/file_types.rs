use tracing::debug;

use super::{Accumulator, Heuristic};

/// Appends a category label when any of its markers appears in the diff.
/// Markers are compared case-sensitively.
pub struct FileTypeRule {
    label: &'static str,
    markers: &'static [&'static str],
}

impl FileTypeRule {
    pub fn builtin() -> [FileTypeRule; 3] {
        [
            FileTypeRule {
                label: "React Component",
                markers: &[".jsx", ".tsx"],
            },
            FileTypeRule {
                label: "Hack/Backend",
                markers: &[".php", ".hh"],
            },
            FileTypeRule {
                label: "Database Migration",
                markers: &[".sql"],
            },
        ]
    }
}

impl Heuristic for FileTypeRule {
    fn name(&self) -> &str {
        self.label
    }

    fn apply(&self, diff: &str, mut acc: Accumulator) -> Accumulator {
        if self.markers.iter().any(|m| diff.contains(m)) {
            debug!(heuristic = self.label, "file type detected");
            acc.file_types.push(self.label.to_string());
        }
        acc
    }
}
