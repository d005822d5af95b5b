//! Terminal rendering for comparison reports. Markdown goes in, styled terminal
//! output comes out; the heavy lifting is `termimad`'s.

use termimad::MadSkin;
use crate::compare::Comparison;

/// Print markdown to the terminal with the default skin.
pub fn print_markdown(markdown: &str) {
    MadSkin::default().print_text(markdown);
}

/// Printer for side-by-side comparison reports.
pub struct ComparisonPrinter {
    pub skin: MadSkin,
}

impl Default for ComparisonPrinter {
    fn default() -> Self {
        Self { skin: MadSkin::default() }
    }
}

impl ComparisonPrinter {
    pub fn print(&self, comparison: &Comparison) {
        self.skin.print_text(&comparison.to_markdown());
    }
}
