//! Weave Formatter
//!
//! Re-indents lossless semantic trees. [`TabsAndIndents`] rewrites only the
//! whitespace (and comment text) that starts a line so every statement, wrapped
//! continuation and closing delimiter sits at the column implied by its
//! position in the tree. Everything within a line is left as written.
//!
//! ```ignore
//! use weave_formatter::prelude::*;
//!
//! let formatter = TabsAndIndents::new(TabsAndIndentsStyle::default());
//! let formatted = formatter.format(&unit)?;
//! ```

mod indent;
mod tabs_and_indents;

use rayon::prelude::*;
use tracing::{debug, warn};
use weave_core::{Node, Result, TabsAndIndentsStyle, TreeVisitor};

pub use indent::{column_width, indentation, measure};
pub use tabs_and_indents::{IndentPolicy, TabsAndIndentsVisitor, classify};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tabs-and-indents formatter for a fixed style
#[derive(Debug, Clone, Default)]
pub struct TabsAndIndents {
    style: TabsAndIndentsStyle,
}

impl TabsAndIndents {
    pub fn new(style: TabsAndIndentsStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &TabsAndIndentsStyle {
        &self.style
    }

    /// Format a whole compilation unit. An already formatted unit is returned
    /// as the same instance.
    pub fn format(&self, unit: &Node) -> Result<Node> {
        self.format_subtree(unit, &[])
    }

    /// Format `node` as if the traversal had reached it through `ancestors`,
    /// listed from the root down to `node`'s parent.
    pub fn format_subtree<'a>(&self, node: &'a Node, ancestors: &[&'a Node]) -> Result<Node> {
        self.style.validate()?;

        let mut visitor = TabsAndIndentsVisitor::new(self.style.clone());
        visitor.seed(ancestors);
        let formatted = visitor.visit(node)?;

        debug!(
            kind = node.kind().name(),
            changed = formatted.is_some(),
            "formatted tabs and indents"
        );
        Ok(formatted.unwrap_or_else(|| node.clone()))
    }

    /// Format independent units in parallel. Results keep the input order and
    /// a failing unit does not affect the others.
    pub fn format_all(&self, units: &[Node]) -> Vec<Result<Node>> {
        units
            .par_iter()
            .enumerate()
            .map(|(index, unit)| {
                let result = self.format(unit);
                if let Err(e) = &result {
                    warn!(
                        unit = index,
                        recoverable = e.is_recoverable(),
                        error = %e,
                        "failed to format unit"
                    );
                }
                result
            })
            .collect()
    }
}

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use super::{IndentPolicy, TabsAndIndents};
    pub use weave_core::{Node, Result, TabsAndIndentsStyle, WeaveError};
}
