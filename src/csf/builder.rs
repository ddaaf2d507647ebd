//! Rebuilds the framework tree from merged-cell rows.
//!
//! A non-empty label cell opens a new node at its level and closes every
//! deeper level; an empty label cell continues the node opened above it.
//! The fourth column of every data row is one Reference for the innermost
//! open Subcategory.

use tracing::{debug, info};

use crate::common::{Error, Result};
use crate::sheet::Row;

use super::label::Label;
use super::model::{Category, Function, Node, NodeKind, Reference, Subcategory, Tree};
use super::reference::ReferenceParseError;

/// Number of leading label columns (Function, Category, Subcategory).
pub const LABEL_COLUMNS: usize = 3;

/// Column holding the Informative Reference.
pub const REFERENCE_COLUMN: usize = 3;

/// Incremental tree builder fed one row at a time.
///
/// The stack of insertion targets is implicit: `depth` counts the open
/// levels, and the target at each level is the last child of the level
/// above it.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    functions: Vec<Function>,
    depth: usize,
}

impl HierarchyBuilder {
    /// Create a builder with nothing open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open levels (0 = only the root list).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Consume one data row.
    pub fn push_row(&mut self, row: &Row) -> Result<()> {
        for column in 0..LABEL_COLUMNS {
            let Some(text) = row.text(column) else {
                continue;
            };
            let Some(kind) = NodeKind::from_column(column) else {
                continue;
            };

            if self.depth < column {
                return Err(Error::Structure {
                    row: row.number,
                    reason: format!(
                        "{} {:?} has no enclosing {}",
                        kind,
                        text,
                        NodeKind::ALL[self.depth]
                    ),
                });
            }

            let label = Label::parse(&text).ok_or_else(|| Error::Grammar {
                row: row.number,
                column,
                text: text.to_string(),
            })?;

            // Truncate to this level, then open the new node.
            self.depth = column;
            debug!(row = row.number, kind = %kind, id = %label.id, "opening node");
            self.open(kind, label, row.number)?;
            self.depth = column + 1;
        }

        let text = row.text(REFERENCE_COLUMN).ok_or_else(|| Error::Structure {
            row: row.number,
            reason: "missing Informative Reference".to_string(),
        })?;

        let reference = Reference::parse(&text).map_err(|e| match e {
            ReferenceParseError::Grammar => Error::Grammar {
                row: row.number,
                column: REFERENCE_COLUMN,
                text: text.to_string(),
            },
            ReferenceParseError::UnknownStandard => Error::UnknownStandard {
                row: row.number,
                text: text.to_string(),
            },
        })?;

        if self.depth != LABEL_COLUMNS {
            return Err(Error::Structure {
                row: row.number,
                reason: format!("reference {:?} has no enclosing subcategory", text),
            });
        }

        self.current_subcategory(row.number)?.children.push(reference);
        Ok(())
    }

    /// Finish the pass and return the tree.
    pub fn finish(self) -> Tree {
        Tree {
            functions: self.functions,
        }
    }

    /// Append a node at `kind`'s level under the currently open parent.
    fn open(&mut self, kind: NodeKind, label: Label, row: u32) -> Result<()> {
        match kind {
            NodeKind::Function => self.functions.push(Node::new(kind, label)),
            NodeKind::Category => self.current_function(row)?.children.push(Node::new(kind, label)),
            NodeKind::Subcategory => self.current_category(row)?.children.push(Node::new(kind, label)),
        }
        Ok(())
    }

    fn current_function(&mut self, row: u32) -> Result<&mut Function> {
        self.functions.last_mut().ok_or_else(|| missing(row, NodeKind::Function))
    }

    fn current_category(&mut self, row: u32) -> Result<&mut Category> {
        self.current_function(row)?
            .children
            .last_mut()
            .ok_or_else(|| missing(row, NodeKind::Category))
    }

    fn current_subcategory(&mut self, row: u32) -> Result<&mut Subcategory> {
        self.current_category(row)?
            .children
            .last_mut()
            .ok_or_else(|| missing(row, NodeKind::Subcategory))
    }
}

fn missing(row: u32, kind: NodeKind) -> Error {
    Error::Structure {
        row,
        reason: format!("no open {}", kind),
    }
}

/// Build the tree from worksheet rows, skipping `header_rows` leading rows.
///
/// Rows with no content at all are skipped; every other row is a data row.
pub fn build_tree<'a, I>(rows: I, header_rows: usize) -> Result<Tree>
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut builder = HierarchyBuilder::new();

    for row in rows.into_iter().skip(header_rows) {
        if row.is_blank() {
            debug!(row = row.number, "skipping blank row");
            continue;
        }
        builder.push_row(row)?;
    }

    let tree = builder.finish();
    let summary = tree.summary();
    info!(
        functions = summary.functions,
        categories = summary.categories,
        subcategories = summary.subcategories,
        references = summary.references,
        "framework tree built"
    );
    Ok(tree)
}
