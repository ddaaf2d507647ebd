//! Tree types produced from the framework core.
//!
//! The three taxonomy levels share one generic [`Node`] type; the level is
//! fixed by the child type, so a Reference can only ever sit under a
//! Subcategory.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::label::Label;

/// Hierarchy level of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Function,
    Category,
    Subcategory,
}

impl NodeKind {
    /// Levels in spreadsheet column order.
    pub const ALL: [NodeKind; 3] = [NodeKind::Function, NodeKind::Category, NodeKind::Subcategory];

    /// Level stored in the given label column (0-2).
    pub fn from_column(column: usize) -> Option<Self> {
        Self::ALL.get(column).copied()
    }

    /// Label column holding this level.
    pub fn column(self) -> usize {
        match self {
            NodeKind::Function => 0,
            NodeKind::Category => 1,
            NodeKind::Subcategory => 2,
        }
    }

    /// Value of the `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Function => "function",
            NodeKind::Category => "category",
            NodeKind::Subcategory => "subcategory",
        }
    }

    /// Name of the field listing this node's children.
    pub fn children_field(self) -> &'static str {
        match self {
            NodeKind::Function => "categories",
            NodeKind::Category => "subcategories",
            NodeKind::Subcategory => "references",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Function, Category or Subcategory.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<C> {
    /// Short code, e.g. `ID.AM`
    pub id: String,
    /// Display name, present when the cell reads `Name (ID)`
    pub name: Option<String>,
    /// Level discriminator
    pub kind: NodeKind,
    /// Text after `: ` in the cell
    pub description: Option<String>,
    /// Direct children in row order
    pub children: Vec<C>,
}

impl<C> Node<C> {
    /// Create a childless node from a parsed label.
    pub fn new(kind: NodeKind, label: Label) -> Self {
        Self {
            id: label.id,
            name: label.name,
            kind,
            description: label.description,
            children: Vec::new(),
        }
    }
}

// Field order is part of the output format: id, name, type, description, children.
impl<C: Serialize> Serialize for Node<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = 3 + usize::from(self.name.is_some()) + usize::from(self.description.is_some());
        let mut state = serializer.serialize_struct("Node", len)?;
        state.serialize_field("id", &self.id)?;
        if let Some(name) = &self.name {
            state.serialize_field("name", name)?;
        }
        state.serialize_field("type", &self.kind)?;
        if let Some(description) = &self.description {
            state.serialize_field("description", description)?;
        }
        state.serialize_field(self.kind.children_field(), &self.children)?;
        state.end()
    }
}

pub type Subcategory = Node<Reference>;
pub type Category = Node<Subcategory>;
pub type Function = Node<Category>;

/// Standards recognized in the Informative References column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Standard {
    CcsCsc,
    Cobit5,
    Isa62443_2_1_2009,
    Isa62443_3_3_2013,
    Isa62443_2_1,
    IsoIec27001_2013,
    NistSp800_53Rev4,
}

impl Standard {
    pub const ALL: [Standard; 7] = [
        Standard::CcsCsc,
        Standard::Cobit5,
        Standard::Isa62443_2_1_2009,
        Standard::Isa62443_3_3_2013,
        Standard::Isa62443_2_1,
        Standard::IsoIec27001_2013,
        Standard::NistSp800_53Rev4,
    ];

    /// Name as written in the spreadsheet and in the output.
    pub fn name(self) -> &'static str {
        match self {
            Standard::CcsCsc => "CCS CSC",
            Standard::Cobit5 => "COBIT 5",
            Standard::Isa62443_2_1_2009 => "ISA 62443-2-1:2009",
            Standard::Isa62443_3_3_2013 => "ISA 62443-3-3:2013",
            Standard::Isa62443_2_1 => "ISA 62443-2-1",
            Standard::IsoIec27001_2013 => "ISO/IEC 27001:2013",
            Standard::NistSp800_53Rev4 => "NIST SP 800-53 Rev. 4",
        }
    }

    /// Match a standard name at the start of `text`.
    ///
    /// The longest matching name wins, so `ISA 62443-2-1:2009` is never
    /// split into `ISA 62443-2-1` plus a stray `:2009`. Returns the
    /// standard and the remaining text.
    pub fn match_prefix(text: &str) -> Option<(Standard, &str)> {
        Self::ALL
            .iter()
            .filter_map(|standard| text.strip_prefix(standard.name()).map(|rest| (*standard, rest)))
            .max_by_key(|(standard, _)| standard.name().len())
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Standard {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|standard| standard.name() == s)
            .ok_or_else(|| format!("Unrecognized standard '{}'", s))
    }
}

impl Serialize for Standard {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// An Informative Reference: controls of one standard cited by a Subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub standard: Standard,
    pub controls: Vec<String>,
}

/// Counts of each entity in a [`Tree`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeSummary {
    pub functions: usize,
    pub categories: usize,
    pub subcategories: usize,
    pub references: usize,
}

/// The whole framework core: Functions in row order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Tree {
    pub functions: Vec<Function>,
}

impl Tree {
    /// Count every entity in the tree.
    pub fn summary(&self) -> TreeSummary {
        let mut summary = TreeSummary {
            functions: self.functions.len(),
            ..TreeSummary::default()
        };
        for function in &self.functions {
            summary.categories += function.children.len();
            for category in &function.children {
                summary.subcategories += category.children.len();
                for subcategory in &category.children {
                    summary.references += subcategory.children.len();
                }
            }
        }
        summary
    }

    /// Find a Subcategory by id anywhere in the tree.
    pub fn subcategory(&self, id: &str) -> Option<&Subcategory> {
        self.functions
            .iter()
            .flat_map(|f| &f.children)
            .flat_map(|c| &c.children)
            .find(|s| s.id == id)
    }
}
