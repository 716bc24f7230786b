//! The shape in which formulas are handed to, and received from, the storage service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RecordError;
use crate::latex::ToLatex;
use crate::node::FormulaTree;

/// A saved formula, as stored by the storage service.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FormulaRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,

    /// The tree itself, `null` when empty.
    pub formula_data: FormulaTree,

    /// The markup for `formula_data`, kept so that listings can be rendered without the tree.
    #[serde(default)]
    pub latex_content: String,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub is_public: bool,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl FormulaRecord {
    /// Creates a new private, untagged record for `tree`.
    pub fn new(user_id: Uuid, name: impl Into<String>, tree: FormulaTree) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            latex_content: tree.to_latex(),
            formula_data: tree,
            created_at: Utc::now(),
            updated_at: None,
            is_public: false,
            tags: Vec::new(),
        }
    }

    /// Replaces the name and tree, refreshing the markup and the update time.
    pub fn revise(&mut self, name: impl Into<String>, tree: FormulaTree) {
        self.name = name.into();
        self.latex_content = tree.to_latex();
        self.formula_data = tree;
        self.updated_at = Some(Utc::now());
    }

    pub fn summary(&self) -> FormulaSummary {
        FormulaSummary {
            id: self.id,
            name: self.name.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a record, rejecting trees whose node ids are inconsistent.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        let record: Self = serde_json::from_str(json)?;
        record.formula_data.verify()?;
        Ok(record)
    }
}

/// The columns shown when listing a user's formulas.
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct FormulaSummary {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
