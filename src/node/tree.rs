//! The formula tree itself, and the pure operations which derive one snapshot from another.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{TreeError, TreeResult};
use crate::node::{FormulaPiece, PieceId, PiecePatch};

/// A node in a formula tree, pairing a piece with its ordered children.
///
/// `id` always mirrors `piece.id`; constructors take care of this, and [FormulaTree::verify]
/// checks it for trees which came from elsewhere (e.g. JSON).
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FormulaNode {
    pub id: PieceId,
    pub piece: FormulaPiece,
    pub children: Vec<FormulaNode>,
}

impl FormulaNode {
    pub fn new(piece: FormulaPiece, children: Vec<FormulaNode>) -> Self {
        Self { id: piece.id.clone(), piece, children }
    }

    /// Creates a node with no children.
    pub fn leaf(piece: FormulaPiece) -> Self {
        Self::new(piece, Vec::new())
    }

    /// Returns the child at `index`, if there is one.
    pub fn child(&self, index: usize) -> Option<&FormulaNode> {
        self.children.get(index)
    }

    /// Iterates over this node and all of its descendants, in pre-order.
    pub fn iter(&self) -> Nodes<'_> {
        Nodes { stack: vec![self] }
    }

    /// Finds the node with the given id within this subtree.
    pub fn find(&self, id: &str) -> Option<&FormulaNode> {
        self.iter().find(|n| n.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut FormulaNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Removes the descendant with the given id, returning it with its whole subtree.
    fn detach(&mut self, id: &str) -> Option<FormulaNode> {
        if let Some(index) = self.children.iter().position(|c| c.id == id) {
            return Some(self.children.remove(index));
        }
        self.children.iter_mut().find_map(|c| c.detach(id))
    }

    /// A deep copy of this subtree where every piece has a fresh id.
    pub fn duplicate(&self) -> FormulaNode {
        FormulaNode::new(
            self.piece.duplicate(),
            self.children.iter().map(|c| c.duplicate()).collect(),
        )
    }
}

/// Pre-order iterator over a subtree, see [FormulaNode::iter].
pub struct Nodes<'a> {
    stack: Vec<&'a FormulaNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a FormulaNode;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        self.stack.extend(current.children.iter().rev());
        Some(current)
    }
}

/// A whole formula: either a single root node, or nothing yet.
///
/// Trees are values. Every operation below leaves `self` alone and returns a new snapshot, which
/// the caller adopts as its current tree. Lookups walk the whole tree, so each operation is `O(n)`;
/// see [crate::store::FormulaStore] for the indexed equivalent.
#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormulaTree {
    pub root: Option<FormulaNode>,
}

impl From<FormulaNode> for FormulaTree {
    fn from(root: FormulaNode) -> Self {
        Self { root: Some(root) }
    }
}

impl FormulaTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Iterates over every node in the tree, in pre-order.
    pub fn iter(&self) -> Nodes<'_> {
        Nodes { stack: self.root.iter().collect() }
    }

    pub fn find(&self, id: &str) -> Option<&FormulaNode> {
        self.root.as_ref()?.find(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Returns the parent of the node with the given id. The root has no parent.
    pub fn parent_of(&self, id: &str) -> Option<&FormulaNode> {
        self.iter().find(|n| n.children.iter().any(|c| c.id == id))
    }

    /// Attaches `piece` to the tree.
    ///
    /// An empty tree gains `piece` as its root, and `parent_id` is ignored. Otherwise the piece
    /// becomes the last child of the node named by `parent_id`.
    #[instrument(level = "trace", skip(self, piece), fields(piece = %piece.id))]
    pub fn add_piece(&self, piece: FormulaPiece, parent_id: Option<&str>) -> TreeResult<FormulaTree> {
        let Some(root) = &self.root else {
            debug!(piece = %piece.id, "starting new tree");
            return Ok(FormulaNode::leaf(piece).into());
        };

        if root.find(piece.id.as_str()).is_some() {
            return Err(TreeError::DuplicatePiece(piece.id.to_string()));
        }

        let parent_id = parent_id.ok_or(TreeError::ParentRequired)?;
        let mut next = self.clone();
        let parent = next.root.as_mut()
            .and_then(|r| r.find_mut(parent_id))
            .ok_or_else(|| TreeError::ParentNotFound(parent_id.to_string()))?;

        parent.children.push(FormulaNode::leaf(piece));
        Ok(next)
    }

    /// Removes the node with the given id, along with its entire subtree. Removing the root
    /// leaves an empty tree.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_piece(&self, id: &str) -> TreeResult<FormulaTree> {
        let root = self.root.as_ref()
            .ok_or_else(|| TreeError::PieceNotFound(id.to_string()))?;

        if root.id == id {
            return Ok(FormulaTree::new());
        }

        let mut next = self.clone();
        next.root.as_mut()
            .and_then(|r| r.detach(id))
            .ok_or_else(|| TreeError::PieceNotFound(id.to_string()))?;
        Ok(next)
    }

    /// Merges `patch` into the piece with the given id. Tree structure is unchanged.
    #[instrument(level = "trace", skip(self, patch))]
    pub fn update_piece(&self, id: &str, patch: &PiecePatch) -> TreeResult<FormulaTree> {
        let mut next = self.clone();
        let node = next.root.as_mut()
            .and_then(|r| r.find_mut(id))
            .ok_or_else(|| TreeError::PieceNotFound(id.to_string()))?;

        node.piece.apply(patch);
        Ok(next)
    }

    /// Checks that every node id matches its piece id, and that no id appears twice.
    pub fn verify(&self) -> TreeResult<()> {
        let mut seen = HashSet::new();
        for node in self.iter() {
            if node.id != node.piece.id {
                return Err(TreeError::IdMismatch {
                    node: node.id.to_string(),
                    piece: node.piece.id.to_string(),
                });
            }
            if !seen.insert(node.id.as_str()) {
                return Err(TreeError::DuplicatePiece(node.id.to_string()));
            }
        }
        Ok(())
    }
}
