//! The formula store, which owns the current formula and the selected piece.
//!
//! Nodes live in a generational arena and refer to their parent and children by index, and an id
//! map finds any node directly. Attaching and updating a piece are therefore constant-time lookups
//! and detaching is proportional to the removed subtree, rather than rebuilding the whole tree as
//! the [FormulaTree] operations do. The two give the same results; [FormulaStore::snapshot] hands
//! out the current formula as a [FormulaTree] value.

use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::connect::can_connect;
use crate::error::{TreeError, TreeResult};
use crate::node::{FormulaNode, FormulaPiece, FormulaTree, PieceId, PiecePatch};

#[derive(Debug)]
struct StoreNode {
    piece: FormulaPiece,
    parent: Option<Index>,
    children: Vec<Index>,
}

/// The single owner of the formula being edited.
///
/// Mutation takes `&mut self`, so there is only ever one writer. Every successful mutation bumps
/// [FormulaStore::generation]; a caller which saves a snapshot can compare generations when the
/// save completes to tell whether the response is stale.
#[derive(Debug, Default)]
pub struct FormulaStore {
    arena: Arena<StoreNode>,
    root: Option<Index>,
    ids: HashMap<PieceId, Index>,
    selected: Option<PieceId>,
    generation: u64,
}

impl FormulaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store holding `tree`, e.g. one which has just been loaded.
    #[instrument(level = "debug", skip(tree))]
    pub fn from_tree(tree: &FormulaTree) -> TreeResult<Self> {
        tree.verify()?;

        let mut store = Self::new();
        if let Some(root) = &tree.root {
            store.insert_subtree(root, None);
        }
        Ok(store)
    }

    fn insert_subtree(&mut self, node: &FormulaNode, parent: Option<Index>) {
        let idx = self.insert_node(node.piece.clone(), parent);
        for child in &node.children {
            self.insert_subtree(child, Some(idx));
        }
    }

    fn insert_node(&mut self, piece: FormulaPiece, parent: Option<Index>) -> Index {
        let id = piece.id.clone();
        let idx = self.arena.insert(StoreNode { piece, parent, children: Vec::new() });

        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(parent) => parent.children.push(idx),
            None => self.root = Some(idx),
        }
        self.ids.insert(id, idx);
        idx
    }

    fn index_of(&self, id: &str) -> Option<Index> {
        self.ids.get(id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, id: &str) -> Option<&FormulaPiece> {
        self.arena.get(self.index_of(id)?).map(|n| &n.piece)
    }

    /// The root piece, if the formula is not empty.
    pub fn root(&self) -> Option<&FormulaPiece> {
        self.arena.get(self.root?).map(|n| &n.piece)
    }

    pub fn parent_of(&self, id: &str) -> Option<&FormulaPiece> {
        let parent = self.arena.get(self.index_of(id)?)?.parent?;
        self.arena.get(parent).map(|n| &n.piece)
    }

    /// The children of a piece, in order. Unknown ids have no children.
    pub fn children_of(&self, id: &str) -> Vec<&FormulaPiece> {
        self.index_of(id)
            .and_then(|idx| self.arena.get(idx))
            .map(|n| n.children.iter().filter_map(|&c| self.arena.get(c)).map(|c| &c.piece).collect())
            .unwrap_or_default()
    }

    /// Attaches `piece` as the last child of `parent_id`, or as the root if the formula is empty.
    /// Follows the same rules as [FormulaTree::add_piece].
    #[instrument(level = "trace", skip(self, piece), fields(piece = %piece.id))]
    pub fn add_piece(&mut self, piece: FormulaPiece, parent_id: Option<&str>) -> TreeResult<()> {
        if self.root.is_none() {
            debug!(piece = %piece.id, "starting new formula");
            self.insert_node(piece, None);
            self.generation += 1;
            return Ok(());
        }

        if self.contains(piece.id.as_str()) {
            return Err(TreeError::DuplicatePiece(piece.id.to_string()));
        }

        let parent_id = parent_id.ok_or(TreeError::ParentRequired)?;
        let parent = self.index_of(parent_id)
            .ok_or_else(|| TreeError::ParentNotFound(parent_id.to_string()))?;

        debug!(piece = %piece.id, parent = parent_id, "attaching piece");
        self.insert_node(piece, Some(parent));
        self.generation += 1;
        Ok(())
    }

    /// Like [FormulaStore::add_piece], but first checks the connectivity rules between the parent
    /// and the new piece.
    pub fn attach_checked(&mut self, piece: FormulaPiece, parent_id: &str) -> TreeResult<()> {
        if let Some(parent) = self.get(parent_id) {
            if !can_connect(parent, &piece) {
                return Err(TreeError::Incompatible { parent: parent.kind, child: piece.kind });
            }
        }
        self.add_piece(piece, Some(parent_id))
    }

    /// Removes a piece along with all of its descendants, and returns them. If the selected piece
    /// was among them, the selection is cleared.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_piece(&mut self, id: &str) -> TreeResult<FormulaNode> {
        let idx = self.index_of(id).ok_or_else(|| TreeError::PieceNotFound(id.to_string()))?;
        let parent = self.arena.get(idx)
            .ok_or_else(|| TreeError::Internal(format!("id {} maps to a freed node", id)))?
            .parent;

        match parent {
            Some(p) => {
                if let Some(parent) = self.arena.get_mut(p) {
                    parent.children.retain(|&c| c != idx);
                }
            }
            None => self.root = None,
        }

        let removed = self.take_subtree(idx)?;
        if self.selected.as_ref().is_some_and(|s| removed.find(s.as_str()).is_some()) {
            debug!(piece = id, "selected piece removed, clearing selection");
            self.selected = None;
        }

        debug!(piece = id, removed = removed.iter().count(), "removed subtree");
        self.generation += 1;
        Ok(removed)
    }

    fn take_subtree(&mut self, idx: Index) -> TreeResult<FormulaNode> {
        let node = self.arena.remove(idx)
            .ok_or_else(|| TreeError::Internal("subtree refers to a freed node".to_string()))?;
        self.ids.remove(node.piece.id.as_str());

        let children = node.children.into_iter()
            .map(|c| self.take_subtree(c))
            .collect::<TreeResult<Vec<_>>>()?;
        Ok(FormulaNode::new(node.piece, children))
    }

    /// Merges `patch` into a piece.
    #[instrument(level = "trace", skip(self, patch))]
    pub fn update_piece(&mut self, id: &str, patch: &PiecePatch) -> TreeResult<()> {
        let node = self.index_of(id)
            .and_then(|idx| self.arena.get_mut(idx))
            .ok_or_else(|| TreeError::PieceNotFound(id.to_string()))?;

        node.piece.apply(patch);
        self.generation += 1;
        Ok(())
    }

    /// The selected piece, if any.
    pub fn selected(&self) -> Option<&FormulaPiece> {
        self.get(self.selected.as_ref()?.as_str())
    }

    /// Selects a piece. Selection is independent of the formula, so this does not change the
    /// generation.
    pub fn select(&mut self, id: &str) -> TreeResult<()> {
        let idx = self.index_of(id).ok_or_else(|| TreeError::PieceNotFound(id.to_string()))?;
        let piece = self.arena.get(idx)
            .ok_or_else(|| TreeError::Internal(format!("id {} maps to a freed node", id)))?;
        self.selected = Some(piece.piece.id.clone());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The current formula as a tree value.
    pub fn snapshot(&self) -> FormulaTree {
        FormulaTree { root: self.root.and_then(|r| self.build_node(r)) }
    }

    fn build_node(&self, idx: Index) -> Option<FormulaNode> {
        let node = self.arena.get(idx)?;
        let children = node.children.iter().filter_map(|&c| self.build_node(c)).collect();
        Some(FormulaNode::new(node.piece.clone(), children))
    }
}
