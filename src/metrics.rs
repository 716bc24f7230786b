//! Size and complexity measurements of formula trees.

use core::cmp::max;

use serde::{Deserialize, Serialize};

use crate::node::{FormulaNode, FormulaTree, PieceKind};

/// The number of levels in the subtree; a leaf has depth 1.
pub fn depth(node: &FormulaNode) -> usize {
    1 + node.children.iter().map(depth).fold(0, max)
}

pub fn node_count(node: &FormulaNode) -> usize {
    1 + node.children.iter().map(node_count).sum::<usize>()
}

/// The extra weight a node of this kind adds on top of the base weight of 1.
fn complexity_bonus(kind: PieceKind) -> usize {
    match kind {
        PieceKind::Function | PieceKind::Fraction | PieceKind::Power | PieceKind::Root => 2,
        PieceKind::Sum | PieceKind::Product | PieceKind::Integral => 3,

        PieceKind::Number | PieceKind::Variable | PieceKind::Operator
            | PieceKind::Bracket | PieceKind::Empty => 0,
    }
}

/// A rough score of how hard the formula is to read, weighting structural pieces above plain
/// symbols.
pub fn complexity(node: &FormulaNode) -> usize {
    1 + complexity_bonus(node.piece.kind) + node.children.iter().map(complexity).sum::<usize>()
}

/// The total length, in characters, of the raw piece values in the subtree. This is not the
/// length of the serialized markup.
pub fn serialized_length(node: &FormulaNode) -> usize {
    node.iter().map(|n| n.piece.value.chars().count()).sum()
}

/// All of the measurements of a tree together. An empty tree measures 0 everywhere.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FormulaStats {
    pub depth: usize,
    pub node_count: usize,
    pub complexity: usize,
    pub serialized_length: usize,
}

impl FormulaStats {
    pub fn of(tree: &FormulaTree) -> Self {
        match &tree.root {
            Some(root) => Self::of_node(root),
            None => Self::default(),
        }
    }

    pub fn of_node(node: &FormulaNode) -> Self {
        Self {
            depth: depth(node),
            node_count: node_count(node),
            complexity: complexity(node),
            serialized_length: serialized_length(node),
        }
    }
}
