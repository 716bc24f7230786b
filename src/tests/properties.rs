//! Property-based invariant tests over randomly shaped formula trees.
//!
//! Every generated tree has unique ids, assigned in pre-order, but no other guarantees: kinds,
//! values and arities are arbitrary, so most of the trees would not pass validation.

use proptest::prelude::*;
use proptest::sample::Index;

use crate::{
    FormulaNode, FormulaPiece, FormulaStats, FormulaStore, FormulaTree, PieceKind, PiecePatch,
    ToLatex, Validator,
    serialize::Serializable,
};

#[derive(Debug, Clone)]
struct Shape {
    kind: PieceKind,
    value: String,
    children: Vec<Shape>,
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let kind = || prop::sample::select(PieceKind::ALL.to_vec());
    let value = || "[a-z0-9+*/.=-]{0,3}";

    let leaf = (kind(), value()).prop_map(|(kind, value)| Shape { kind, value, children: vec![] });
    leaf.prop_recursive(4, 32, 4, move |inner| {
        (kind(), value(), prop::collection::vec(inner, 0..4))
            .prop_map(|(kind, value, children)| Shape { kind, value, children })
    })
}

fn build(shape: &Shape, next_id: &mut usize) -> FormulaNode {
    let piece = FormulaPiece::new(shape.kind, shape.value.clone(), shape.kind.default_category())
        .with_id(format!("p{}", next_id));
    *next_id += 1;

    let children = shape.children.iter().map(|c| build(c, next_id)).collect();
    FormulaNode::new(piece, children)
}

fn tree_strategy() -> impl Strategy<Value = FormulaTree> {
    shape_strategy().prop_map(|shape| FormulaTree::from(build(&shape, &mut 0)))
}

fn pick_id(tree: &FormulaTree, index: &Index) -> String {
    let ids = tree.iter().map(|n| n.id.to_string()).collect::<Vec<_>>();
    ids[index.index(ids.len())].clone()
}

proptest! {
    #[test]
    fn counts_are_consistent(tree in tree_strategy()) {
        let stats = FormulaStats::of(&tree);
        prop_assert_eq!(stats.node_count, tree.iter().count());
        prop_assert!(stats.node_count >= stats.depth);
        prop_assert!(stats.complexity >= stats.node_count);
        prop_assert_eq!(tree.verify(), Ok(()));
    }
}

proptest! {
    #[test]
    fn add_then_remove_restores(tree in tree_strategy(), index in any::<Index>()) {
        let parent = pick_id(&tree, &index);
        let added = tree.add_piece(
            FormulaPiece::new(PieceKind::Number, "1", PieceKind::Number.default_category()).with_id("added"),
            Some(parent.as_str()),
        ).unwrap();

        prop_assert_eq!(added.iter().count(), tree.iter().count() + 1);
        prop_assert_eq!(added.parent_of("added").unwrap().id.as_str(), parent.as_str());
        prop_assert_eq!(added.remove_piece("added").unwrap(), tree);
    }
}

proptest! {
    #[test]
    fn empty_patch_changes_nothing(tree in tree_strategy(), index in any::<Index>()) {
        let id = pick_id(&tree, &index);
        prop_assert_eq!(tree.update_piece(&id, &PiecePatch::new()).unwrap(), tree);
    }
}

proptest! {
    #[test]
    fn removal_takes_the_whole_subtree(tree in tree_strategy(), index in any::<Index>()) {
        let id = pick_id(&tree, &index);
        let subtree_size = tree.find(&id).unwrap().iter().count();
        let removed = tree.remove_piece(&id).unwrap();

        prop_assert_eq!(removed.iter().count(), tree.iter().count() - subtree_size);
        prop_assert!(!removed.contains(&id));
    }
}

proptest! {
    #[test]
    fn validation_is_idempotent(tree in tree_strategy()) {
        let validator = Validator::default();
        let report = validator.validate(&tree);
        prop_assert_eq!(&report, &validator.validate(&tree));
        prop_assert_eq!(report.is_valid, report.errors.is_empty());
    }
}

proptest! {
    #[test]
    fn serializer_is_deterministic(tree in tree_strategy()) {
        prop_assert_eq!(tree.to_latex(), tree.clone().to_latex());
    }
}

proptest! {
    #[test]
    fn store_matches_tree(tree in tree_strategy(), index in any::<Index>()) {
        let mut store = FormulaStore::from_tree(&tree).unwrap();
        prop_assert_eq!(&store.snapshot(), &tree);
        prop_assert_eq!(store.len(), tree.iter().count());

        let id = pick_id(&tree, &index);
        store.remove_piece(&id).unwrap();
        prop_assert_eq!(store.snapshot(), tree.remove_piece(&id).unwrap());
    }
}

proptest! {
    #[test]
    fn codec_round_trips(tree in tree_strategy()) {
        let bytes = tree.serialize();
        let decoded = FormulaTree::deserialize(&mut bytes.clone().into_iter()).unwrap();

        prop_assert_eq!(decoded.serialize(), bytes);
        prop_assert_eq!(decoded.to_latex(), tree.to_latex());
    }
}
