use crate::{
    FormulaStats, FormulaTree,
    metrics::{complexity, depth, node_count, serialized_length},
    tests::util::complex_formula,
};

#[test]
fn test_leaf() {
    let leaf = node!(Number, "n", "42");
    assert_eq!(depth(&leaf), 1);
    assert_eq!(node_count(&leaf), 1);
    assert_eq!(complexity(&leaf), 1);
    assert_eq!(serialized_length(&leaf), 2);
}

#[test]
fn test_weights() {
    assert_eq!(complexity(&node!(Function, "f", "sin")), 3);
    assert_eq!(complexity(&node!(Fraction, "f", "frac"; node!(Number, "a", "1"), node!(Number, "b", "2"))), 5);
    assert_eq!(complexity(&node!(Sum, "s", "Σ")), 4);
    assert_eq!(complexity(&node!(Bracket, "b", "()"; node!(Variable, "x", "x"))), 2);
}

#[test]
fn test_complex_formula() {
    let stats = FormulaStats::of(&complex_formula());

    assert_eq!(stats, FormulaStats {
        depth: 4,
        node_count: 11,
        complexity: 18,
        // Counted in characters, so the integral sign and box are one each
        serialized_length: 16,
    });
    assert!(stats.node_count >= stats.depth);
}

#[test]
fn test_empty_tree() {
    assert_eq!(FormulaStats::of(&FormulaTree::new()), FormulaStats::default());
    assert_eq!(FormulaStats::default().node_count, 0);
}
