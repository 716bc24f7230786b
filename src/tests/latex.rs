use rstest::rstest;

use crate::{FormulaTree, ToLatex, latex::{check_latex, clean_latex, escape_operator}, tests::util::complex_formula};

#[test]
fn test_single_number() {
    let tree = FormulaTree::new().add_piece(piece!(Number, "a", "5"), None).unwrap();
    assert_eq!(tree.to_latex(), "5");
    assert_eq!(FormulaTree::new().to_latex(), "");
}

#[test]
fn test_structures() {
    assert_eq!(
        node!(Fraction, "f", "frac"; node!(Number, "n1", "1"), node!(Number, "n2", "2")).to_latex(),
        "\\frac{1}{2}",
    );
    assert_eq!(
        node!(Function, "fn", "sin"; node!(Variable, "x", "x")).to_latex(),
        "sin(x)",
    );
    assert_eq!(
        node!(Root, "r", "√"; node!(Number, "idx", "3"), node!(Variable, "x", "x")).to_latex(),
        "\\sqrt[3]{x}",
    );
    assert_eq!(
        node!(Root, "r", "√"; node!(Variable, "x", "x")).to_latex(),
        "\\sqrt{x}",
    );
    assert_eq!(
        node!(Power, "p", "^"; node!(Variable, "x", "x"), node!(Number, "n", "2")).to_latex(),
        "x^{2}",
    );
    assert_eq!(
        node!(Sum, "s", "Σ";
            node!(Variable, "i", "i"),
            node!(Variable, "n", "n"),
            node!(Variable, "a", "a"),
        ).to_latex(),
        "\\sum_{i}^{n} a",
    );
    assert_eq!(
        node!(Product, "p", "Π";
            node!(Variable, "i", "i"),
            node!(Number, "n", "5"),
            node!(Variable, "i2", "i"),
        ).to_latex(),
        "\\prod_{i}^{5} i",
    );
    assert_eq!(
        node!(Bracket, "b", "()";
            node!(Number, "a", "2"),
            node!(Operator, "op", "+"),
            node!(Variable, "x", "x"),
        ).to_latex(),
        "(2+x)",
    );
    assert_eq!(complex_formula().to_latex(), "\\int_{0}^{1} \\frac{x}{2} \\, d{x}+sin(y)");
}

#[test]
fn test_missing_children_are_empty() {
    assert_eq!(node!(Fraction, "f", "frac").to_latex(), "\\frac{}{}");
    assert_eq!(node!(Fraction, "f", "frac"; node!(Number, "n", "1")).to_latex(), "\\frac{1}{}");
    assert_eq!(node!(Power, "p", "^").to_latex(), "^{}");
    assert_eq!(node!(Root, "r", "√").to_latex(), "\\sqrt{}");
    assert_eq!(node!(Sum, "s", "Σ").to_latex(), "\\sum_{}^{} ");
    assert_eq!(node!(Bracket, "b", "()").to_latex(), "()");
    assert_eq!(node!(Function, "f", "cos").to_latex(), "cos()");

    // The integration variable defaults to x
    assert_eq!(
        node!(Integral, "int", "∫";
            node!(Number, "a", "0"),
            node!(Number, "b", "1"),
            node!(Variable, "t", "t"),
        ).to_latex(),
        "\\int_{0}^{1} t \\, d{x}",
    );
    assert_eq!(
        node!(Integral, "int", "∫";
            node!(Number, "a", "0"),
            node!(Number, "b", "1"),
            node!(Variable, "t", "t"),
            node!(Variable, "dt", "t"),
        ).to_latex(),
        "\\int_{0}^{1} t \\, d{t}",
    );
}

#[test]
fn test_function_arguments_are_comma_separated() {
    assert_eq!(
        node!(Function, "f", "log"; node!(Number, "a", "2"), node!(Variable, "x", "x")).to_latex(),
        "log(2, x)",
    );
}

#[test]
fn test_empty_concatenates_children() {
    assert_eq!(
        node!(Empty, "e", "□";
            node!(Number, "a", "1"),
            node!(Operator, "op", "="),
            node!(Number, "b", "1"),
        ).to_latex(),
        "1=1",
    );
    assert_eq!(node!(Empty, "e", "□").to_latex(), "");
}

#[rstest]
#[case("*", "\\cdot ")]
#[case("/", "\\div ")]
#[case("≠", "\\neq ")]
#[case("≤", "\\leq ")]
#[case("≥", "\\geq ")]
#[case("+", "+")]
#[case("-", "-")]
#[case("=", "=")]
#[case("<", "<")]
#[case(">", ">")]
fn test_escape_operator(#[case] operator: &str, #[case] expected: &str) {
    assert_eq!(escape_operator(operator), expected);
}

#[test]
fn test_escaped_operators_in_tree() {
    let tree = tree!(node!(Bracket, "b", "()";
        node!(Number, "a", "2"),
        node!(Operator, "op", "*"),
        node!(Variable, "x", "x"),
    ));
    assert_eq!(tree.to_latex(), "(2\\cdot x)");
}

#[test]
fn test_deterministic() {
    let tree = complex_formula();
    assert_eq!(tree.to_latex(), tree.to_latex());
}

#[test]
fn test_clean_latex() {
    assert_eq!(clean_latex("  a   +\n\tb  "), "a + b");
    assert_eq!(clean_latex("a \\cdot  b"), "a\\cdot b");
    assert_eq!(clean_latex("\\int_{0}^{1} t \\, d{x}"), "\\int_{0}^{1} t\\, d{x}");
    assert_eq!(clean_latex("   "), "");
}

#[test]
fn test_check_latex() {
    let check = check_latex("\\frac{1}{2}");
    assert!(check.is_valid);
    assert!(check.errors.is_empty());

    assert!(check_latex(&complex_formula().to_latex()).is_valid);

    let check = check_latex("  ");
    assert!(!check.is_valid);
    assert_eq!(check.errors, vec!["markup is empty"]);

    let check = check_latex("\\frac{1}{2");
    assert!(!check.is_valid);
    assert!(check.errors[0].contains("unbalanced"));

    let check = check_latex("2\\cdot ");
    assert_eq!(check.errors, vec!["markup ends in an unterminated command"]);

    let check = check_latex("x≠y");
    assert_eq!(check.errors, vec!["markup contains non-ASCII characters"]);
}
