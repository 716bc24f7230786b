//! Conversion of formula trees into LaTeX markup.
//!
//! Serialization never fails. Children which a structure expects but does not have are written
//! as empty strings, so a half-built fraction still becomes `\frac{1}{}`. Whether the output
//! then typesets is a separate question, answered loosely by [check_latex].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::node::{FormulaNode, FormulaTree, PieceKind};

/// Written between the arguments of a function piece.
pub const FUNCTION_ARGUMENT_SEPARATOR: &str = ", ";

/// The variable of integration used when an integral has no fourth child.
pub const DEFAULT_INTEGRATION_VARIABLE: &str = "x";

/// Implemented by types which can be written out as LaTeX markup.
pub trait ToLatex {
    fn to_latex(&self) -> String;
}

impl ToLatex for FormulaTree {
    fn to_latex(&self) -> String {
        self.root.as_ref().map(|r| r.to_latex()).unwrap_or_default()
    }
}

impl ToLatex for FormulaNode {
    fn to_latex(&self) -> String {
        let children = self.children.iter().map(|c| c.to_latex()).collect::<Vec<_>>();
        let arg = |i: usize| children.get(i).map(String::as_str).unwrap_or("");
        let value = self.piece.value.as_str();

        match self.piece.kind {
            PieceKind::Number | PieceKind::Variable => value.to_string(),
            PieceKind::Operator => escape_operator(value).to_string(),
            PieceKind::Function => format!("{}({})", value, children.join(FUNCTION_ARGUMENT_SEPARATOR)),
            PieceKind::Fraction => format!("\\frac{{{}}}{{{}}}", arg(0), arg(1)),
            PieceKind::Power => format!("{}^{{{}}}", arg(0), arg(1)),
            PieceKind::Root => match children.len() {
                0 | 1 => format!("\\sqrt{{{}}}", arg(0)),
                _ => format!("\\sqrt[{}]{{{}}}", arg(0), arg(1)),
            },
            PieceKind::Sum => format!("\\sum_{{{}}}^{{{}}} {}", arg(0), arg(1), arg(2)),
            PieceKind::Product => format!("\\prod_{{{}}}^{{{}}} {}", arg(0), arg(1), arg(2)),
            PieceKind::Integral => {
                let variable = children.get(3)
                    .map(String::as_str)
                    .unwrap_or(DEFAULT_INTEGRATION_VARIABLE);
                format!("\\int_{{{}}}^{{{}}} {} \\, d{{{}}}", arg(0), arg(1), arg(2), variable)
            }
            PieceKind::Bracket => format!("({})", children.concat()),
            PieceKind::Empty => children.concat(),
        }
    }
}

/// Maps an operator glyph to its LaTeX command. Commands carry a trailing space so that a letter
/// written straight after them cannot run into the command name.
pub fn escape_operator(operator: &str) -> &str {
    match operator {
        "*" => "\\cdot ",
        "/" => "\\div ",
        "≠" => "\\neq ",
        "≤" => "\\leq ",
        "≥" => "\\geq ",
        _ => operator,
    }
}

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SPACE_AROUND_BACKSLASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\\\s*").unwrap());
static UNTERMINATED_COMMAND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\[a-zA-Z]+\s*$").unwrap());

/// Normalises whitespace in markup: runs collapse to one space, spaces either side of a backslash
/// are dropped, and the ends are trimmed.
pub fn clean_latex(latex: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(latex, " ");
    SPACE_AROUND_BACKSLASH.replace_all(&collapsed, "\\").trim().to_string()
}

/// The result of [check_latex].
#[derive(PartialEq, Eq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatexCheck {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Checks the lexical shape of a markup string. This catches gross mistakes only; markup which
/// passes may still be rejected by a typesetter.
pub fn check_latex(latex: &str) -> LatexCheck {
    let mut errors = Vec::new();

    if latex.trim().is_empty() {
        errors.push("markup is empty".to_string());
    }

    let opening = latex.matches('{').count();
    let closing = latex.matches('}').count();
    if opening != closing {
        errors.push(format!("unbalanced braces: {} opening, {} closing", opening, closing));
    }

    if UNTERMINATED_COMMAND.is_match(latex) {
        errors.push("markup ends in an unterminated command".to_string());
    }

    if !latex.is_ascii() {
        errors.push("markup contains non-ASCII characters".to_string());
    }

    LatexCheck { is_valid: errors.is_empty(), errors }
}
