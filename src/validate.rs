//! Structural and semantic checks on formula trees.
//!
//! Validation never stops early. Every node is checked, including the descendants of nodes which
//! have already failed, and the findings are collected into a [ValidationReport]. Errors mean the
//! formula is not fit to be saved; warnings are advisory.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ValidationSettings;
use crate::node::{FormulaNode, FormulaPiece, FormulaTree, PieceKind};

pub const OPERATORS: [&str; 10] = ["+", "-", "*", "/", "=", "≠", "<", ">", "≤", "≥"];

pub const FUNCTIONS: [&str; 6] = ["sin", "cos", "tan", "log", "ln", "exp"];

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?[0-9]*\.?[0-9]+$").unwrap());

#[derive(PartialEq, Eq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// A single finding about one node.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Issue {
    EmptyValue(PieceKind),
    InvalidNumber(String),
    TooManyDecimals(String),
    InvalidVariable(String),
    InvalidOperator(String),
    UnknownFunction(String),
    MissingArgument(String),
    MultipleArguments(String),
    FractionParts,
    PowerParts,
    MissingRadicand,
    SumParts,
    ProductParts,
    IntegralParts,
    EmptyBrackets,
}

impl Issue {
    /// Warnings do not make a formula invalid.
    pub fn is_warning(&self) -> bool {
        matches!(self, Issue::TooManyDecimals(_) | Issue::MultipleArguments(_) | Issue::EmptyBrackets)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Issue::EmptyValue(kind) => write!(f, "{} piece has an empty value", kind),
            Issue::InvalidNumber(v) => write!(f, "invalid number: {}", v),
            Issue::TooManyDecimals(v) => write!(f, "too many digits after the decimal point: {}", v),
            Issue::InvalidVariable(v) => write!(f, "invalid variable name: {}", v),
            Issue::InvalidOperator(v) => write!(f, "invalid operator: {}", v),
            Issue::UnknownFunction(v) => write!(f, "unknown function: {}", v),
            Issue::MissingArgument(v) => write!(f, "function {} is missing an argument", v),
            Issue::MultipleArguments(v) => write!(f, "function {} has multiple arguments", v),
            Issue::FractionParts => write!(f, "a fraction needs exactly a numerator and a denominator"),
            Issue::PowerParts => write!(f, "a power needs exactly a base and an exponent"),
            Issue::MissingRadicand => write!(f, "root is missing its radicand"),
            Issue::SumParts => write!(f, "a sum needs an index and both bounds"),
            Issue::ProductParts => write!(f, "a product needs an index and both bounds"),
            Issue::IntegralParts => write!(f, "an integral needs both bounds, an integrand and a variable"),
            Issue::EmptyBrackets => write!(f, "empty brackets"),
        }
    }
}

/// Validates formula trees against the piece rules.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    settings: ValidationSettings,
}

impl Validator {
    pub fn new(settings: ValidationSettings) -> Self {
        Self { settings }
    }

    /// Validates a whole tree. An empty tree is valid.
    pub fn validate(&self, tree: &FormulaTree) -> ValidationReport {
        match &tree.root {
            Some(root) => self.validate_node(root),
            None => ValidationReport { is_valid: true, ..Default::default() },
        }
    }

    pub fn validate_node(&self, node: &FormulaNode) -> ValidationReport {
        let mut issues = Vec::new();
        self.visit(node, &mut issues);

        let (warnings, errors): (Vec<_>, Vec<_>) = issues.into_iter().partition(Issue::is_warning);
        debug!(errors = errors.len(), warnings = warnings.len(), "validated formula");

        ValidationReport {
            is_valid: errors.is_empty(),
            errors: errors.iter().map(ToString::to_string).collect(),
            warnings: warnings.iter().map(ToString::to_string).collect(),
        }
    }

    fn visit(&self, node: &FormulaNode, issues: &mut Vec<Issue>) {
        let piece = &node.piece;

        if piece.value.trim().is_empty() {
            issues.push(Issue::EmptyValue(piece.kind));
        }

        self.check_piece(piece, node.children.len(), issues);

        for child in &node.children {
            self.visit(child, issues);
        }
    }

    fn check_piece(&self, piece: &FormulaPiece, arity: usize, issues: &mut Vec<Issue>) {
        let value = piece.value.as_str();

        match piece.kind {
            PieceKind::Number => {
                let value = value.trim();
                if !NUMBER.is_match(value) {
                    issues.push(Issue::InvalidNumber(value.to_string()));
                }
                let decimals = value.split('.').nth(1).map(|d| d.chars().count()).unwrap_or(0);
                if decimals > self.settings.max_fraction_digits {
                    issues.push(Issue::TooManyDecimals(value.to_string()));
                }
            }

            PieceKind::Variable => {
                let value = value.trim();
                let mut chars = value.chars();
                let single_letter = match (chars.next(), chars.next()) {
                    (Some(c), None) => is_variable_letter(c),
                    _ => false,
                };
                if !single_letter {
                    issues.push(Issue::InvalidVariable(value.to_string()));
                }
            }

            PieceKind::Operator => {
                if !OPERATORS.contains(&value) {
                    issues.push(Issue::InvalidOperator(value.to_string()));
                }
            }

            PieceKind::Function => {
                if !FUNCTIONS.contains(&value) {
                    issues.push(Issue::UnknownFunction(value.to_string()));
                }
                if arity == 0 {
                    issues.push(Issue::MissingArgument(value.to_string()));
                } else if arity > 1 {
                    issues.push(Issue::MultipleArguments(value.to_string()));
                }
            }

            PieceKind::Fraction if arity != 2 => issues.push(Issue::FractionParts),
            PieceKind::Power if arity != 2 => issues.push(Issue::PowerParts),
            PieceKind::Root if arity < 1 => issues.push(Issue::MissingRadicand),
            PieceKind::Sum if arity < 3 => issues.push(Issue::SumParts),
            PieceKind::Product if arity < 3 => issues.push(Issue::ProductParts),
            PieceKind::Integral if arity < 4 => issues.push(Issue::IntegralParts),
            PieceKind::Bracket if arity == 0 => issues.push(Issue::EmptyBrackets),

            PieceKind::Fraction | PieceKind::Power | PieceKind::Root | PieceKind::Sum
                | PieceKind::Product | PieceKind::Integral | PieceKind::Bracket
                | PieceKind::Empty => (),
        }
    }
}

/// Latin letters, and Greek letters in either case.
fn is_variable_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || ('α'..='ω').contains(&c) || ('Α'..='Ω').contains(&c)
}

/// Validates `node` with the default settings.
pub fn validate_formula(node: &FormulaNode) -> ValidationReport {
    Validator::default().validate_node(node)
}
