//! Formula trees assembled piece by piece, serialized to LaTeX, validated and measured.

pub mod error;
pub mod node;
pub mod store;
pub mod connect;
pub mod latex;
pub mod validate;
pub mod metrics;
pub mod render;
pub mod renderers;
pub mod serialize;
pub mod record;
pub mod config;

#[cfg(test)]
mod tests;

pub use crate::{
    node::{FormulaNode, FormulaPiece, FormulaTree, PieceKind, Category, PieceId, PiecePatch},
    store::FormulaStore,
    latex::ToLatex,
    validate::{Validator, ValidationReport},
    metrics::FormulaStats,
};

pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");
