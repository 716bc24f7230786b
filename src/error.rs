use thiserror::Error;

use crate::node::PieceKind;

/// Failures of the tree mutation operations. An operation which fails leaves the caller's current
/// snapshot untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("no piece with id {0} in the tree")]
    PieceNotFound(String),

    #[error("parent piece {0} is not in the tree")]
    ParentNotFound(String),

    #[error("the tree already has a root, a parent id is required")]
    ParentRequired,

    #[error("a piece with id {0} is already in the tree")]
    DuplicatePiece(String),

    #[error("node id {node} does not match its piece id {piece}")]
    IdMismatch {
        node: String,
        piece: String,
    },

    #[error("a {child:?} piece cannot be attached to a {parent:?} piece")]
    Incompatible {
        parent: PieceKind,
        child: PieceKind,
    },

    #[error("internal tree operation failed: {0}")]
    Internal(String),
}

pub type TreeResult<T> = Result<T, TreeError>;

/// Failures while decoding the compact byte encoding of a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unknown {what} tag {tag}")]
    UnknownTag {
        what: &'static str,
        tag: u8,
    },

    #[error("encoded string is not valid UTF-8")]
    InvalidUtf8,

    #[error("encoded count does not fit the target integer")]
    Overflow,

    #[error("nodes are nested more than {0} levels deep")]
    TooDeep(usize),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Raised by an external typesetting renderer. Never escapes [crate::render::render_or_fallback].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("render failed: {0}")]
pub struct RenderError(pub String);

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("invalid formula record JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("formula record holds an inconsistent tree: {0}")]
    Tree(#[from] TreeError),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid setting {key}: {reason}")]
    Invalid {
        key: &'static str,
        reason: String,
    },
}
