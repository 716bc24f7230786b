//! The formula tree data model.
//!
//! A formula is a tree of [FormulaNode]s, each carrying one [FormulaPiece]. The meaning of a
//! node's children depends on the [PieceKind] of its piece; for a fraction the first child is the
//! numerator and the second is the denominator, for an integral the children are the bounds, the
//! integrand and the variable, and so on. Child order is therefore significant.
//!
//! A [FormulaTree] is an immutable snapshot which may be empty. The indexed, mutable equivalent
//! is the [store](crate::store).

mod piece;
pub use piece::*;

mod tree;
pub use tree::*;
