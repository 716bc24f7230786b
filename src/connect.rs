//! Rules deciding which pieces may be attached to which.
//!
//! There are two tables. The fine-grained one, [can_connect], works on piece kinds and is the one
//! consulted before a piece is actually attached. The coarse one, [drop_acceptance_rules], works
//! on categories and only drives drop feedback while a piece is being dragged, so it is looser.

use crate::node::{Category, FormulaPiece, PieceKind};

/// The kinds which a piece of kind `source` accepts as `target`.
pub fn accepted_kinds(source: PieceKind) -> &'static [PieceKind] {
    use PieceKind::*;

    match source {
        Number | Variable => &[Operator, Function, Bracket],
        Operator => &[Number, Variable, Function, Bracket],
        Function => &[Number, Variable, Bracket],
        Fraction | Power | Root | Sum | Product | Integral | Bracket
            => &[Number, Variable, Operator, Function],
        Empty => &[Number, Variable, Operator, Function, Bracket],
    }
}

pub fn kinds_connect(source: PieceKind, target: PieceKind) -> bool {
    accepted_kinds(source).contains(&target)
}

/// Returns true if `source` may be connected to `target`.
///
/// `source` is the parent which would receive `target` as a child, so `can_connect(number,
/// operator)` means an operator may go under a number. It does not mean a number may be placed
/// under an operator. Read the other way round, no structural piece could ever take children.
/// [FormulaStore::attach_checked](crate::store::FormulaStore::attach_checked) passes the parent
/// as `source`.
pub fn can_connect(source: &FormulaPiece, target: &FormulaPiece) -> bool {
    kinds_connect(source.kind, target.kind)
}

/// The kinds of piece which a drop area of the given category will highlight as droppable.
pub fn drop_acceptance_rules(category: Category) -> &'static [PieceKind] {
    use PieceKind::*;

    match category {
        Category::Basic => &[Number, Variable, Operator, Bracket],
        Category::Structure | Category::Empty => &[Number, Variable, Operator, Function, Bracket],
        // No calculus piece accepts brackets in the fine-grained table
        Category::Calculus => &[Number, Variable, Operator, Function],
    }
}

/// Returns true if a piece of kind `kind` may be dropped on an area of the given category.
pub fn can_drop(kind: PieceKind, category: Category) -> bool {
    drop_acceptance_rules(category).contains(&kind)
}
