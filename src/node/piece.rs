//! Pieces, the atomic elements which formula trees are assembled from.

use core::borrow::Borrow;
use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of a piece. This decides how a node is serialized and validated, and how its children
/// are interpreted.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    /// A number literal, such as `12` or `-0.5`.
    Number,

    /// A single-letter variable, Latin or Greek.
    Variable,

    /// An operator glyph, such as `+` or `≤`.
    Operator,

    /// A named function applied to its children, e.g. `sin`.
    Function,

    /// Children are the numerator and the denominator.
    Fraction,

    /// Children are the base and the exponent.
    Power,

    /// One child is the radicand; with two, the first is the index and the second the radicand.
    Root,

    /// Children are the index, the upper bound and the summand.
    Sum,

    /// Children are the index, the upper bound and the term.
    Product,

    /// Children are the lower bound, the upper bound, the integrand and the variable of
    /// integration.
    Integral,

    /// A set of parentheses around its children.
    Bracket,

    /// A placeholder block, which only groups its children.
    Empty,
}

impl PieceKind {
    pub const ALL: [PieceKind; 12] = [
        PieceKind::Number,
        PieceKind::Variable,
        PieceKind::Operator,
        PieceKind::Function,
        PieceKind::Fraction,
        PieceKind::Power,
        PieceKind::Root,
        PieceKind::Sum,
        PieceKind::Product,
        PieceKind::Integral,
        PieceKind::Bracket,
        PieceKind::Empty,
    ];

    /// The category a piece of this kind is usually given in the piece palette.
    pub fn default_category(&self) -> Category {
        match self {
            Self::Number | Self::Variable | Self::Operator | Self::Bracket => Category::Basic,
            Self::Function | Self::Fraction | Self::Power | Self::Root => Category::Structure,
            Self::Sum | Self::Product | Self::Integral => Category::Calculus,
            Self::Empty => Category::Empty,
        }
    }

    /// The lower-case name used for this kind in JSON and in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Variable => "variable",
            Self::Operator => "operator",
            Self::Function => "function",
            Self::Fraction => "fraction",
            Self::Power => "power",
            Self::Root => "root",
            Self::Sum => "sum",
            Self::Product => "product",
            Self::Integral => "integral",
            Self::Bracket => "bracket",
            Self::Empty => "empty",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A coarse grouping of pieces, used for presentation and drop feedback only.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Basic,
    Structure,
    Calculus,
    Empty,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Basic,
        Category::Structure,
        Category::Calculus,
        Category::Empty,
    ];
}

/// The identifier of a piece. Node identity is piece identity, so this also names a node.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(String);

impl PieceId {
    /// A fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for PieceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PieceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PieceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for PieceId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PieceId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(PartialEq, Debug, Copy, Clone, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(PartialEq, Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Default for Size {
    fn default() -> Self {
        Self { width: 50.0, height: 50.0 }
    }
}

/// A single piece of a formula. The presentation attributes are carried along for the editor but
/// have no meaning to the tree, serializer or validator.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaPiece {
    pub id: PieceId,

    #[serde(rename = "type")]
    pub kind: PieceKind,

    /// The literal symbol carried by the piece: digits, a variable letter, an operator glyph or a
    /// function name.
    pub value: String,

    pub category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_selected: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_dragging: Option<bool>,
}

impl FormulaPiece {
    /// Creates a new piece with a freshly generated id, placed at the origin with the default size.
    pub fn new(kind: PieceKind, value: impl Into<String>, category: Category) -> Self {
        Self {
            id: PieceId::generate(),
            kind,
            value: value.into(),
            category,
            position: Some(Point::default()),
            size: Some(Size::default()),
            color: None,
            is_selected: Some(false),
            is_dragging: Some(false),
        }
    }

    /// Replaces the id of this piece.
    pub fn with_id(mut self, id: impl Into<PieceId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point { x, y });
        self
    }

    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.size = Some(Size { width, height });
        self
    }

    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = Some(is_selected);
        self
    }

    pub fn dragging(mut self, is_dragging: bool) -> Self {
        self.is_dragging = Some(is_dragging);
        self
    }

    /// A copy of this piece under a fresh id, with the selection and drag flags cleared.
    pub fn duplicate(&self) -> Self {
        Self {
            id: PieceId::generate(),
            position: Some(self.position.unwrap_or_default()),
            is_selected: Some(false),
            is_dragging: Some(false),
            ..self.clone()
        }
    }

    /// Shallow-merges the fields set in `patch` into this piece. The id is never touched.
    pub fn apply(&mut self, patch: &PiecePatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(value) = &patch.value {
            self.value = value.clone();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(position) = patch.position {
            self.position = Some(position);
        }
        if let Some(size) = patch.size {
            self.size = Some(size);
        }
        if let Some(color) = &patch.color {
            self.color = Some(color.clone());
        }
        if let Some(is_selected) = patch.is_selected {
            self.is_selected = Some(is_selected);
        }
        if let Some(is_dragging) = patch.is_dragging {
            self.is_dragging = Some(is_dragging);
        }
    }
}

/// A partial update of a piece. Fields left as `None` keep their current value.
#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PiecePatch {
    #[serde(rename = "type")]
    pub kind: Option<PieceKind>,
    pub value: Option<String>,
    pub category: Option<Category>,
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub color: Option<String>,
    pub is_selected: Option<bool>,
    pub is_dragging: Option<bool>,
}

impl PiecePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn kind(mut self, kind: PieceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point { x, y });
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.size = Some(Size { width, height });
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = Some(is_selected);
        self
    }

    pub fn dragging(mut self, is_dragging: bool) -> Self {
        self.is_dragging = Some(is_dragging);
        self
    }
}
