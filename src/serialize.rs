//! A compact byte encoding of formula trees, for undo buffers and embedding snapshots in other
//! data. Presentation attributes (position, size, colour, flags) are not encoded.

use num_traits::{NumCast, PrimInt, Unsigned};

use crate::error::DecodeError;
use crate::node::{Category, FormulaNode, FormulaPiece, FormulaTree, PieceKind};

/// The deepest nesting of nodes which will be decoded.
pub const MAX_DEPTH: usize = 256;

pub trait Serializable where Self: Sized {
    fn serialize(&self) -> Vec<u8>;

    fn deserialize(bytes: &mut dyn Iterator<Item = u8>) -> Result<Self, DecodeError>;
}

/// Encodes a count. Counts are nearly always small, so they use a variable-length
/// representation where every `0xFF` byte adds 255 and is followed by another byte:
///   0x02 = 2
///   0xFE = 254
///   0xFF 0x00 = 255
///   0xFF 0x02 = 257
///   0xFF 0xFF 0x02 = 512
pub fn serialize_count<T: PrimInt + Unsigned>(count: T) -> Vec<u8> {
    let step = <T as NumCast>::from(0xFFu8).unwrap_or_else(T::max_value);

    let mut result = vec![];
    let mut current = count;
    while current >= step {
        current = current - step;
        result.push(0xFF);
    }
    result.push(current.to_u8().unwrap_or(u8::MAX));

    result
}

pub fn deserialize_count<T: PrimInt + Unsigned>(bytes: &mut dyn Iterator<Item = u8>) -> Result<T, DecodeError> {
    let mut result = T::zero();

    loop {
        let byte = bytes.next().ok_or(DecodeError::UnexpectedEnd)?;
        let value = <T as NumCast>::from(byte).ok_or(DecodeError::Overflow)?;
        result = result.checked_add(&value).ok_or(DecodeError::Overflow)?;
        if byte != 0xFF { break; }
    }

    Ok(result)
}

fn serialize_str(s: &str) -> Vec<u8> {
    let mut n = serialize_count(s.len());
    n.extend_from_slice(s.as_bytes());
    n
}

fn deserialize_str(bytes: &mut dyn Iterator<Item = u8>) -> Result<String, DecodeError> {
    let len: usize = deserialize_count(bytes)?;
    let raw = (&mut *bytes).take(len).collect::<Vec<_>>();
    if raw.len() != len {
        return Err(DecodeError::UnexpectedEnd);
    }
    String::from_utf8(raw).map_err(|_| DecodeError::InvalidUtf8)
}

impl Serializable for PieceKind {
    fn serialize(&self) -> Vec<u8> {
        vec![match self {
            PieceKind::Number => 1,
            PieceKind::Variable => 2,
            PieceKind::Operator => 3,
            PieceKind::Function => 4,
            PieceKind::Fraction => 5,
            PieceKind::Power => 6,
            PieceKind::Root => 7,
            PieceKind::Sum => 8,
            PieceKind::Product => 9,
            PieceKind::Integral => 10,
            PieceKind::Bracket => 11,
            PieceKind::Empty => 12,
        }]
    }

    fn deserialize(bytes: &mut dyn Iterator<Item = u8>) -> Result<Self, DecodeError> {
        let byte = bytes.next().ok_or(DecodeError::UnexpectedEnd)?;
        Ok(match byte {
            1 => PieceKind::Number,
            2 => PieceKind::Variable,
            3 => PieceKind::Operator,
            4 => PieceKind::Function,
            5 => PieceKind::Fraction,
            6 => PieceKind::Power,
            7 => PieceKind::Root,
            8 => PieceKind::Sum,
            9 => PieceKind::Product,
            10 => PieceKind::Integral,
            11 => PieceKind::Bracket,
            12 => PieceKind::Empty,

            tag => return Err(DecodeError::UnknownTag { what: "piece kind", tag }),
        })
    }
}

impl Serializable for Category {
    fn serialize(&self) -> Vec<u8> {
        vec![match self {
            Category::Basic => 1,
            Category::Structure => 2,
            Category::Calculus => 3,
            Category::Empty => 4,
        }]
    }

    fn deserialize(bytes: &mut dyn Iterator<Item = u8>) -> Result<Self, DecodeError> {
        let byte = bytes.next().ok_or(DecodeError::UnexpectedEnd)?;
        Ok(match byte {
            1 => Category::Basic,
            2 => Category::Structure,
            3 => Category::Calculus,
            4 => Category::Empty,

            tag => return Err(DecodeError::UnknownTag { what: "category", tag }),
        })
    }
}

impl Serializable for FormulaNode {
    fn serialize(&self) -> Vec<u8> {
        let mut n = self.piece.kind.serialize();
        n.append(&mut self.piece.category.serialize());
        n.append(&mut serialize_str(self.piece.id.as_str()));
        n.append(&mut serialize_str(&self.piece.value));
        n.append(&mut serialize_count(self.children.len()));
        for child in &self.children {
            n.append(&mut child.serialize());
        }
        n
    }

    fn deserialize(bytes: &mut dyn Iterator<Item = u8>) -> Result<Self, DecodeError> {
        deserialize_node(bytes, 1)
    }
}

/// Decodes a node which sits `depth` levels down, counting the root as 1.
fn deserialize_node(bytes: &mut dyn Iterator<Item = u8>, depth: usize) -> Result<FormulaNode, DecodeError> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::TooDeep(MAX_DEPTH));
    }

    let kind = PieceKind::deserialize(bytes)?;
    let category = Category::deserialize(bytes)?;
    let id = deserialize_str(bytes)?;
    let value = deserialize_str(bytes)?;

    let child_count: usize = deserialize_count(bytes)?;
    let mut children = vec![];
    for _ in 0..child_count {
        children.push(deserialize_node(bytes, depth + 1)?);
    }

    let piece = FormulaPiece {
        position: None,
        size: None,
        is_selected: None,
        is_dragging: None,
        ..FormulaPiece::new(kind, value, category).with_id(id)
    };
    Ok(FormulaNode::new(piece, children))
}

impl Serializable for FormulaTree {
    fn serialize(&self) -> Vec<u8> {
        match &self.root {
            None => vec![0],
            Some(root) => {
                let mut n = vec![1];
                n.append(&mut root.serialize());
                n
            }
        }
    }

    fn deserialize(bytes: &mut dyn Iterator<Item = u8>) -> Result<Self, DecodeError> {
        let tree = match bytes.next().ok_or(DecodeError::UnexpectedEnd)? {
            0 => FormulaTree::new(),
            1 => FormulaTree::from(FormulaNode::deserialize(bytes)?),
            tag => return Err(DecodeError::UnknownTag { what: "tree", tag }),
        };
        tree.verify()?;
        Ok(tree)
    }
}
