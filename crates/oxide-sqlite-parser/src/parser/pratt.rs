//! Binding powers for precedence climbing over SQLite operators.
//!
//! From loosest to tightest: `OR`, `AND`, `NOT`, the equality family
//! (`=`, `IS`, `IN`, `LIKE`, `BETWEEN`, ...), ordering comparisons, bitwise
//! operators, `+ -`, `* / %`, `|| -> ->>`, `COLLATE`, then unary `- + ~`.

use crate::ast::{BinaryOp, UnaryOp};
use crate::lexer::{Keyword, TokenKind};

/// Right binding power of prefix `NOT`.
pub const NOT_BP: u8 = 5;

/// Left binding power shared by the equality family, including the postfix
/// and keyword-introduced forms. Their operands bind at [`EQUALITY_RHS_BP`].
pub const EQUALITY_BP: u8 = 7;

pub const EQUALITY_RHS_BP: u8 = 8;

/// Left binding power of postfix `COLLATE`.
pub const COLLATE_BP: u8 = 19;

/// Right binding power of unary `-`, `+` and `~`.
pub const UNARY_BP: u8 = 21;

/// A binary operator token, with its `(left, right)` binding powers.
///
/// Every level is left associative, so `right` is always `left + 1`.
/// Keyword-introduced forms (`IS`, `IN`, `LIKE`, `BETWEEN`, ...) are not in
/// this table; the grammar handles them at [`EQUALITY_BP`].
#[must_use]
pub const fn infix(kind: &TokenKind) -> Option<(BinaryOp, u8, u8)> {
    let (op, left) = match kind {
        TokenKind::Keyword(Keyword::Or) => (BinaryOp::Or, 1),
        TokenKind::Keyword(Keyword::And) => (BinaryOp::And, 3),
        TokenKind::Eq => (BinaryOp::Eq, EQUALITY_BP),
        TokenKind::NotEq => (BinaryOp::NotEq, EQUALITY_BP),
        TokenKind::Lt => (BinaryOp::Lt, 9),
        TokenKind::LtEq => (BinaryOp::LtEq, 9),
        TokenKind::Gt => (BinaryOp::Gt, 9),
        TokenKind::GtEq => (BinaryOp::GtEq, 9),
        TokenKind::BitAnd => (BinaryOp::BitAnd, 11),
        TokenKind::BitOr => (BinaryOp::BitOr, 11),
        TokenKind::LeftShift => (BinaryOp::LeftShift, 11),
        TokenKind::RightShift => (BinaryOp::RightShift, 11),
        TokenKind::Plus => (BinaryOp::Add, 13),
        TokenKind::Minus => (BinaryOp::Sub, 13),
        TokenKind::Star => (BinaryOp::Mul, 15),
        TokenKind::Slash => (BinaryOp::Div, 15),
        TokenKind::Percent => (BinaryOp::Mod, 15),
        TokenKind::Concat => (BinaryOp::Concat, 17),
        TokenKind::Arrow => (BinaryOp::Extract, 17),
        TokenKind::LongArrow => (BinaryOp::ExtractText, 17),
        _ => return None,
    };
    Some((op, left, left + 1))
}

/// A prefix operator token, with the binding power of its operand.
#[must_use]
pub const fn prefix(kind: &TokenKind) -> Option<(UnaryOp, u8)> {
    match kind {
        TokenKind::Minus => Some((UnaryOp::Neg, UNARY_BP)),
        TokenKind::Plus => Some((UnaryOp::Plus, UNARY_BP)),
        TokenKind::BitNot => Some((UnaryOp::BitNot, UNARY_BP)),
        TokenKind::Keyword(Keyword::Not) => Some((UnaryOp::Not, NOT_BP)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left_bp(kind: &TokenKind) -> u8 {
        infix(kind).unwrap().1
    }

    #[test]
    fn test_precedence_ordering() {
        assert!(left_bp(&TokenKind::Star) > left_bp(&TokenKind::Plus));

        let and = infix(&TokenKind::Keyword(Keyword::And)).unwrap();
        assert!(and.1 > left_bp(&TokenKind::Keyword(Keyword::Or)));

        // NOT sits between AND and the comparisons
        assert!(NOT_BP > and.2);
        assert!(EQUALITY_BP > NOT_BP);
        assert!(left_bp(&TokenKind::Lt) > left_bp(&TokenKind::Eq));

        assert!(left_bp(&TokenKind::Concat) > left_bp(&TokenKind::Star));
        assert!(COLLATE_BP > infix(&TokenKind::LongArrow).unwrap().2);
        assert!(UNARY_BP > COLLATE_BP);
    }

    #[test]
    fn test_operators_map_to_ast() {
        assert_eq!(infix(&TokenKind::Plus).map(|i| i.0), Some(BinaryOp::Add));
        assert_eq!(
            infix(&TokenKind::LongArrow).map(|i| i.0),
            Some(BinaryOp::ExtractText)
        );
        assert_eq!(infix(&TokenKind::LeftParen), None);
        assert_eq!(
            prefix(&TokenKind::Keyword(Keyword::Not)),
            Some((UnaryOp::Not, NOT_BP))
        );
        assert_eq!(prefix(&TokenKind::BitNot), Some((UnaryOp::BitNot, UNARY_BP)));
        assert_eq!(prefix(&TokenKind::Star), None);
    }

    #[test]
    fn test_equality_operands_bind_at_rhs_power() {
        assert_eq!(infix(&TokenKind::Eq).map(|i| i.2), Some(EQUALITY_RHS_BP));
    }
}
