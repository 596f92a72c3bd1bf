//! Mapping between `syn` operator tokens and the operator-table strings in
//! [`crate::kind`], plus the syntax-shape classifiers each [`super::Operator`] uses
//! to decide whether a `BinOp` belongs to its family.

use syn::spanned::Spanned;
use syn::{BinOp, UnOp};

pub fn bin_op_str(op: &BinOp) -> Option<&'static str> {
    use BinOp::*;
    Some(match op {
        Add(_) => "+",
        Sub(_) => "-",
        Mul(_) => "*",
        Div(_) => "/",
        Rem(_) => "%",
        And(_) => "&&",
        Or(_) => "||",
        BitAnd(_) => "&",
        BitOr(_) => "|",
        BitXor(_) => "^",
        Shl(_) => "<<",
        Shr(_) => ">>",
        Eq(_) => "==",
        Ne(_) => "!=",
        Lt(_) => "<",
        Le(_) => "<=",
        Gt(_) => ">",
        Ge(_) => ">=",
        AddAssign(_) => "+=",
        SubAssign(_) => "-=",
        MulAssign(_) => "*=",
        DivAssign(_) => "/=",
        RemAssign(_) => "%=",
        BitAndAssign(_) => "&=",
        BitOrAssign(_) => "|=",
        BitXorAssign(_) => "^=",
        ShlAssign(_) => "<<=",
        ShrAssign(_) => ">>=",
        _ => return None,
    })
}

pub fn bin_op_span(op: &BinOp) -> proc_macro2::Span {
    op.span()
}

pub fn un_op_span(op: &UnOp) -> proc_macro2::Span {
    op.span()
}

pub fn is_plain_arithmetic(op: &BinOp) -> bool {
    matches!(op, BinOp::Add(_) | BinOp::Sub(_) | BinOp::Mul(_) | BinOp::Div(_) | BinOp::Rem(_))
}

pub fn is_arithmetic_assign(op: &BinOp) -> bool {
    matches!(
        op,
        BinOp::AddAssign(_) | BinOp::SubAssign(_) | BinOp::MulAssign(_) | BinOp::DivAssign(_)
    )
}

pub fn is_comparison(op: &BinOp) -> bool {
    matches!(
        op,
        BinOp::Eq(_) | BinOp::Ne(_) | BinOp::Lt(_) | BinOp::Le(_) | BinOp::Gt(_) | BinOp::Ge(_)
    )
}

pub fn is_logical(op: &BinOp) -> bool {
    matches!(op, BinOp::And(_) | BinOp::Or(_))
}

pub fn is_plain_bitwise(op: &BinOp) -> bool {
    matches!(
        op,
        BinOp::BitAnd(_) | BinOp::BitOr(_) | BinOp::BitXor(_) | BinOp::Shl(_) | BinOp::Shr(_)
    )
}

pub fn is_bitwise_assign(op: &BinOp) -> bool {
    matches!(
        op,
        BinOp::BitAndAssign(_)
            | BinOp::BitOrAssign(_)
            | BinOp::BitXorAssign(_)
            | BinOp::ShlAssign(_)
            | BinOp::ShrAssign(_)
    )
}
