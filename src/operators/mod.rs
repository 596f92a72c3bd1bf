//! The mutator registry (C2): one [`Operator`] per [`Kind`], each responsible for
//! recognising its own syntax shape and proposing replacement candidates.
//!
//! Mutation application never rebuilds an AST and re-quotes it: a candidate's
//! [`Span`] is the exact original-text location of its operator token, and
//! [`apply`] replaces that text span in the original source directly, following
//! the same text-surgery approach as [`crate::span::Span::replace`].

mod token;

use syn::{Expr, UnOp};

use crate::kind::{
    arithmetic_assign_replacements, arithmetic_binary_replacements, bitwise_assign_replacements,
    bitwise_binary_replacements, conditional_replacements, logical_binary_replacement, Kind,
};
use crate::span::Span;
use crate::type_info::TypeInfo;
use crate::type_validator::is_plausible;

pub use token::{bin_op_span, bin_op_str};

/// One proposed replacement at one site.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub kind: Kind,
    pub span: Span,
    pub original: String,
    pub mutated: String,
}

/// Recognises one syntactic shape in a `syn::Expr` and proposes mutation candidates.
pub trait Operator: Send + Sync {
    fn kind(&self) -> Kind;

    /// Inspect one expression node. Returns an empty vec if this operator's shape
    /// doesn't match, or if the type validator rejects every candidate.
    fn candidates(&self, expr: &Expr, types: &TypeInfo) -> Vec<Candidate>;
}

/// Apply a candidate's mutation to the original source text.
///
/// `Kind::LogicalNotRemoval` is a deliberate no-op here (see DESIGN.md): the
/// candidate is still generated and reported, but running it exercises the
/// unmodified program, so it is suppressed from generation by default via
/// [`crate::mutant::Mutant::suppressed_by_default`].
pub fn apply(kind: Kind, source: &str, span: &Span, mutated: &str) -> String {
    if kind == Kind::LogicalNotRemoval {
        return source.to_owned();
    }
    span.replace(source, mutated)
}

pub fn registry() -> Vec<Box<dyn Operator>> {
    vec![
        Box::new(ArithmeticBinaryOperator),
        Box::new(ArithmeticAssignOperator),
        Box::new(ConditionalBinaryOperator),
        Box::new(LogicalBinaryOperator),
        Box::new(LogicalNotRemovalOperator),
        Box::new(BitwiseBinaryOperator),
        Box::new(BitwiseAssignOperator),
    ]
}

struct ArithmeticBinaryOperator;
impl Operator for ArithmeticBinaryOperator {
    fn kind(&self) -> Kind {
        Kind::ArithmeticBinary
    }

    fn candidates(&self, expr: &Expr, types: &TypeInfo) -> Vec<Candidate> {
        let Expr::Binary(bin) = expr else { return Vec::new() };
        if !token::is_plain_arithmetic(&bin.op) {
            return Vec::new();
        }
        let Some(source) = bin_op_str(&bin.op) else { return Vec::new() };
        let operands = [types.type_of(&bin.left), types.type_of(&bin.right)];
        if !is_plausible(self.kind(), source, &operands) {
            return Vec::new();
        }
        let span = Span::from(bin_op_span(&bin.op));
        arithmetic_binary_replacements(source)
            .iter()
            .map(|mutated| candidate(self.kind(), span, source, mutated))
            .collect()
    }
}

struct ArithmeticAssignOperator;
impl Operator for ArithmeticAssignOperator {
    fn kind(&self) -> Kind {
        Kind::ArithmeticAssign
    }

    fn candidates(&self, expr: &Expr, types: &TypeInfo) -> Vec<Candidate> {
        let Expr::Binary(bin) = expr else { return Vec::new() };
        if !token::is_arithmetic_assign(&bin.op) {
            return Vec::new();
        }
        let Some(source) = bin_op_str(&bin.op) else { return Vec::new() };
        let operands = [types.type_of(&bin.left), types.type_of(&bin.right)];
        if !is_plausible(self.kind(), source, &operands) {
            return Vec::new();
        }
        let span = Span::from(bin_op_span(&bin.op));
        arithmetic_assign_replacements(source)
            .iter()
            .map(|mutated| candidate(self.kind(), span, source, mutated))
            .collect()
    }
}

struct ConditionalBinaryOperator;
impl Operator for ConditionalBinaryOperator {
    fn kind(&self) -> Kind {
        Kind::ConditionalBinary
    }

    fn candidates(&self, expr: &Expr, types: &TypeInfo) -> Vec<Candidate> {
        let Expr::Binary(bin) = expr else { return Vec::new() };
        if !token::is_comparison(&bin.op) {
            return Vec::new();
        }
        let Some(source) = bin_op_str(&bin.op) else { return Vec::new() };
        let operands = [types.type_of(&bin.left), types.type_of(&bin.right)];
        if !is_plausible(self.kind(), source, &operands) {
            return Vec::new();
        }
        let span = Span::from(bin_op_span(&bin.op));
        conditional_replacements(source)
            .into_iter()
            .map(|mutated| candidate(self.kind(), span, source, mutated))
            .collect()
    }
}

struct LogicalBinaryOperator;
impl Operator for LogicalBinaryOperator {
    fn kind(&self) -> Kind {
        Kind::LogicalBinary
    }

    fn candidates(&self, expr: &Expr, _types: &TypeInfo) -> Vec<Candidate> {
        let Expr::Binary(bin) = expr else { return Vec::new() };
        if !token::is_logical(&bin.op) {
            return Vec::new();
        }
        let Some(source) = bin_op_str(&bin.op) else { return Vec::new() };
        let Some(mutated) = logical_binary_replacement(source) else { return Vec::new() };
        let span = Span::from(bin_op_span(&bin.op));
        vec![candidate(self.kind(), span, source, mutated)]
    }
}

struct LogicalNotRemovalOperator;
impl Operator for LogicalNotRemovalOperator {
    fn kind(&self) -> Kind {
        Kind::LogicalNotRemoval
    }

    fn candidates(&self, expr: &Expr, types: &TypeInfo) -> Vec<Candidate> {
        let Expr::Unary(unary) = expr else { return Vec::new() };
        let UnOp::Not(_) = unary.op else { return Vec::new() };
        let operand = types.type_of(&unary.expr);
        if !is_plausible(self.kind(), "!", &[operand]) {
            return Vec::new();
        }
        let span = Span::from(token::un_op_span(&unary.op));
        vec![candidate(self.kind(), span, "!", "")]
    }
}

struct BitwiseBinaryOperator;
impl Operator for BitwiseBinaryOperator {
    fn kind(&self) -> Kind {
        Kind::BitwiseBinary
    }

    fn candidates(&self, expr: &Expr, _types: &TypeInfo) -> Vec<Candidate> {
        let Expr::Binary(bin) = expr else { return Vec::new() };
        if !token::is_plain_bitwise(&bin.op) {
            return Vec::new();
        }
        let Some(source) = bin_op_str(&bin.op) else { return Vec::new() };
        let span = Span::from(bin_op_span(&bin.op));
        bitwise_binary_replacements(source)
            .iter()
            .map(|mutated| candidate(self.kind(), span, source, mutated))
            .collect()
    }
}

struct BitwiseAssignOperator;
impl Operator for BitwiseAssignOperator {
    fn kind(&self) -> Kind {
        Kind::BitwiseAssign
    }

    fn candidates(&self, expr: &Expr, _types: &TypeInfo) -> Vec<Candidate> {
        let Expr::Binary(bin) = expr else { return Vec::new() };
        if !token::is_bitwise_assign(&bin.op) {
            return Vec::new();
        }
        let Some(source) = bin_op_str(&bin.op) else { return Vec::new() };
        let span = Span::from(bin_op_span(&bin.op));
        bitwise_assign_replacements(source)
            .iter()
            .map(|mutated| candidate(self.kind(), span, source, mutated))
            .collect()
    }
}

fn candidate(kind: Kind, span: Span, original: &str, mutated: &str) -> Candidate {
    Candidate {
        kind,
        span,
        original: original.to_owned(),
        mutated: mutated.to_owned(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use syn::parse_quote;

    fn types_for(file: &syn::File) -> TypeInfo {
        TypeInfo::collect(file)
    }

    #[test]
    fn arithmetic_binary_finds_plus() {
        let file: syn::File = parse_quote! {
            fn add(a: i64, b: i64) -> i64 { a + b }
        };
        let types = types_for(&file);
        let op = ArithmeticBinaryOperator;
        let expr: Expr = parse_quote!(a + b);
        let found = op.candidates(&expr, &types);
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|c| c.original == "+"));
    }

    #[test]
    fn arithmetic_binary_skips_string_concatenation_minus() {
        let file: syn::File = parse_quote! {
            fn f(s: String) { let _ = s; }
        };
        let types = types_for(&file);
        let op = ArithmeticBinaryOperator;
        let expr: Expr = parse_quote!(s - s);
        assert!(op.candidates(&expr, &types).is_empty());
    }

    #[test]
    fn logical_not_removal_matches_unary_not() {
        let types = TypeInfo::default();
        let op = LogicalNotRemovalOperator;
        let expr: Expr = parse_quote!(!ready);
        let found = op.candidates(&expr, &types);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].mutated, "");
    }

    #[test]
    fn bitwise_binary_never_matches_logical_and() {
        let types = TypeInfo::default();
        let op = BitwiseBinaryOperator;
        let expr: Expr = parse_quote!(a && b);
        assert!(op.candidates(&expr, &types).is_empty());
    }

    #[test]
    fn apply_replaces_text_except_for_logical_not_removal() {
        let span = Span::quad(1, 1, 1, 2);
        assert_eq!(apply(Kind::ArithmeticBinary, "+", &span, "-"), "-");
        assert_eq!(apply(Kind::LogicalNotRemoval, "!x", &span, ""), "!x");
    }
}
