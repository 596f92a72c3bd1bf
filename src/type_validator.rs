//! Fail-open type validation for candidate mutants (C3).
//!
//! Per SPEC_FULL.md §4.3, the absence of type information is never a reason to
//! reject a mutant: every rule here only fires when at least one operand's
//! syntactic type (see [`crate::type_info`]) is actually known. An unknown type
//! always passes.

use crate::kind::Kind;
use crate::type_info::TypeHint;

/// Decide whether a candidate replacement at a binary/unary operator site is worth
/// generating, given the best-effort types of its operand(s).
///
/// `operands` holds one hint per operand (one for `LogicalNotRemoval`, two for
/// everything else); entries are `None` when the type could not be determined.
pub fn is_plausible(kind: Kind, original: &str, operands: &[Option<TypeHint>]) -> bool {
    if operands.iter().all(Option::is_none) {
        return true;
    }
    match kind {
        Kind::ArithmeticBinary | Kind::ArithmeticAssign => arithmetic_is_plausible(original, operands),
        Kind::ConditionalBinary => conditional_is_plausible(original, operands),
        Kind::LogicalNotRemoval => operands.first().copied().flatten().map_or(true, |h| h == TypeHint::Bool),
        Kind::ArithmeticIncdec
        | Kind::LogicalBinary
        | Kind::BitwiseBinary
        | Kind::BitwiseAssign => true,
    }
}

fn arithmetic_is_plausible(original: &str, operands: &[Option<TypeHint>]) -> bool {
    let base_op = original.trim_end_matches('=');
    for hint in operands.iter().flatten() {
        match hint {
            TypeHint::Float if base_op == "%" => return false,
            TypeHint::String if base_op != "+" => return false,
            TypeHint::Pointer | TypeHint::StructOrEnum => return false,
            TypeHint::ArrayOrSlice if base_op != "+" => return false,
            _ => {}
        }
    }
    true
}

fn conditional_is_plausible(original: &str, operands: &[Option<TypeHint>]) -> bool {
    let is_ordering = matches!(original, "<" | "<=" | ">" | ">=");
    if !is_ordering {
        // `==`/`!=` are always kept: Rust requires `PartialEq` to compile at all,
        // so a non-comparable replacement would already have been rejected upstream.
        return true;
    }
    for hint in operands.iter().flatten() {
        if matches!(
            hint,
            TypeHint::StructOrEnum | TypeHint::Pointer | TypeHint::Reference | TypeHint::ArrayOrSlice
        ) {
            return false;
        }
    }
    true
}
