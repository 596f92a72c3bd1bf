//! The family of a mutation operator, and the fixed replacement tables for each family.
//!
//! The tables here are the literal contents of the operator tables in the operator
//! registry design: each source operator enumerates *all* same-arity siblings in its
//! family, and the type validator (see [`crate::type_validator`]) is responsible for
//! pruning the ill-typed ones later.

use serde::Serialize;
use strum::{Display, EnumString};

/// The family a mutant's replacement operator belongs to.
///
/// This is an open set: the registry in [`crate::operators`] can grow new
/// members without any other component needing to change. `arithmetic_incdec`
/// and the `&^` bitwise-binary replacement describe Go operators with no
/// parseable Rust equivalent; they stay declared here for schema completeness,
/// but are never emitted against a `syn` AST (`ArithmeticIncdec` is simply
/// never added to `operators::registry`, and `bitwise_binary_replacements`
/// below never maps any source token to `"&^"`).
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Display, EnumString, PartialOrd, Ord,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    ArithmeticBinary,
    ArithmeticAssign,
    ArithmeticIncdec,
    ConditionalBinary,
    LogicalBinary,
    LogicalNotRemoval,
    BitwiseBinary,
    BitwiseAssign,
}

impl Kind {
    /// All kinds, in the order they appear in the specification's operator table.
    pub const ALL: [Kind; 8] = [
        Kind::ArithmeticBinary,
        Kind::ArithmeticAssign,
        Kind::ArithmeticIncdec,
        Kind::ConditionalBinary,
        Kind::LogicalBinary,
        Kind::LogicalNotRemoval,
        Kind::BitwiseBinary,
        Kind::BitwiseAssign,
    ];
}

/// `%` is excluded from `+`/`-`'s replacement set in the specified table, so the
/// family is not fully symmetric; encode it explicitly rather than derive it.
pub fn arithmetic_binary_replacements(source: &str) -> &'static [&'static str] {
    match source {
        "+" => &["-", "*", "/"],
        "-" => &["+", "*", "/"],
        "*" => &["+", "-", "/", "%"],
        "/" => &["+", "-", "*", "%"],
        "%" => &["+", "-", "*", "/"],
        _ => &[],
    }
}

pub fn arithmetic_assign_replacements(source: &str) -> &'static [&'static str] {
    match source {
        "+=" => &["-=", "*=", "/="],
        "-=" => &["+=", "*=", "/="],
        "*=" => &["+=", "-=", "/="],
        "/=" => &["+=", "-=", "*="],
        _ => &[],
    }
}

/// The six comparison operators; any source operator is replaced by the other five.
pub const CONDITIONAL: &[&str] = &["==", "!=", "<", "<=", ">", ">="];

pub fn conditional_replacements(source: &str) -> Vec<&'static str> {
    CONDITIONAL.iter().copied().filter(|&op| op != source).collect()
}

pub fn logical_binary_replacement(source: &str) -> Option<&'static str> {
    match source {
        "&&" => Some("||"),
        "||" => Some("&&"),
        _ => None,
    }
}

pub fn bitwise_binary_replacements(source: &str) -> &'static [&'static str] {
    match source {
        "&" => &["|", "^"],
        "|" => &["&", "^"],
        "^" => &["&", "|"],
        "<<" => &[">>"],
        ">>" => &["<<"],
        // `&^` (Go bit-clear) has no Rust token and is never a `source` here.
        _ => &[],
    }
}

pub fn bitwise_assign_replacements(source: &str) -> &'static [&'static str] {
    match source {
        "&=" => &["|=", "^="],
        "|=" => &["&=", "^="],
        "^=" => &["&=", "|="],
        "<<=" => &[">>="],
        ">>=" => &["<<="],
        _ => &[],
    }
}
