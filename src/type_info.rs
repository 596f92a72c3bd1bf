//! Best-effort syntactic type information (C1's `type_info`).
//!
//! There is no embedded Rust type-checker here: "type info" is whatever can be read
//! directly off the syntax — literal suffixes, `let` type ascriptions, function
//! signatures, and `as` casts. Anything not covered by one of those is simply
//! unknown, which is exactly the case [`crate::type_validator`] is required to treat
//! as fail-open.

use std::collections::HashMap;

use syn::{Expr, FnArg, ItemFn, Lit, Local, Pat, Type};

/// A coarse syntactic type classification, sufficient for the checks in §4.3.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TypeHint {
    Bool,
    String,
    Float,
    SignedInt,
    UnsignedInt,
    Pointer,
    Reference,
    ArrayOrSlice,
    /// `dyn Trait`, `impl Trait`, or a named struct/enum/generic type: treated the
    /// same way the spec treats "pointer, interface, or struct" types.
    StructOrEnum,
}

/// A per-file table mapping local-variable and parameter names to their syntactic type.
#[derive(Default, Debug)]
pub struct TypeInfo {
    by_name: HashMap<String, TypeHint>,
}

impl TypeInfo {
    /// Walk a parsed file collecting every syntactically-visible type annotation.
    pub fn collect(file: &syn::File) -> TypeInfo {
        let mut info = TypeInfo::default();
        let mut collector = Collector { info: &mut info };
        syn::visit::visit_file(&mut collector, file);
        info
    }

    /// Best-effort type of an expression. Returns `None` when nothing in the table
    /// or the expression's own shape gives a hint.
    pub fn type_of(&self, expr: &Expr) -> Option<TypeHint> {
        match expr {
            Expr::Path(p) if p.path.segments.len() == 1 => {
                self.by_name.get(&p.path.segments[0].ident.to_string()).copied()
            }
            Expr::Lit(lit) => hint_from_lit(&lit.lit),
            Expr::Cast(cast) => hint_from_type(&cast.ty),
            Expr::Paren(p) => self.type_of(&p.expr),
            Expr::Group(g) => self.type_of(&g.expr),
            Expr::Reference(_) => Some(TypeHint::Reference),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

struct Collector<'a> {
    info: &'a mut TypeInfo,
}

impl<'ast> syn::visit::Visit<'ast> for Collector<'_> {
    fn visit_local(&mut self, local: &'ast Local) {
        if let Pat::Type(pat_type) = &local.pat {
            if let Pat::Ident(ident) = &*pat_type.pat {
                if let Some(hint) = hint_from_type(&pat_type.ty) {
                    self.info.by_name.insert(ident.ident.to_string(), hint);
                }
            }
        }
        syn::visit::visit_local(self, local);
    }

    fn visit_item_fn(&mut self, item_fn: &'ast ItemFn) {
        for arg in &item_fn.sig.inputs {
            if let FnArg::Typed(pat_type) = arg {
                if let Pat::Ident(ident) = &*pat_type.pat {
                    if let Some(hint) = hint_from_type(&pat_type.ty) {
                        self.info.by_name.insert(ident.ident.to_string(), hint);
                    }
                }
            }
        }
        syn::visit::visit_item_fn(self, item_fn);
    }
}

fn hint_from_lit(lit: &Lit) -> Option<TypeHint> {
    match lit {
        Lit::Int(i) => match i.suffix() {
            "" => None,
            s if s.starts_with('u') => Some(TypeHint::UnsignedInt),
            _ => Some(TypeHint::SignedInt),
        },
        Lit::Float(_) => Some(TypeHint::Float),
        Lit::Str(_) => Some(TypeHint::String),
        Lit::Bool(_) => Some(TypeHint::Bool),
        _ => None,
    }
}

fn hint_from_type(ty: &Type) -> Option<TypeHint> {
    match ty {
        Type::Path(tp) => {
            let name = tp.path.segments.last()?.ident.to_string();
            Some(match name.as_str() {
                "bool" => TypeHint::Bool,
                "String" | "str" => TypeHint::String,
                "f32" | "f64" => TypeHint::Float,
                "i8" | "i16" | "i32" | "i64" | "i128" | "isize" => TypeHint::SignedInt,
                "u8" | "u16" | "u32" | "u64" | "u128" | "usize" => TypeHint::UnsignedInt,
                _ => TypeHint::StructOrEnum,
            })
        }
        Type::Ptr(_) => Some(TypeHint::Pointer),
        Type::Reference(r) => hint_from_type(&r.elem).or(Some(TypeHint::Reference)),
        Type::Array(_) | Type::Slice(_) => Some(TypeHint::ArrayOrSlice),
        Type::TraitObject(_) | Type::ImplTrait(_) => Some(TypeHint::StructOrEnum),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn collects_let_binding_type() {
        let file: syn::File = parse_quote! {
            fn f() {
                let x: f64 = 1.0;
                let _ = x + 2.0;
            }
        };
        let info = TypeInfo::collect(&file);
        let x_expr: Expr = parse_quote!(x);
        assert_eq!(info.type_of(&x_expr), Some(TypeHint::Float));
    }

    #[test]
    fn collects_fn_parameter_type() {
        let file: syn::File = parse_quote! {
            fn add(a: i64, b: i64) -> i64 { a + b }
        };
        let info = TypeInfo::collect(&file);
        let a: Expr = parse_quote!(a);
        assert_eq!(info.type_of(&a), Some(TypeHint::SignedInt));
    }

    #[test]
    fn unknown_identifier_has_no_hint() {
        let file: syn::File = parse_quote! { fn f() {} };
        let info = TypeInfo::collect(&file);
        let unknown: Expr = parse_quote!(nope);
        assert_eq!(info.type_of(&unknown), None);
        assert!(info.is_empty());
    }

    #[test]
    fn literal_suffix_gives_a_hint_without_any_declaration() {
        let info = TypeInfo::default();
        let lit: Expr = parse_quote!(5u32);
        assert_eq!(info.type_of(&lit), Some(TypeHint::UnsignedInt));
    }
}
