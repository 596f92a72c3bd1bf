//! Attribute macros to control how `mutagen` mutates code.
//!
//! A function that is difficult to test, or has disruptive effects when mutated, can
//! be marked with [macro@skip].

use proc_macro::TokenStream;

/// `mutagen` should not mutate functions marked with this attribute.
///
/// This can currently only be applied to functions, not modules or other syntactic constructs.
///
/// ```
/// #[mutagen::skip]
/// pub fn some_difficult_function() {
///     // ...
/// }
/// ```
///
/// This is a no-op during compilation, but is seen by mutagen as it walks the source.
#[proc_macro_attribute]
pub fn skip(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}
