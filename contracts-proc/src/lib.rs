//! Procedural macros for the role registry.
extern crate proc_macro;
use proc_macro::TokenStream;

/// Shorthand to print nice errors.
macro_rules! error {
    ($tokens:expr, $($msg:expr),+ $(,)?) => {{
        let error = syn::Error::new(syn::spanned::Spanned::span(&$tokens), format!($($msg),+));
        return error.to_compile_error().into();
    }};
    (@ $tokens:expr, $($msg:expr),+ $(,)?) => {{
        return Err(syn::Error::new(syn::spanned::Spanned::span(&$tokens), format!($($msg),+)))
    }};
}

mod interface_id;

/// Computes the interface id as an associated constant `INTERFACE_ID` for
/// the trait that describes a contract's ABI, plus an `interface_id()`
/// accessor returning it as `B32`.
///
/// The id is the XOR of the 4-byte selectors of every method in the trait, as
/// defined by [ERC-165]. Selectors are derived from the camel-cased method
/// name and the Solidity names of its argument types. Only `B256`, `B32`,
/// `Address`, `U256` and `bool` arguments are supported.
///
/// Method names can be overridden with `#[selector(name = "actualName")]`.
/// Arguments identifying the acting principal are not part of the ABI and
/// must be marked with `#[sender]`.
///
/// [ERC-165]: https://eips.ethereum.org/EIPS/eip-165
#[proc_macro_attribute]
pub fn interface_id(attr: TokenStream, input: TokenStream) -> TokenStream {
    interface_id::interface_id(&attr, input)
}
