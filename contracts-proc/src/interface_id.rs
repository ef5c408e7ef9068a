//! Defines the `#[interface_id]` procedural macro.

use std::mem;

use convert_case::{Case, Casing};
use proc_macro::TokenStream;
use proc_macro2::{Ident, Span};
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, FnArg, ItemTrait, LitByteStr, LitStr, Result, Token,
    TraitItem, Type,
};

/// Computes an interface id as an associated constant for the trait.
pub(crate) fn interface_id(
    _attr: &TokenStream,
    input: TokenStream,
) -> TokenStream {
    let mut input = parse_macro_input!(input as ItemTrait);

    let mut signatures = Vec::new();
    for item in &mut input.items {
        let TraitItem::Fn(func) = item else {
            continue;
        };

        let mut override_fn_name = None;
        for attr in mem::take(&mut func.attrs) {
            if attr.path().is_ident("selector") {
                if override_fn_name.is_some() {
                    error!(attr.path(), "more than one selector attribute");
                }
                let args: SelectorArgs = match attr.parse_args() {
                    Ok(args) => args,
                    Err(error) => error!(attr.path(), "{}", error),
                };
                override_fn_name = Some(args.name);
            } else {
                // Put back any other attributes.
                func.attrs.push(attr);
            }
        }

        let solidity_fn_name = override_fn_name.unwrap_or_else(|| {
            let rust_fn_name = func.sig.ident.to_string();
            rust_fn_name.to_case(Case::Camel)
        });

        let mut sol_types = Vec::new();
        for arg in &mut func.sig.inputs {
            // Opt out any `self` arguments.
            let FnArg::Typed(typed) = arg else {
                continue;
            };

            let len = typed.attrs.len();
            typed.attrs.retain(|attr| !attr.path().is_ident("sender"));
            if typed.attrs.len() != len {
                continue;
            }

            let Some(name) = solidity_type_name(&typed.ty) else {
                error!(
                    typed.ty,
                    "argument type has no Solidity equivalent, mark the \
                     acting principal with `#[sender]`"
                );
            };
            sol_types.push(name);
        }

        let signature =
            format!("{solidity_fn_name}({})", sol_types.join(","));
        signatures.push(LitByteStr::new(signature.as_bytes(), Span::call_site()));
    }

    let name = input.ident;
    let vis = input.vis;
    let attrs = input.attrs;
    let supertraits = input.supertraits;
    let colon = input.colon_token;
    let trait_items = input.items;
    let (_impl_generics, ty_generics, where_clause) =
        input.generics.split_for_impl();

    let selectors = signatures.iter().map(|signature| {
        quote! { selector(#signature) }
    });
    let interface_id = if signatures.is_empty() {
        quote! { 0 }
    } else {
        quote! { #(#selectors)^* }
    };

    // Keep the same trait with an additional associated constant
    // `INTERFACE_ID`.
    quote! {
        #(#attrs)*
        #vis trait #name #ty_generics #colon #supertraits #where_clause {
            #(#trait_items)*

            #[doc = concat!("Solidity interface id associated with ", stringify!(#name), " trait.")]
            #[doc = "Computed as a XOR of selectors for each function in the trait."]
            const INTERFACE_ID: u32 = {
                const fn selector(signature: &[u8]) -> u32 {
                    let hash = ::keccak_const::Keccak256::new()
                        .update(signature)
                        .finalize();
                    u32::from_be_bytes([hash[0], hash[1], hash[2], hash[3]])
                }

                #interface_id
            };

            #[doc = concat!("Returns the interface id of ", stringify!(#name), " as `B32`.")]
            #[must_use]
            fn interface_id() -> ::alloy_primitives::aliases::B32
            where
                Self: Sized,
            {
                ::alloy_primitives::aliases::B32::from(Self::INTERFACE_ID)
            }
        }
    }
    .into()
}

/// Maps a Rust argument type to the Solidity type used in the selector.
fn solidity_type_name(ty: &Type) -> Option<&'static str> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    match segment.ident.to_string().as_str() {
        "B256" => Some("bytes32"),
        "B32" => Some("bytes4"),
        "Address" => Some("address"),
        "U256" => Some("uint256"),
        "bool" => Some("bool"),
        _ => None,
    }
}

/// Contains arguments of the `#[selector(..)]` attribute.
struct SelectorArgs {
    name: String,
}

impl Parse for SelectorArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let ident: Ident = input.parse()?;

        if ident == "name" {
            let _: Token![=] = input.parse()?;
            let lit: LitStr = input.parse()?;
            Ok(SelectorArgs { name: lit.value() })
        } else {
            error!(@ident, "expected identifier 'name'")
        }
    }
}
