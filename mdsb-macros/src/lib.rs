#![allow(unknown_lints)]
#![allow(require_stability_comment)]

use proc_macro::TokenStream;

use proc_macro2::{Ident, Span};

#[macro_use]
extern crate quote;

/// Builds test image `n` into a fresh temporary file and evaluates to that file.
#[cfg(not(tarpaulin_include))]
#[proc_macro]
pub fn generate_image(input: TokenStream) -> TokenStream {
    let item: syn::LitInt = syn::parse(input).expect("failed to parse input");
    let num_to_gen = item.base10_parse::<usize>().unwrap();
    let generate_fn = Ident::new(
        format!("generate_{:04}", num_to_gen).as_str(),
        Span::call_site(),
    );
    let output = quote! {
        {
            let file = tempfile::NamedTempFile::new().unwrap();
            #generate_fn(file.as_file());
            file
        }
    };
    output.into()
}

/// Opens a file produced by `generate_image!` as a disk.
#[cfg(not(tarpaulin_include))]
#[proc_macro]
pub fn load_image(input: TokenStream) -> TokenStream {
    let item: syn::Expr = syn::parse(input).expect("failed to parse input");
    let output = quote! {
        mdsb::DiskFile::open_file(#item.reopen().unwrap()).unwrap()
    };
    output.into()
}

/// Returns `Err(error.into())` from the enclosing function unless `test` holds.
#[cfg(not(tarpaulin_include))]
#[proc_macro]
pub fn assert_or_err(input: TokenStream) -> TokenStream {
    let params = syn::parse_macro_input!(input with syn::punctuated::Punctuated<syn::Expr, syn::Token![,]>::parse_separated_nonempty);
    assert_eq!(params.len(), 2);
    let test = &params[0];
    let error = &params[1];
    let output = quote! {
        if (!(#test)) {
            return Err(#error.into());
        }
    };
    output.into()
}

/// Marks a test that runs with logging initialised.
#[cfg(not(tarpaulin_include))]
#[proc_macro_attribute]
pub fn test_sb(_: TokenStream, item: TokenStream) -> TokenStream {
    let input_fn = syn::parse_macro_input!(item as syn::ItemFn);
    let input_sig = input_fn.sig.clone();
    let input_blk = input_fn.block.stmts.clone();
    let output = quote! {
        #[test]
        #input_sig {
            mdsb::test::logging::init_log();
            #(#input_blk)*
        }
    };
    output.into()
}
