use matches2::option_match;
use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Error, Result};

use crate::util::{self, Attr, Named};

pub(crate) fn imp(args: TokenStream, input: TokenStream) -> Result<TokenStream> {
    let input: syn::DeriveInput = syn::parse2(input)?;

    let mut crate_name = util::default_crate_name();
    let mut required = Vec::new();

    if !args.is_empty() {
        let args: Attr<FnOpt> = syn::parse2(args)?;

        if let Some((_, ts)) =
            args.find_one(|opt| option_match!(opt, FnOpt::SparsecAs(_, ts) => ts))?
        {
            crate_name = ts.clone();
        }

        for types in args.find_all(|opt| option_match!(opt, FnOpt::Require(_, types) => types)) {
            required.extend(types.iter().cloned());
        }
    }

    let system_impl = util::impl_trait(
        &input,
        quote!(#crate_name::system::System),
        quote! {
            #[allow(unused_variables)]
            fn require(&self, req: &mut #crate_name::system::Require<'_>) {
                #(
                    req.require_component::<#required>();
                )*
            }
        },
    );

    Ok(quote! {
        #input
        #system_impl
    })
}

enum FnOpt {
    SparsecAs(syn::token::Paren, TokenStream),
    Require(syn::token::Paren, Punctuated<syn::Type, syn::Token![,]>),
}

impl Parse for Named<FnOpt> {
    fn parse(input: ParseStream) -> Result<Self> {
        let name = input.parse::<syn::Ident>()?;

        let value = match name.to_string().as_str() {
            "sparsec_as" => {
                let (paren, ts) = util::parse_crate_name(input)?;
                FnOpt::SparsecAs(paren, ts)
            }
            "require" => {
                let inner;
                let paren = syn::parenthesized!(inner in input);
                FnOpt::Require(paren, Punctuated::parse_terminated(&inner)?)
            }
            _ => return Err(Error::new_spanned(&name, format!("Unknown argument `{}`", name))),
        };

        Ok(Named { name, value })
    }
}
