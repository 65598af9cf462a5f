use matches2::option_match;
use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{Error, Result};

use crate::util::{self, Attr, Named};

/// The marker traits implemented by attributes without further configuration.
pub(crate) enum Kind {
    Component,
    Event,
}

pub(crate) fn imp(args: TokenStream, input: TokenStream, kind: Kind) -> Result<TokenStream> {
    let input: syn::DeriveInput = syn::parse2(input)?;

    let mut crate_name = util::default_crate_name();

    if !args.is_empty() {
        let args: Attr<FnOpt> = syn::parse2(args)?;

        if let Some((_, ts)) =
            args.find_one(|opt| option_match!(opt, FnOpt::SparsecAs(_, ts) => ts))?
        {
            crate_name = ts.clone();
        }
    }

    let trait_ = match kind {
        Kind::Component => quote!(#crate_name::comp::Component),
        Kind::Event => quote!(#crate_name::event::Event),
    };
    let marker_impl = util::impl_trait(&input, trait_, quote!());

    Ok(quote! {
        #input
        #marker_impl
    })
}

enum FnOpt {
    SparsecAs(syn::token::Paren, TokenStream),
}

impl Parse for Named<FnOpt> {
    fn parse(input: ParseStream) -> Result<Self> {
        let name = input.parse::<syn::Ident>()?;

        let value = match name.to_string().as_str() {
            "sparsec_as" => {
                let (paren, ts) = util::parse_crate_name(input)?;
                FnOpt::SparsecAs(paren, ts)
            }
            _ => return Err(Error::new_spanned(&name, format!("Unknown argument `{}`", name))),
        };

        Ok(Named { name, value })
    }
}
