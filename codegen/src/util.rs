use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Error, Result};

/// Comma-separated named arguments of an attribute.
pub(crate) struct Attr<T> {
    pub(crate) items: Punctuated<Named<T>, syn::Token![,]>,
}

impl<T> Parse for Attr<T>
where
    Named<T>: Parse,
{
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(Self { items: Punctuated::parse_terminated(input)? })
    }
}

impl<T> Attr<T> {
    /// Finds the only argument matched by `matcher`.
    pub(crate) fn find_one<U>(
        &self,
        matcher: impl Fn(&T) -> Option<&U>,
    ) -> Result<Option<(&syn::Ident, &U)>> {
        let mut found = None;

        for item in &self.items {
            if let Some(value) = matcher(&item.value) {
                if found.is_some() {
                    return Err(Error::new_spanned(
                        &item.name,
                        format!("Argument `{}` cannot be specified more than once", item.name),
                    ));
                }
                found = Some((&item.name, value));
            }
        }

        Ok(found)
    }

    /// Iterates over all arguments matched by `matcher`.
    pub(crate) fn find_all<'t, U: 't>(
        &'t self,
        matcher: impl Fn(&'t T) -> Option<&'t U> + 't,
    ) -> impl Iterator<Item = &'t U> + 't {
        self.items.iter().filter_map(move |item| matcher(&item.value))
    }
}

/// An argument value with the name it was given as.
pub(crate) struct Named<T> {
    pub(crate) name:  syn::Ident,
    pub(crate) value: T,
}

/// Parses the parenthesized path in `sparsec_as(path)`.
pub(crate) fn parse_crate_name(input: ParseStream) -> Result<(syn::token::Paren, TokenStream)> {
    let inner;
    let paren = syn::parenthesized!(inner in input);
    Ok((paren, inner.parse()?))
}

/// The path to the runtime crate unless overridden by `sparsec_as`.
pub(crate) fn default_crate_name() -> TokenStream { quote!(::sparsec) }

/// Implements `trait_` for the type declared by `input` with an optional body.
pub(crate) fn impl_trait(
    input: &syn::DeriveInput,
    trait_: TokenStream,
    body: TokenStream,
) -> TokenStream {
    let ident = &input.ident;
    let (decl, usage, where_) = input.generics.split_for_impl();
    quote! {
        #[automatically_derived]
        impl #decl #trait_ for #ident #usage #where_ {
            #body
        }
    }
}
