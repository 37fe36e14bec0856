use proc_macro::TokenStream;
use quote::{ToTokens, quote};
use syn::{DeriveInput, Error, Field, Ident, LitStr, Result};

use crate::attr;

pub(crate) fn expand_from_tres(input: &DeriveInput) -> Result<TokenStream> {
    let slots = attr::named_fields(input, "FromTres")?
        .iter()
        .filter_map(|field| Some(Slot::parse(field, attr::find(field, "tre")?)))
        .collect::<Result<Vec<_>>>()?;

    attr::unique(slots.iter().map(|s| &s.tag), "Record")?;

    let arms = slots.iter().map(Slot::arm);
    let name = &input.ident;

    let expanded = quote! {
        impl ::tre_codec::avec::FromTres for #name {
            fn add_tre(&mut self, tag: &str) -> Option<&mut dyn ::tre_codec::avec::FromTre> {
                match tag {
                    #(#arms)*
                    _ => None,
                }
            }
        }
    };

    Ok(expanded.into())
}

/// A struct field holding the records of one tag.
struct Slot {
    name: Ident,
    tag: LitStr,
    /// Whether every record is kept, rather than only the last.
    every: bool,
}

impl Slot {
    fn parse(field: &Field, attribute: &syn::Attribute) -> Result<Self> {
        let Some(name) = field.ident.clone() else {
            Err(Error::new_spanned(field, "Record fields must be named."))?
        };

        let tag = attribute.parse_args::<LitStr>()?;

        let every = if attr::wrapped(&field.ty, "Vec").is_some() {
            true
        } else if attr::wrapped(&field.ty, "Option").is_some() {
            false
        } else {
            Err(Error::new_spanned(
                &field.ty,
                "Record fields must have type `Option<T>` or `Vec<T>`.",
            ))?
        };

        Ok(Self { name, tag, every })
    }

    fn arm(&self) -> impl ToTokens {
        let Self { name, tag, every } = self;

        let receiver = if *every {
            quote! {
                self.#name.push(Default::default());
                self.#name.last_mut().map(|r| r as _)
            }
        } else {
            quote! { Some(self.#name.insert(Default::default())) }
        };

        quote! { #tag => { #receiver } }
    }
}
