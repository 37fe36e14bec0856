use proc_macro::TokenStream;
use quote::{ToTokens, quote};
use syn::{
    DeriveInput, Error, ExprClosure, Field, Ident, LitStr, Pat, Result, Token, Type,
    parse::{Parse, ParseStream},
};

use crate::attr;

pub(crate) fn expand_from_tre(input: &DeriveInput) -> Result<TokenStream> {
    let receivers = attr::named_fields(input, "FromTre")?
        .iter()
        .filter_map(|field| Some(Receiver::parse(field, attr::find(field, "field")?)))
        .collect::<Result<Vec<_>>>()?;

    attr::unique(receivers.iter().map(|r| &r.tag), "Field")?;

    let arms = receivers.iter().map(Receiver::arm);
    let name = &input.ident;

    let expanded = quote! {
        impl ::tre_codec::avec::FromTre for #name {
            fn add_field(&mut self, tag: &str, field: &::tre_codec::sans::field::Field) {
                match ::tre_codec::sans::cursor::base_tag(tag) {
                    #(#arms)*
                    _ => {}
                }
            }
        }
    };

    Ok(expanded.into())
}

/// A struct field receiving the subfield with a given tag.
struct Receiver {
    name: Ident,
    tag: LitStr,
    store: Store,
}

enum Store {
    /// Replace the `Option` held by the field.
    Replace { value: Type },
    /// Pass each converted value to a closure along with the field.
    Accumulate {
        field: Type,
        value: Type,
        closure: ExprClosure,
    },
}

impl Receiver {
    fn parse(field: &Field, attribute: &syn::Attribute) -> Result<Self> {
        let Some(name) = field.ident.clone() else {
            Err(Error::new_spanned(field, "Receiving fields must be named."))?
        };

        let FieldAttribute { tag, closure } = attribute.parse_args()?;

        let store = match closure {
            Some(closure) => Store::Accumulate {
                field: field.ty.clone(),
                value: closure_value_type(&closure)?,
                closure,
            },
            None => Store::Replace {
                value: attr::wrapped(&field.ty, "Option").cloned().ok_or_else(|| {
                    Error::new_spanned(
                        &field.ty,
                        "Fields without an accumulator must have type `Option<T>`.",
                    )
                })?,
            },
        };

        Ok(Self { name, tag, store })
    }

    fn arm(&self) -> impl ToTokens {
        let Self { name, tag, store } = self;

        let (value, receive) = match store {
            Store::Replace { value } => (value, quote! { self.#name = Some(value) }),
            Store::Accumulate {
                field,
                value,
                closure,
            } => {
                let inputs = closure.inputs.iter().collect::<Vec<_>>();
                let (accumulator, argument) = (inputs[0], inputs[1]);
                let body = &closure.body;

                (
                    value,
                    quote! {
                        (|#accumulator: &mut #field, #argument| #body)(&mut self.#name, value)
                    },
                )
            }
        };

        quote! {
            #tag => {
                if let Some(value) = <#value as ::tre_codec::avec::FromField>::from_field(field) {
                    #receive;
                }
            }
        }
    }
}

/// The annotated type of an accumulator closure's second parameter.
fn closure_value_type(closure: &ExprClosure) -> Result<Type> {
    if closure.inputs.len() != 2 {
        Err(Error::new_spanned(
            &closure.inputs,
            "Accumulators take two parameters: the field and a value.",
        ))?;
    }

    match &closure.inputs[1] {
        Pat::Type(typed) => Ok((*typed.ty).clone()),
        other => Err(Error::new_spanned(
            other,
            "The accumulator's value parameter needs a type annotation.",
        )),
    }
}

/// `#[field("TAG")]` or `#[field("TAG", |field, value: T| ...)]`.
struct FieldAttribute {
    tag: LitStr,
    closure: Option<ExprClosure>,
}

impl Parse for FieldAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let tag = input.parse()?;

        let closure = match input.parse::<Option<Token![,]>>()? {
            Some(_) => Some(input.parse()?),
            None => None,
        };

        Ok(Self { tag, closure })
    }
}
