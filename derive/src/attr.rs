use std::collections::HashSet;

use syn::{
    Data, DeriveInput, Error, Field, Fields, GenericArgument, LitStr, PathArguments, Result, Type,
    punctuated::Punctuated, spanned::Spanned, token::Comma,
};

/// The named fields of the struct a derive is applied to.
pub(crate) fn named_fields<'a>(
    input: &'a DeriveInput,
    derive: &str,
) -> Result<&'a Punctuated<Field, Comma>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(Error::new(
                input.span(),
                format!("`{derive}` may only be derived on structs with named fields."),
            )),
        },
        _ => Err(Error::new(
            input.span(),
            format!("`{derive}` may only be derived on structs."),
        )),
    }
}

/// The attribute named `name` on `field`, if present.
pub(crate) fn find<'a>(field: &'a Field, name: &str) -> Option<&'a syn::Attribute> {
    field.attrs.iter().find(|a| a.path().is_ident(name))
}

/// The argument `T` of a type spelled `Wrapper<T>`, if the last path segment
/// of `ty` is `wrapper`.
pub(crate) fn wrapped<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };

    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }

    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };

    match arguments.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

/// Reject repeated tags, pointing at the second occurrence.
pub(crate) fn unique<'a>(tags: impl IntoIterator<Item = &'a LitStr>, what: &str) -> Result<()> {
    let mut seen = HashSet::new();

    for tag in tags {
        if !seen.insert(tag.value()) {
            Err(Error::new(tag.span(), format!("{what} tags must be unique.")))?;
        }
    }

    Ok(())
}
