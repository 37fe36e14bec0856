use proc_macro::TokenStream;
use syn::{DeriveInput, Result, parse_macro_input};

mod attr;
mod from_tre;
mod from_tres;

#[proc_macro_derive(FromTre, attributes(field))]
pub fn derive_from_tre(input: TokenStream) -> TokenStream {
    expand(parse_macro_input!(input as DeriveInput), from_tre::expand_from_tre)
}

#[proc_macro_derive(FromTres, attributes(tre))]
pub fn derive_from_tres(input: TokenStream) -> TokenStream {
    expand(parse_macro_input!(input as DeriveInput), from_tres::expand_from_tres)
}

fn expand(input: DeriveInput, f: fn(&DeriveInput) -> Result<TokenStream>) -> TokenStream {
    f(&input).unwrap_or_else(|err| err.to_compile_error().into())
}
