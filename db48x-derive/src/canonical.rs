use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data,
    DeriveInput,
    Fields,
    Index,
};

/// Entry point used by `derive_canonical`.
pub fn derive(ast: DeriveInput) -> TokenStream2 {
    match &ast.data {
        Data::Struct(data) => derive_struct(&ast, &data.fields),
        Data::Enum(data) => derive_enum(&ast, data),
        Data::Union(_) => {
            syn::Error::new_spanned(&ast, "Canonical cannot be derived for unions")
                .to_compile_error()
        }
    }
}

fn derive_struct(ast: &DeriveInput, fields: &Fields) -> TokenStream2 {
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let field_idents: Vec<TokenStream2> = match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(|f| f.ident.clone().unwrap().into_token_stream())
            .collect(),
        Fields::Unnamed(unnamed) => (0..unnamed.unnamed.len())
            .map(|i| Index::from(i).into_token_stream())
            .collect(),
        Fields::Unit => Vec::new(),
    };

    let size_sum = field_idents.iter().map(|f| quote! { self.#f.encoded_size() });
    let encode_calls = field_idents.iter().map(|f| quote! { self.#f.encode(out); });

    let construct = construct_fields(fields, &quote! { consumed += __field_consumed; });

    quote! {
        impl #impl_generics ::db48x_types::canonical::Canonical for #name #ty_generics #where_clause {
            fn encoded_size(&self) -> usize {
                0usize #(+ #size_sum)*
            }

            fn encode(&self, out: &mut impl Extend<u8>) {
                #(#encode_calls)*
            }

            fn decode(bytes: &[u8]) -> ::db48x_types::Result<(Self, usize)> {
                let mut consumed = 0usize;
                #construct
            }
        }
    }
}

fn derive_enum(ast: &DeriveInput, data: &syn::DataEnum) -> TokenStream2 {
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let mut size_arms = Vec::new();
    let mut encode_arms = Vec::new();
    let mut decode_arms = Vec::new();

    for (index, variant) in data.variants.iter().enumerate() {
        let vident = &variant.ident;
        let index = index as u64;

        match &variant.fields {
            Fields::Unit => {
                size_arms.push(quote! {
                    #name::#vident => ::db48x_types::leb128::size_u64(#index)
                });
                encode_arms.push(quote! {
                    #name::#vident => { ::db48x_types::leb128::write_u64(out, #index); }
                });
                decode_arms.push(quote! {
                    #index => (#name::#vident, consumed)
                });
            }
            Fields::Unnamed(unnamed) => {
                let bindings: Vec<syn::Ident> = (0..unnamed.unnamed.len())
                    .map(|i| quote::format_ident!("__f{}", i))
                    .collect();
                size_arms.push(quote! {
                    #name::#vident(#(#bindings),*) => {
                        ::db48x_types::leb128::size_u64(#index) #(+ #bindings.encoded_size())*
                    }
                });
                encode_arms.push(quote! {
                    #name::#vident(#(#bindings),*) => {
                        ::db48x_types::leb128::write_u64(out, #index);
                        #(#bindings.encode(out);)*
                    }
                });
                let decode_fields = unnamed.unnamed.iter().map(|f| {
                    let ty = &f.ty;
                    quote! {
                        {
                            let (value, __field_consumed) = <#ty as ::db48x_types::canonical::Canonical>::decode(&bytes[consumed..])?;
                            consumed += __field_consumed;
                            value
                        }
                    }
                });
                decode_arms.push(quote! {
                    #index => (#name::#vident(#(#decode_fields),*), consumed)
                });
            }
            Fields::Named(named) => {
                let bindings: Vec<&syn::Ident> =
                    named.named.iter().map(|f| f.ident.as_ref().unwrap()).collect();
                size_arms.push(quote! {
                    #name::#vident { #(#bindings),* } => {
                        ::db48x_types::leb128::size_u64(#index) #(+ #bindings.encoded_size())*
                    }
                });
                encode_arms.push(quote! {
                    #name::#vident { #(#bindings),* } => {
                        ::db48x_types::leb128::write_u64(out, #index);
                        #(#bindings.encode(out);)*
                    }
                });
                let decode_fields = named.named.iter().map(|f| {
                    let ident = f.ident.as_ref().unwrap();
                    let ty = &f.ty;
                    quote! {
                        #ident: {
                            let (value, __field_consumed) = <#ty as ::db48x_types::canonical::Canonical>::decode(&bytes[consumed..])?;
                            consumed += __field_consumed;
                            value
                        }
                    }
                });
                decode_arms.push(quote! {
                    #index => (#name::#vident { #(#decode_fields),* }, consumed)
                });
            }
        }
    }

    quote! {
        impl #impl_generics ::db48x_types::canonical::Canonical for #name #ty_generics #where_clause {
            fn encoded_size(&self) -> usize {
                match self {
                    #(#size_arms,)*
                }
            }

            fn encode(&self, out: &mut impl Extend<u8>) {
                match self {
                    #(#encode_arms,)*
                }
            }

            fn decode(bytes: &[u8]) -> ::db48x_types::Result<(Self, usize)> {
                let (discriminant, mut consumed) = <u64 as ::db48x_types::canonical::Canonical>::decode(bytes)?;
                let (value, consumed) = match discriminant {
                    #(#decode_arms,)*
                    _ => return Err(::db48x_types::Error::Leb128Overflow),
                };
                Ok((value, consumed))
            }
        }
    }
}

/// Build a `(Self { .. }, consumed)` expression for a struct's fields,
/// decoding each one in turn from `bytes[consumed..]`.
fn construct_fields(fields: &Fields, _track: &TokenStream2) -> TokenStream2 {
    match fields {
        Fields::Named(named) => {
            let decode_fields = named.named.iter().map(|f| {
                let ident = f.ident.as_ref().unwrap();
                let ty = &f.ty;
                quote! {
                    #ident: {
                        let (value, __field_consumed) = <#ty as ::db48x_types::canonical::Canonical>::decode(&bytes[consumed..])?;
                        consumed += __field_consumed;
                        value
                    }
                }
            });
            quote! { Ok((Self { #(#decode_fields),* }, consumed)) }
        }
        Fields::Unnamed(unnamed) => {
            let decode_fields = unnamed.unnamed.iter().map(|f| {
                let ty = &f.ty;
                quote! {
                    {
                        let (value, __field_consumed) = <#ty as ::db48x_types::canonical::Canonical>::decode(&bytes[consumed..])?;
                        consumed += __field_consumed;
                        value
                    }
                }
            });
            quote! { Ok((Self(#(#decode_fields),*), consumed)) }
        }
        Fields::Unit => {
            quote! { Ok((Self, consumed)) }
        }
    }
}

trait IntoTokenStream {
    fn into_token_stream(self) -> TokenStream2;
}

impl IntoTokenStream for syn::Ident {
    fn into_token_stream(self) -> TokenStream2 {
        quote! { #self }
    }
}

impl IntoTokenStream for Index {
    fn into_token_stream(self) -> TokenStream2 {
        quote! { #self }
    }
}
