//! # regextra-derive
//!
//! `#[derive(Record)]` for regextra: emits the field descriptor table and the
//! indexed setter of the `regextra::Record` trait.
//!
//! ## Field attributes
//! - `#[regex = "group"]` - read the field from `group` instead of its own name
//! - `#[regex(skip)]` - tag the field with the reserved `"-"` override

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Expr, ExprLit, Fields, Lit, Meta, Type, Visibility, parse_macro_input};

/// Derive `regextra::Record` for a struct with named fields.
#[proc_macro_derive(Record, attributes(regex))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Kind of a field type, as understood by the populator.
#[derive(Clone, Copy)]
enum Kind {
    Text,
    Signed,
    Unsigned,
    Float,
    Bool,
    Unsupported,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record can only be derived for structs with named fields",
            ));
        }
    };

    let mut descriptors = Vec::with_capacity(fields.len());
    let mut setters = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let Some(ident) = &field.ident else {
            continue;
        };
        let name = ident.to_string();
        let name = name.strip_prefix("r#").unwrap_or(&name).to_string();
        let ty = &field.ty;
        let writable = matches!(field.vis, Visibility::Public(_));
        let tag = field_tag(field)?;
        let kind = classify(ty);

        let kind_tokens = match kind {
            Kind::Text => quote!(::regextra::FieldKind::Text),
            Kind::Signed => quote!(::regextra::FieldKind::Signed { bits: <#ty>::BITS }),
            Kind::Unsigned => quote!(::regextra::FieldKind::Unsigned { bits: <#ty>::BITS }),
            Kind::Float => {
                let bits = if type_ident(ty).is_some_and(|i| i == "f32") { 32u32 } else { 64u32 };
                quote!(::regextra::FieldKind::Float { bits: #bits })
            }
            Kind::Bool => quote!(::regextra::FieldKind::Bool),
            Kind::Unsupported => {
                let written = quote!(#ty).to_string().replace(' ', "");
                quote!(::regextra::FieldKind::Unsupported(#written))
            }
        };

        let tag_tokens = match &tag {
            Some(tag) => quote!(::core::option::Option::Some(#tag)),
            None => quote!(::core::option::Option::None),
        };

        descriptors.push(quote! {
            ::regextra::FieldDescriptor {
                name: #name,
                kind: #kind_tokens,
                tag: #tag_tokens,
                writable: #writable,
            }
        });

        if !writable {
            continue;
        }

        let setter = match kind {
            Kind::Text => Some(quote! {
                (#index, ::regextra::FieldValue::Text(value)) => self.#ident = value,
            }),
            Kind::Signed => Some(quote! {
                (#index, ::regextra::FieldValue::Signed(value)) => self.#ident = value as #ty,
            }),
            Kind::Unsigned => Some(quote! {
                (#index, ::regextra::FieldValue::Unsigned(value)) => self.#ident = value as #ty,
            }),
            Kind::Float => Some(quote! {
                (#index, ::regextra::FieldValue::Float(value)) => self.#ident = value as #ty,
            }),
            Kind::Bool => Some(quote! {
                (#index, ::regextra::FieldValue::Bool(value)) => self.#ident = value,
            }),
            Kind::Unsupported => None,
        };
        setters.extend(setter);
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::regextra::Record for #ident #ty_generics #where_clause {
            const FIELDS: &'static [::regextra::FieldDescriptor] = &[
                #(#descriptors),*
            ];

            #[allow(unused_variables, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            fn set_field(&mut self, index: usize, value: ::regextra::FieldValue) {
                match (index, value) {
                    #(#setters)*
                    _ => {}
                }
            }
        }
    })
}

/// Read `#[regex = "group"]` or `#[regex(skip)]`.
fn field_tag(field: &syn::Field) -> syn::Result<Option<String>> {
    let mut tag = None;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("regex")) {
        match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => tag = Some(s.value()),
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "expected a group name: #[regex = \"group\"]",
                    ));
                }
            },
            Meta::List(_) => {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        tag = Some("-".to_string());
                        Ok(())
                    } else {
                        Err(meta.error("unknown regex attribute, expected `skip`"))
                    }
                })?;
            }
            Meta::Path(path) => {
                return Err(syn::Error::new_spanned(
                    path,
                    "expected #[regex = \"group\"] or #[regex(skip)]",
                ));
            }
        }
    }
    Ok(tag)
}

/// Last path segment of a plain type such as `String` or `std::string::String`.
fn type_ident(ty: &Type) -> Option<&syn::Ident> {
    match ty {
        Type::Path(path) if path.qself.is_none() => {
            let segment = path.path.segments.last()?;
            segment.arguments.is_none().then_some(&segment.ident)
        }
        Type::Group(group) => type_ident(&group.elem),
        _ => None,
    }
}

fn classify(ty: &Type) -> Kind {
    let Some(ident) = type_ident(ty) else {
        return Kind::Unsupported;
    };
    match ident.to_string().as_str() {
        "String" => Kind::Text,
        "i8" | "i16" | "i32" | "i64" | "isize" => Kind::Signed,
        "u8" | "u16" | "u32" | "u64" | "usize" => Kind::Unsigned,
        "f32" | "f64" => Kind::Float,
        "bool" => Kind::Bool,
        _ => Kind::Unsupported,
    }
}
