use proc_macro::TokenStream;
use quote::quote;
use syn::{DataStruct, DeriveInput, Fields, LitStr, Result};

pub(crate) fn generate_entity_for_struct(
    ast: &DeriveInput,
    data: &DataStruct,
) -> Result<TokenStream> {
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let fields = match &data.fields {
        Fields::Named(named) => &named.named,
        _ => {
            return Err(syn::Error::new_spanned(
                ast,
                "Only structs with named fields are supported",
            ))
        }
    };

    for required in ["id", "created_at", "updated_at"] {
        let present = fields
            .iter()
            .any(|field| field.ident.as_ref().is_some_and(|ident| ident == required));
        if !present {
            return Err(syn::Error::new_spanned(
                ast,
                format!("Field {} not found in struct", required),
            ));
        }
    }

    let mut collection_name = to_snake_case(&name.to_string());
    let mut key_format = "native".to_string();

    for attr in &ast.attrs {
        if attr.path().is_ident("entity") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("collection") {
                    let value = meta.value()?;
                    let s: LitStr = value.parse()?;
                    collection_name = s.value();
                    Ok(())
                } else if meta.path.is_ident("key") {
                    let value = meta.value()?;
                    let s: LitStr = value.parse()?;
                    match s.value().as_str() {
                        "native" | "string" => {
                            key_format = s.value();
                            Ok(())
                        }
                        other => Err(meta.error(format!(
                            "Unknown key format '{}', expected \"native\" or \"string\"",
                            other
                        ))),
                    }
                } else {
                    Err(meta.error("Unknown entity attribute"))
                }
            })?
        }
    }

    let key_type_code = if key_format == "string" {
        quote! { type Key = docbase::entity::StringKey; }
    } else {
        quote! { type Key = docbase::entity::NativeKey; }
    };

    let gen = quote! {
        impl #impl_generics docbase::entity::Entity for #name #ty_generics #where_clause {
            #key_type_code

            fn collection_name() -> String {
                #collection_name.to_string()
            }

            fn id(&self) -> Option<String> {
                if self.id.is_empty() {
                    None
                } else {
                    Some(self.id.clone())
                }
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn created_at(&self) -> Option<docbase::chrono::DateTime<docbase::chrono::Utc>> {
                Some(self.created_at)
            }

            fn set_created_at(&mut self, at: docbase::chrono::DateTime<docbase::chrono::Utc>) {
                self.created_at = at;
            }

            fn updated_at(&self) -> Option<docbase::chrono::DateTime<docbase::chrono::Utc>> {
                Some(self.updated_at)
            }

            fn set_updated_at(&mut self, at: docbase::chrono::DateTime<docbase::chrono::Utc>) {
                self.updated_at = at;
            }
        }
    };

    Ok(TokenStream::from(gen))
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
