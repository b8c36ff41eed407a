use proc_macro::TokenStream;
use quote::quote;
use syn::{DataStruct, DeriveInput, Fields, Result};

pub(crate) fn generate_mappable_for_struct(
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

    let mut to_document_fields = Vec::with_capacity(fields.len());
    let mut from_document_fields = Vec::with_capacity(fields.len());

    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "Field has no name"))?;
        let ty = &field.ty;
        // the entity id lives under the store's key field
        let key = if ident == "id" {
            "_id".to_string()
        } else {
            ident.to_string()
        };

        to_document_fields.push(quote! {
            document.put(#key, docbase::common::ValueCodec::to_value(&self.#ident)?)?;
        });
        from_document_fields.push(quote! {
            #ident: <#ty as docbase::common::ValueCodec>::from_value(&document.get(#key))?,
        });
    }

    let gen = quote! {
        impl #impl_generics docbase::entity::Mappable for #name #ty_generics #where_clause {
            fn to_document(&self) -> docbase::errors::DocbaseResult<docbase::common::Document> {
                let mut document = docbase::common::Document::new();
                #(#to_document_fields)*
                Ok(document)
            }

            fn from_document(
                document: &docbase::common::Document,
            ) -> docbase::errors::DocbaseResult<Self> {
                Ok(#name {
                    #(#from_document_fields)*
                })
            }
        }
    };

    Ok(TokenStream::from(gen))
}
