//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod serial_enum;
mod serial_meta;
mod serial_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{Accessor, FieldAttributes, TypeAttributes};
pub(crate) use serial_enum::SerialEnum;
pub(crate) use serial_meta::SerialMeta;
pub(crate) use serial_struct::SerialStruct;

use syn::{Data, DeriveInput, Fields, spanned::Spanned};

/// The parsed input of `#[derive(Serializable)]`.
pub(crate) enum SerialDerive<'a> {
    Struct(SerialStruct<'a>),
    Enum(SerialEnum<'a>),
}

impl<'a> SerialDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let meta = SerialMeta::new(&input.ident, &input.generics, attrs)?;

        match &input.data {
            Data::Struct(data) => {
                let fields = match &data.fields {
                    Fields::Named(fields) => fields.named.iter().collect(),
                    Fields::Unit => Vec::new(),
                    Fields::Unnamed(fields) => {
                        return Err(syn::Error::new(
                            fields.span(),
                            "tuple structs have no member names; use named fields",
                        ));
                    }
                };
                SerialStruct::new(meta, fields).map(Self::Struct)
            }
            Data::Enum(data) => SerialEnum::new(meta, data).map(Self::Enum),
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span(),
                "`Serializable` cannot be derived for unions",
            )),
        }
    }
}
