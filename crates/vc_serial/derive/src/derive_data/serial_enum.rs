use syn::{DataEnum, Fields, Ident, spanned::Spanned};

use super::SerialMeta;

/// A fieldless enum, encoded as its `i32` discriminant.
pub(crate) struct SerialEnum<'a> {
    meta: SerialMeta<'a>,
    variants: Vec<&'a Ident>,
}

impl<'a> SerialEnum<'a> {
    pub fn new(meta: SerialMeta<'a>, data: &'a DataEnum) -> syn::Result<Self> {
        if let Some(span) = meta.attrs().dynamic {
            return Err(syn::Error::new(span, "only structs can be `dynamic`"));
        }
        if let Some(accessor) = meta.attrs().accessors.first() {
            return Err(syn::Error::new(
                accessor.name.span(),
                "accessors can only be declared on structs",
            ));
        }
        if meta.impl_with_generic() {
            return Err(syn::Error::new(
                meta.ident().span(),
                "generic enums are not supported by `Serializable`",
            ));
        }
        if data.variants.is_empty() {
            return Err(syn::Error::new(
                data.enum_token.span(),
                "enums without variants have no value to encode",
            ));
        }

        let variants = data
            .variants
            .iter()
            .map(|variant| match &variant.fields {
                Fields::Unit => Ok(&variant.ident),
                fields => Err(syn::Error::new(
                    fields.span(),
                    "`Serializable` enums must be fieldless",
                )),
            })
            .collect::<syn::Result<Vec<_>>>()?;

        Ok(Self { meta, variants })
    }

    #[inline]
    pub fn meta(&self) -> &SerialMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn variants(&self) -> &[&'a Ident] {
        &self.variants
    }
}
