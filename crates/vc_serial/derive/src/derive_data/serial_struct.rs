use proc_macro2::TokenStream;
use quote::quote;
use syn::{Field, Ident, Type, ext::IdentExt};

use super::{Accessor, FieldAttributes, SerialMeta};

// -----------------------------------------------------------------------------
// Define

/// A struct with named fields, encoded as an aggregate.
pub(crate) struct SerialStruct<'a> {
    meta: SerialMeta<'a>,
    fields: Vec<StructField<'a>>,
}

/// A named field of the struct.
pub(crate) struct StructField<'a> {
    pub data: &'a Field,
    pub ident: &'a Ident,
    pub attrs: FieldAttributes,
}

impl StructField<'_> {
    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    /// The member name, without a raw identifier prefix.
    #[inline]
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.data.ty
    }
}

// -----------------------------------------------------------------------------
// Implementation

impl<'a> SerialStruct<'a> {
    pub fn new(meta: SerialMeta<'a>, fields: Vec<&'a Field>) -> syn::Result<Self> {
        let fields = fields
            .into_iter()
            .map(|data| {
                let ident = data.ident.as_ref().ok_or_else(|| {
                    syn::Error::new_spanned(data, "`Serializable` needs named fields")
                })?;
                Ok(StructField {
                    data,
                    ident,
                    attrs: FieldAttributes::parse_attrs(&data.attrs)?,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        Ok(Self { meta, fields })
    }

    #[inline]
    pub fn meta(&self) -> &SerialMeta<'a> {
        &self.meta
    }

    /// Fields that are part of the shape, in declaration order.
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| !field.attrs.skip)
    }

    #[inline]
    pub fn accessors(&self) -> &[Accessor] {
        &self.meta.attrs().accessors
    }

    /// Number of members in the shape.
    pub fn member_count(&self) -> usize {
        self.active_fields().count() + self.accessors().len()
    }

    /// The where clause predicates that a generic struct needs.
    ///
    /// Non-generic structs get none: their field types are checked where they
    /// are used, and bounds mentioning `Self` could not be resolved for
    /// recursive types.
    pub fn field_bounds(&self) -> Vec<TokenStream> {
        if !self.meta.impl_with_generic() {
            return Vec::new();
        }

        let vc_serial_path = self.meta.vc_serial_path();
        let info_ = crate::path::info_(vc_serial_path);
        let value_ = crate::path::value_(vc_serial_path);
        let macro_utils_ = crate::path::macro_utils_(vc_serial_path);

        let fields = self.active_fields().map(|field| {
            let ty = field.ty();
            quote!(#ty: #value_::Serial + #info_::Signature)
        });
        let accessors = self.accessors().iter().map(|accessor| {
            let ty = &accessor.ty;
            quote!(#ty: #value_::Serial + #info_::Signature + #macro_utils_::Default)
        });

        fields.chain(accessors).collect()
    }

    /// The compile-time structural checksum.
    ///
    /// ```ignore
    /// Checksum::EMPTY
    ///     .combine(member_checksum(<f32 as Signature>::NAME_CHECKSUM, "x"))
    ///     .combine(member_checksum(<f32 as Signature>::NAME_CHECKSUM, "y"))
    /// ```
    pub fn checksum_tokens(&self) -> TokenStream {
        let vc_serial_path = self.meta.vc_serial_path();
        let checksum_ = crate::path::checksum_(vc_serial_path);
        let info_ = crate::path::info_(vc_serial_path);

        let members = self
            .active_fields()
            .map(|field| (field.ty(), field.name()))
            .chain(
                self.accessors()
                    .iter()
                    .map(|accessor| (&accessor.ty, accessor.name.value())),
            )
            .map(|(ty, name)| {
                quote! {
                    .combine(#info_::member_checksum(
                        <#ty as #info_::Signature>::NAME_CHECKSUM,
                        #name,
                    ))
                }
            });

        quote! {
            #checksum_::EMPTY #(#members)*
        }
    }

    /// The member list passed to `Shape::new`, fields first.
    pub fn members_tokens(&self) -> TokenStream {
        let info_ = crate::path::info_(self.meta.vc_serial_path());
        let count = self.member_count();

        let fields = self.active_fields().map(|field| {
            let ty = field.ty();
            let name = field.name();
            quote!(#info_::MemberInfo::field::<#ty>(#name))
        });
        let accessors = self.accessors().iter().map(|accessor| {
            let ty = &accessor.ty;
            let name = &accessor.name;
            quote!(#info_::MemberInfo::accessor::<#ty>(#name))
        });

        quote! {
            {
                let members: [#info_::MemberInfo; #count] = [ #(#fields,)* #(#accessors,)* ];
                members
            }
        }
    }
}
