use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{GenericParam, Generics, Ident, Path, spanned::Spanned};

use super::TypeAttributes;

/// Type level data shared by every generated impl.
pub(crate) struct SerialMeta<'a> {
    vc_serial_path: Path,
    ident: &'a Ident,
    generics: &'a Generics,
    attrs: TypeAttributes,
}

impl core::fmt::Debug for SerialMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SerialMeta")
            .field("vc_serial_path", &self.vc_serial_path.to_token_stream())
            .field("ident", &self.ident)
            .finish()
    }
}

impl<'a> SerialMeta<'a> {
    pub fn new(
        ident: &'a Ident,
        generics: &'a Generics,
        attrs: TypeAttributes,
    ) -> syn::Result<Self> {
        for param in &generics.params {
            match param {
                GenericParam::Type(_) => {}
                GenericParam::Lifetime(lifetime) => {
                    return Err(syn::Error::new(
                        lifetime.span(),
                        "serializable types cannot borrow; lifetime parameters are not supported",
                    ));
                }
                GenericParam::Const(param) => {
                    return Err(syn::Error::new(
                        param.span(),
                        "const parameters are not supported by `Serializable`",
                    ));
                }
            }
        }

        if let Some(span) = attrs.dynamic
            && !generics.params.is_empty()
        {
            return Err(syn::Error::new(
                span,
                "`dynamic` classes are registered by name and cannot be generic",
            ));
        }

        Ok(Self {
            vc_serial_path: crate::path::vc_serial(),
            ident,
            generics,
            attrs,
        })
    }

    #[inline]
    pub fn vc_serial_path(&self) -> &Path {
        &self.vc_serial_path
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    /// The type parameters, in declaration order.
    pub fn type_params(&self) -> impl Iterator<Item = &Ident> {
        self.generics.type_params().map(|param| &param.ident)
    }

    /// Generates `impl<...>`, `Ident<...>` and the where clause.
    ///
    /// Every type parameter is bound by `Signature`, plus any predicates in
    /// `extra_bounds`.
    pub fn split_generics(
        &self,
        extra_bounds: &[TokenStream],
    ) -> (TokenStream, TokenStream, TokenStream) {
        let (_, ty_generics, where_clause) = self.generics.split_for_impl();

        let signature_ = {
            let info_ = crate::path::info_(&self.vc_serial_path);
            quote!(#info_::Signature)
        };

        let params = self.generics.type_params().map(|param| {
            let ident = &param.ident;
            let bounds = &param.bounds;
            if bounds.is_empty() {
                quote!(#ident: #signature_)
            } else {
                quote!(#ident: #bounds + #signature_)
            }
        });
        let impl_generics = if self.impl_with_generic() {
            quote!(< #(#params),* >)
        } else {
            TokenStream::new()
        };

        let mut predicates: Vec<TokenStream> = where_clause
            .map(|clause| clause.predicates.iter().map(ToTokens::to_token_stream).collect())
            .unwrap_or_default();
        predicates.extend(extra_bounds.iter().cloned());
        let where_clause = if predicates.is_empty() {
            TokenStream::new()
        } else {
            quote!(where #(#predicates,)*)
        };

        (impl_generics, ty_generics.to_token_stream(), where_clause)
    }

    /// The checksum of the type name, as a constant expression.
    ///
    /// For `Pair<A, B>` this combines the checksums of `"Pair<"`, `A`, `", "`,
    /// `B` and `">"`.
    pub fn name_checksum_tokens(&self) -> TokenStream {
        let checksum_ = crate::path::checksum_(&self.vc_serial_path);
        let info_ = crate::path::info_(&self.vc_serial_path);
        let name = self.ident.to_string();

        if !self.impl_with_generic() {
            return quote!(#checksum_::of(#name));
        }

        let open = format!("{name}<");
        let mut tokens = quote!(#checksum_::of(#open));
        for (index, param) in self.type_params().enumerate() {
            if index > 0 {
                tokens = quote!(#tokens.combine(#checksum_::of(", ")));
            }
            tokens = quote!(#tokens.combine(<#param as #info_::Signature>::NAME_CHECKSUM));
        }
        quote!(#tokens.combine(#checksum_::of(">")))
    }

    /// The body of `Signature::type_name`.
    pub fn type_name_tokens(&self) -> TokenStream {
        let name = self.ident.to_string();

        if !self.impl_with_generic() {
            return quote!(#name);
        }

        let info_ = crate::path::info_(&self.vc_serial_path);
        let concat_ = crate::path::concat_(&self.vc_serial_path);

        let open = format!("{name}<");
        let mut pieces = vec![quote!(#open)];
        for (index, param) in self.type_params().enumerate() {
            if index > 0 {
                pieces.push(quote!(", "));
            }
            pieces.push(quote!(<#param as #info_::Signature>::type_name()));
        }
        pieces.push(quote!(">"));

        quote! {
            static CELL: #info_::GenericNameCell = #info_::GenericNameCell::new();
            CELL.get_or_insert::<Self>(|| #concat_(&[ #(#pieces),* ]))
        }
    }
}
