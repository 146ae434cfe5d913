use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::SerialMeta;

/// Generate implementation code for `Signature`.
///
/// `category` is the variant name of `Category`, such as `Aggregate`.
pub(crate) fn impl_trait_signature(
    meta: &SerialMeta,
    category: TokenStream,
    extra_bounds: &[TokenStream],
) -> TokenStream {
    let vc_serial_path = meta.vc_serial_path();
    let info_ = crate::path::info_(vc_serial_path);
    let checksum_ = crate::path::checksum_(vc_serial_path);

    let ident = meta.ident();
    let name_checksum = meta.name_checksum_tokens();
    let type_name = meta.type_name_tokens();
    let inline_flag = if meta.impl_with_generic() {
        crate::utils::empty()
    } else {
        quote!(#[inline])
    };

    let (impl_generics, ty_generics, where_clause) = meta.split_generics(extra_bounds);

    quote! {
        impl #impl_generics #info_::Signature for #ident #ty_generics #where_clause {
            const CATEGORY: #info_::Category = #info_::Category::#category;
            const NAME_CHECKSUM: #checksum_ = #name_checksum;

            #inline_flag
            fn type_name() -> &'static str {
                #type_name
            }
        }
    }
}
