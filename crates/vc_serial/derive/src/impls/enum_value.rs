use proc_macro2::TokenStream;
use quote::quote;

use super::impl_trait_signature;
use crate::derive_data::SerialEnum;

/// Implement `Signature`, `EnumValue` and `Serial` for a fieldless enum.
pub(crate) fn impl_enum(info: &SerialEnum) -> TokenStream {
    let meta = info.meta();
    let value_ = crate::path::value_(meta.vc_serial_path());
    let info_ = crate::path::info_(meta.vc_serial_path());
    let ident = meta.ident();

    let signature_tokens = impl_trait_signature(meta, quote!(Enum), &[]);

    let variants = info.variants();
    let discriminant_arms = variants.iter().map(|variant| {
        quote!(Self::#variant => Self::#variant as i32,)
    });
    let set_arms = variants.iter().map(|variant| {
        quote!(value if value == Self::#variant as i32 => Self::#variant,)
    });

    quote! {
        #signature_tokens

        impl #value_::EnumValue for #ident {
            #[inline]
            fn enum_type_name(&self) -> &'static str {
                <Self as #info_::Signature>::type_name()
            }

            fn discriminant(&self) -> i32 {
                match self {
                    #(#discriminant_arms)*
                }
            }

            fn set_discriminant(&mut self, value: i32) -> bool {
                *self = match value {
                    #(#set_arms)*
                    _ => return false,
                };
                true
            }
        }

        impl #value_::Serial for #ident {
            #[inline]
            fn serial_ref(&self) -> #value_::SerialRef<'_> {
                #value_::SerialRef::Enum(self)
            }

            #[inline]
            fn serial_mut(&mut self) -> #value_::SerialMut<'_> {
                #value_::SerialMut::Enum(self)
            }
        }
    }
}
