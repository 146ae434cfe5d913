use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::SerialMeta;

/// Generate `DynamicObject` and `DynamicClass` for `#[serial(dynamic)]`.
///
/// Every base in `bases(...)` gets a caster from `Box<dyn DynamicObject>`
/// to `Box<dyn Base>`.
pub(crate) fn impl_dynamic(meta: &SerialMeta) -> TokenStream {
    if meta.attrs().dynamic.is_none() {
        return crate::utils::empty();
    }

    let vc_serial_path = meta.vc_serial_path();
    let dynamics_ = crate::path::dynamics_(vc_serial_path);
    let macro_utils_ = crate::path::macro_utils_(vc_serial_path);

    let ident = meta.ident();
    let class_name = match &meta.attrs().class_name {
        Some(class_name) => quote!(#class_name),
        None => {
            let name = ident.to_string();
            quote!(#name)
        }
    };

    let register_casters = if meta.attrs().bases.is_empty() {
        crate::utils::empty()
    } else {
        let casters = meta.attrs().bases.iter().map(|base| {
            quote! {
                registry.register_caster::<Self, dyn #base>(|object| {
                    #dynamics_::downcast::<Self>(object)
                        .map(|object| object as #macro_utils_::Box<dyn #base>)
                });
            }
        });
        quote! {
            fn register_casters(registry: &mut #dynamics_::FactoryRegistry) {
                #(#casters)*
            }
        }
    };

    quote! {
        impl #dynamics_::DynamicObject for #ident {
            #[inline]
            fn class_name(&self) -> &'static str {
                <Self as #dynamics_::DynamicClass>::CLASS_NAME
            }

            #[inline]
            fn as_dynamic(&self) -> &dyn #dynamics_::DynamicObject {
                self
            }
        }

        impl #dynamics_::DynamicClass for #ident {
            const CLASS_NAME: &'static str = #class_name;

            #register_casters
        }
    }
}
