use crate::derive_data::SerialMeta;

/// Generate the `inventory` submission of a `#[serial(dynamic)]` class.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &SerialMeta) -> proc_macro2::TokenStream {
    use quote::quote_spanned;

    let Some(span) = meta.attrs().dynamic else {
        return crate::utils::empty();
    };

    let vc_serial_path = meta.vc_serial_path();
    let auto_register_ = crate::path::auto_register_(vc_serial_path);
    let dynamics_ = crate::path::dynamics_(vc_serial_path);
    let ident = meta.ident();

    quote_spanned! { span =>
        #auto_register_::inventory::submit!{
            #auto_register_::__AutoRegisterFunc(
                #dynamics_::FactoryRegistry::register::<#ident>
            )
        }
    }
}

/// Generate the `inventory` submission of a `#[serial(dynamic)]` class.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &SerialMeta) -> proc_macro2::TokenStream {
    crate::utils::empty()
}
