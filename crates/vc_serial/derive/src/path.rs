//! Paths to the items of `vc_serial` used by generated code.
//!
//! Keeping them in one place limits the changes needed when the runtime
//! crate is reorganized.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `vc_serial` crate.
///
/// 1. For crates that depend on `vc_serial`, `::vc_serial` is returned.
/// 2. For crates that depend on `vc_archive`, `::vc_archive::serial` is returned.
/// 3. For other situations, `::vc_serial` is returned, but this may be incorrect.
///
/// Resolving reads the caller's `Cargo.toml`, so the result is passed around
/// instead of being queried again.
pub(crate) fn vc_serial() -> syn::Path {
    vc_macro_utils::Manifest::crate_path("vc_serial")
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn macro_utils_(vc_serial_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_serial_path::__macro_exports::macro_utils
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(vc_serial_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_serial_path::__macro_exports::auto_register
    }
}

#[inline(always)]
pub(crate) fn result_(vc_serial_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_serial_path::Result
    }
}

#[inline(always)]
pub(crate) fn checksum_(vc_serial_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_serial_path::checksum::Checksum
    }
}

#[inline(always)]
pub(crate) fn info_(vc_serial_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_serial_path::info
    }
}

#[inline(always)]
pub(crate) fn value_(vc_serial_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_serial_path::value
    }
}

#[inline(always)]
pub(crate) fn dynamics_(vc_serial_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_serial_path::dynamics
    }
}

#[inline(always)]
pub(crate) fn concat_(vc_serial_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_serial_path::impls::concat
    }
}
