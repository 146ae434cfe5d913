use proc_macro2::TokenStream;
use quote::quote;

use super::{get_auto_register_impl, impl_dynamic, impl_trait_signature};
use crate::derive_data::SerialStruct;

/// Implement `Signature`, `Reflected`, `Aggregate` and `Serial` for a struct,
/// plus the dynamic class traits if requested.
pub(crate) fn impl_struct(info: &SerialStruct) -> TokenStream {
    let meta = info.meta();
    let bounds = info.field_bounds();

    let signature_tokens = impl_trait_signature(meta, quote!(Aggregate), &bounds);
    let reflected_tokens = impl_trait_reflected(info, &bounds);
    let aggregate_tokens = impl_trait_aggregate(info, &bounds);
    let serial_tokens = impl_trait_serial(info, &bounds);

    let dynamic_tokens = impl_dynamic(meta);
    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #signature_tokens

        #reflected_tokens

        #aggregate_tokens

        #serial_tokens

        #dynamic_tokens

        #auto_register_tokens
    }
}

fn impl_trait_reflected(info: &SerialStruct, bounds: &[TokenStream]) -> TokenStream {
    let meta = info.meta();
    let vc_serial_path = meta.vc_serial_path();
    let info_ = crate::path::info_(vc_serial_path);
    let checksum_ = crate::path::checksum_(vc_serial_path);

    let checksum = info.checksum_tokens();
    let members = info.members_tokens();

    let cell_tokens = if meta.impl_with_generic() {
        quote! {
            static CELL: #info_::GenericShapeCell = #info_::GenericShapeCell::new();
            CELL.get_or_insert::<Self>(|| #info_::Shape::new::<Self>(#members))
        }
    } else {
        quote! {
            static CELL: #info_::NonGenericShapeCell = #info_::NonGenericShapeCell::new();
            CELL.get_or_init(|| #info_::Shape::new::<Self>(#members))
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(bounds);

    quote! {
        impl #impl_generics #info_::Reflected for #ident #ty_generics #where_clause {
            const CHECKSUM: #checksum_ = #checksum;

            fn shape() -> &'static #info_::Shape {
                #cell_tokens
            }
        }
    }
}

fn impl_trait_aggregate(info: &SerialStruct, bounds: &[TokenStream]) -> TokenStream {
    let meta = info.meta();
    let vc_serial_path = meta.vc_serial_path();
    let info_ = crate::path::info_(vc_serial_path);
    let value_ = crate::path::value_(vc_serial_path);
    let result_ = crate::path::result_(vc_serial_path);
    let macro_utils_ = crate::path::macro_utils_(vc_serial_path);

    let field_count = info.active_fields().count();

    let visit_fields = info.active_fields().enumerate().map(|(index, field)| {
        let ident = field.ident();
        quote! {
            f(&members[#index], #value_::Serial::serial_ref(&self.#ident))?;
        }
    });
    let visit_accessors = info.accessors().iter().enumerate().map(|(offset, accessor)| {
        let index = field_count + offset;
        let ty = &accessor.ty;
        let getter = &accessor.getter;
        quote! {
            {
                let value: #ty = #macro_utils_::Into::into(Self::#getter(self));
                f(&members[#index], #value_::Serial::serial_ref(&value))?;
            }
        }
    });

    let read_fields = info.active_fields().enumerate().map(|(index, field)| {
        let ident = field.ident();
        quote! {
            f(&members[#index], #value_::Serial::serial_mut(&mut self.#ident))?;
        }
    });
    let read_accessors = info.accessors().iter().enumerate().map(|(offset, accessor)| {
        let index = field_count + offset;
        let ty = &accessor.ty;
        let setter = &accessor.setter;
        quote! {
            {
                let mut value: #ty = #macro_utils_::Default::default();
                f(&members[#index], #value_::Serial::serial_mut(&mut value))?;
                Self::#setter(self, value);
            }
        }
    });

    let prelude = if info.member_count() == 0 {
        quote!(let _ = f;)
    } else {
        quote!(let members = <Self as #info_::Reflected>::shape().members();)
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(bounds);

    quote! {
        impl #impl_generics #value_::Aggregate for #ident #ty_generics #where_clause {
            #[inline]
            fn aggregate_shape(&self) -> &'static #info_::Shape {
                <Self as #info_::Reflected>::shape()
            }

            fn visit_members(
                &self,
                f: &mut dyn FnMut(&#info_::MemberInfo, #value_::SerialRef<'_>) -> #result_<()>,
            ) -> #result_<()> {
                #prelude
                #(#visit_fields)*
                #(#visit_accessors)*
                #macro_utils_::Ok(())
            }

            fn read_members(
                &mut self,
                f: &mut dyn FnMut(&#info_::MemberInfo, #value_::SerialMut<'_>) -> #result_<()>,
            ) -> #result_<()> {
                #prelude
                #(#read_fields)*
                #(#read_accessors)*
                #macro_utils_::Ok(())
            }
        }
    }
}

fn impl_trait_serial(info: &SerialStruct, bounds: &[TokenStream]) -> TokenStream {
    let meta = info.meta();
    let value_ = crate::path::value_(meta.vc_serial_path());

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(bounds);

    quote! {
        impl #impl_generics #value_::Serial for #ident #ty_generics #where_clause {
            #[inline]
            fn serial_ref(&self) -> #value_::SerialRef<'_> {
                #value_::SerialRef::Aggregate(self)
            }

            #[inline]
            fn serial_mut(&mut self) -> #value_::SerialMut<'_> {
                #value_::SerialMut::Aggregate(self)
            }
        }
    }
}
