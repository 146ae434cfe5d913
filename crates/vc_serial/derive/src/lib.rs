//! See the [`Serializable`] derive macro.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static SERIAL_ATTRIBUTE_NAME: &str = "serial";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Serializable Derivation
///
/// `#[derive(Serializable)]` describes a type to the serialization engine.
///
/// For structs with named fields (and unit structs) it implements:
///
/// - `Signature`, with category `Aggregate`
/// - `Reflected`: the compile-time structural checksum and the member list
/// - `Aggregate` and `Serial`
///
/// For fieldless enums it implements `Signature` (category `Enum`),
/// `EnumValue` and `Serial`. The value is the discriminant as an `i32`.
///
/// Tuple structs, unions, enums with fields and types with lifetime or
/// const parameters are rejected.
///
/// ## Members
///
/// Every named field is a member, in declaration order. The member's type
/// must itself implement `Serial` and `Signature`.
///
/// ### Skipping fields
///
/// A skipped field is not part of the shape and keeps its current value
/// when decoding.
///
/// ```rust, ignore
/// #[derive(Serializable)]
/// struct Cache {
///     key: String,
///     #[serial(skip)]
///     hits: u32,
/// }
/// ```
///
/// ### Accessor pairs
///
/// Members can also be reached through a getter and a setter. They follow the
/// fields in the shape, in declaration order, and are displayed under `name`.
/// Decoding reads into a default `ty` and passes it to the setter; encoding
/// converts the getter's result into `ty` with `Into`.
///
/// ```rust, ignore
/// #[derive(Serializable, Default)]
/// #[serial(accessor(name = "label", get = label, set = set_label, ty = String))]
/// struct Button {
///     id: u32,
///     #[serial(skip)]
///     label: Box<str>,
/// }
///
/// impl Button {
///     fn label(&self) -> &str { &self.label }
///     fn set_label(&mut self, label: String) { self.label = label.into() }
/// }
/// ```
///
/// The shape of `Button` is `u32 id; String label; `.
///
/// ## Generics
///
/// Type parameters are supported. Every parameter gets a `Signature` bound
/// and every member type gets `Serial + Signature` bounds. The type name
/// includes the arguments, e.g. `Pair<u8, String>`.
///
/// ## Dynamic classes
///
/// `dynamic` lets a struct live behind pointer-like slots such as
/// `Option<Box<dyn Trait>>`. It implements `DynamicObject` and `DynamicClass`,
/// and the struct must implement `Default`.
///
/// - `class_name = "..."` sets the stable name written to the stream; it
///   defaults to the type identifier.
/// - `bases(TraitA, TraitB)` registers a caster for each trait, so decoded
///   objects can be stored in `dyn TraitA` slots. The struct must implement
///   those traits, and they must have `DynamicObject` as a supertrait.
///
/// With the `auto_register` feature the class is also submitted for
/// `FactoryRegistry::auto_register`.
///
/// ```rust, ignore
/// trait Shape: DynamicObject {
///     fn area(&self) -> f32;
/// }
///
/// #[derive(Serializable, Default)]
/// #[serial(dynamic, class_name = "geometry::Circle", bases(Shape))]
/// struct Circle {
///     radius: f32,
/// }
///
/// impl Shape for Circle {
///     fn area(&self) -> f32 { 3.14 * self.radius * self.radius }
/// }
/// ```
///
/// Dynamic classes cannot be generic.
#[proc_macro_derive(Serializable, attributes(serial))]
pub fn derive_serializable(input: TokenStream) -> TokenStream {
    use crate::derive_data::SerialDerive;

    let ast = parse_macro_input!(input as DeriveInput);

    match SerialDerive::from_input(&ast) {
        Ok(SerialDerive::Struct(info)) => impls::impl_struct(&info).into(),
        Ok(SerialDerive::Enum(info)) => impls::impl_enum(&info).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
