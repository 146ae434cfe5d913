//! Polymorphic objects behind pointer-like slots.
//!
//! A pointer-like slot (`Option<Box<dyn Trait>>`, `Option<Rc<dyn Trait>>`,
//! `Option<Arc<dyn Trait>>` or [`Handle<dyn Trait>`]) is encoded as the class
//! name of the pointee, its class checksum and then its members. Decoding
//! looks the class name up in a [`FactoryRegistry`], constructs a default
//! instance, checks the checksum, decodes the members and finally converts the
//! instance to the slot's pointee type through a registered caster.
//!
//! `#[derive(Serializable)]` with `#[serial(dynamic)]` implements
//! [`DynamicObject`] and [`DynamicClass`] and, with the `auto_register`
//! feature, submits the class for [`FactoryRegistry::auto_register`].
//!
//! ```
//! use vc_serial::derive::Serializable;
//! use vc_serial::dynamics::{DynamicObject, FactoryRegistry};
//!
//! trait Shape: DynamicObject {
//!     fn area(&self) -> f32;
//! }
//!
//! #[derive(Serializable, Default)]
//! #[serial(dynamic, class_name = "demo::Square", bases(Shape))]
//! struct Square {
//!     side: f32,
//! }
//!
//! impl Shape for Square {
//!     fn area(&self) -> f32 {
//!         self.side * self.side
//!     }
//! }
//!
//! let mut registry = FactoryRegistry::new();
//! registry.register::<Square>();
//!
//! let slot: Option<Box<dyn Shape>> = Some(Box::new(Square { side: 3.0 }));
//! let bytes = vc_serial::to_bytes(&slot).unwrap();
//!
//! let back: Option<Box<dyn Shape>> = vc_serial::from_bytes(&bytes, &registry).unwrap();
//! assert_eq!(back.unwrap().area(), 9.0);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod handle;
mod object;
mod registry;

// -----------------------------------------------------------------------------
// Exports

pub use handle::Handle;
pub use object::{DynamicClass, DynamicObject, downcast};
pub use registry::{Caster, Constructor, FactoryRegistry};
