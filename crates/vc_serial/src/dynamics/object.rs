use alloc::boxed::Box;
use core::any::Any;

use super::FactoryRegistry;
use crate::checksum::Checksum;
use crate::value::Aggregate;

/// An aggregate that can live behind a pointer-like slot.
///
/// Traits used as slot pointees (`dyn Shape`) must have `DynamicObject` as a
/// supertrait.
pub trait DynamicObject: Aggregate + Any {
    /// Stable cross-process identifier of the concrete type.
    fn class_name(&self) -> &'static str;

    /// The aggregate checksum of the concrete type.
    #[inline]
    fn class_checksum(&self) -> Checksum {
        self.checksum()
    }

    /// Upcasts to `dyn DynamicObject` from any pointee type.
    fn as_dynamic(&self) -> &dyn DynamicObject;
}

/// Static side of a [`DynamicObject`]: name, zero-argument construction and
/// the base traits it can be viewed as.
pub trait DynamicClass: DynamicObject + Default {
    const CLASS_NAME: &'static str;

    /// Creates a default instance for decoding.
    #[inline]
    fn construct() -> Box<dyn DynamicObject> {
        Box::new(Self::default())
    }

    /// Registers one caster per base trait, see
    /// [`FactoryRegistry::register_caster`].
    #[inline]
    fn register_casters(registry: &mut FactoryRegistry) {
        let _ = registry;
    }
}

/// Downcasts a boxed dynamic object to its concrete type.
///
/// ```
/// # use vc_serial::derive::Serializable;
/// use vc_serial::dynamics::{downcast, DynamicObject};
///
/// #[derive(Serializable, Default)]
/// #[serial(dynamic)]
/// struct Marker {
///     id: u32,
/// }
///
/// let object: Box<dyn DynamicObject> = Box::new(Marker { id: 4 });
/// assert_eq!(downcast::<Marker>(object).unwrap().id, 4);
/// ```
#[inline]
pub fn downcast<C: DynamicObject>(object: Box<dyn DynamicObject>) -> Option<Box<C>> {
    let object: Box<dyn Any> = object;
    object.downcast::<C>().ok()
}
