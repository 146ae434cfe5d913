use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;

use crate::Result;
use crate::checksum::Checksum;
use crate::dynamics::{DynamicObject, FactoryRegistry, Handle};
use crate::info::{Category, Signature, UNKNOWN_TYPE_NAME};
use crate::value::{PointerSlot, Serial, SerialMut, SerialRef};

macro_rules! impl_pointer_like {
    ($ty:ty, |$this:ident| $get:expr, |$object:ident| $wrap:expr) => {
        impl<B: ?Sized + DynamicObject> Signature for $ty {
            const CATEGORY: Category = Category::PointerLike;
            const NAME_CHECKSUM: Checksum = Checksum::of(UNKNOWN_TYPE_NAME);

            #[inline]
            fn type_name() -> &'static str {
                UNKNOWN_TYPE_NAME
            }
        }

        impl<B: ?Sized + DynamicObject> PointerSlot for $ty {
            #[inline]
            fn get(&self) -> Option<&dyn DynamicObject> {
                let $this = self;
                $get.map(B::as_dynamic)
            }

            #[inline]
            fn clear(&mut self) {
                *self = Default::default();
            }

            #[inline]
            fn accepts(&self, object: &dyn DynamicObject, registry: &FactoryRegistry) -> bool {
                registry.can_cast::<B>(object)
            }

            fn assign(
                &mut self,
                object: Box<dyn DynamicObject>,
                registry: &FactoryRegistry,
            ) -> Result<()> {
                let $object = registry.cast::<B>(object)?;
                *self = $wrap;
                Ok(())
            }
        }

        impl<B: ?Sized + DynamicObject> Serial for $ty {
            #[inline]
            fn serial_ref(&self) -> SerialRef<'_> {
                SerialRef::PointerLike(PointerSlot::get(self))
            }

            #[inline]
            fn serial_mut(&mut self) -> SerialMut<'_> {
                SerialMut::PointerLike(self)
            }
        }
    };
}

impl_pointer_like!(Option<Box<B>>, |this| this.as_deref(), |object| Some(object));
impl_pointer_like!(Option<Rc<B>>, |this| this.as_deref(), |object| Some(Rc::from(object)));
impl_pointer_like!(Option<Arc<B>>, |this| this.as_deref(), |object| Some(Arc::from(object)));
impl_pointer_like!(Handle<B>, |this| this.get(), |object| Handle::Owned(object));
