//! Items referenced by `#[derive(Serializable)]` expansions.
//!
//! Not part of the public API.

#[doc(hidden)]
pub mod macro_utils {
    pub use alloc::boxed::Box;
    pub use core::convert::Into;
    pub use core::default::Default;
    pub use core::result::Result::Ok;
}

#[doc(hidden)]
#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::dynamics::FactoryRegistry;

    /// A registration function submitted by a `#[serial(dynamic)]` class.
    pub struct __AutoRegisterFunc(pub fn(&mut FactoryRegistry));

    inventory::collect!(__AutoRegisterFunc);

    // Runs together with the class submissions, so a registry only sees the
    // flag on platforms where `inventory` actually collects anything.
    inventory::submit! {
        __AutoRegisterFunc(FactoryRegistry::__mark_auto_registered)
    }

    pub(crate) fn __register_classes(registry: &mut FactoryRegistry) {
        let mut count = 0_usize;
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
            count += 1;
        }
        log::debug!("automatic class registration finished, {count} submissions");
    }
}
