// -----------------------------------------------------------------------------
// Modules

mod aggregate;
mod auto_register;
mod dynamic;
mod enum_value;
mod signature;

// -----------------------------------------------------------------------------
// Internal API

use auto_register::get_auto_register_impl;
use dynamic::impl_dynamic;
use signature::impl_trait_signature;

pub(crate) use aggregate::impl_struct;
pub(crate) use enum_value::impl_enum;
