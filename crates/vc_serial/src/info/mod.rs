//! Static type descriptions.
//!
//! - [`Category`]: the value category a type is encoded as.
//! - [`Signature`]: category, display name and name checksum of every
//!   serializable type.
//! - [`Reflected`]: the compile-time structural checksum and the ordered member
//!   list ([`Shape`]) of an aggregate.
//! - [`shape_string`] / [`checksum`]: the two equivalent fingerprints of an
//!   aggregate. The checksum is built in a `const` context by combining the
//!   checksums of the pieces of the shape string, and always equals the
//!   checksum of the string itself.
//!
//! ```
//! use vc_serial::checksum::Checksum;
//! use vc_serial::derive::Serializable;
//! use vc_serial::info::{checksum, shape_string};
//!
//! #[derive(Serializable, Default)]
//! struct Point {
//!     x: f32,
//!     y: f32,
//! }
//!
//! assert_eq!(shape_string::<Point>(), "f32 x; f32 y; ");
//! assert_eq!(checksum::<Point>(), Checksum::of(&shape_string::<Point>()));
//! ```

// -----------------------------------------------------------------------------
// Modules

mod category;
mod cell;
mod shape;
mod signature;

// -----------------------------------------------------------------------------
// Exports

pub use category::Category;
pub use cell::{GenericCell, GenericNameCell, GenericShapeCell, NonGenericShapeCell};
pub use shape::{MemberInfo, MemberKind, Shape};
pub use signature::{
    Reflected, Signature, UNKNOWN_TYPE_NAME, checksum, member_checksum, shape_string,
};
