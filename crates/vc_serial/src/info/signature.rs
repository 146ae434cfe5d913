use alloc::string::String;

use super::{Category, Shape};
use crate::checksum::Checksum;

/// Type name of values whose concrete type is only known at run time.
pub const UNKNOWN_TYPE_NAME: &str = "<unknown>";

// -----------------------------------------------------------------------------
// Signature

/// Static description shared by every serializable type.
///
/// `NAME_CHECKSUM` must equal `Checksum::of(Self::type_name())`. It is spelled
/// out separately so that aggregate checksums can be assembled at compile
/// time, even for generic types whose names are only built at run time.
///
/// # Type names
///
/// - primitives use their keyword: `bool`, `i32`, `f64`, `char`, ...
/// - `String`
/// - containers: `Vec<T>`, `VecDeque<T>`, `LinkedList<T>`, `BTreeSet<T>`,
///   `HashSet<T>`, `BTreeMap<K, V>`, `HashMap<K, V>`, `[T; N]`
/// - pairs: `(A, B)`
/// - aggregates and enums: their identifier, with generic arguments
/// - pointer-likes: [`UNKNOWN_TYPE_NAME`]
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use vc_serial::checksum::Checksum;
/// use vc_serial::info::{Category, Signature};
///
/// type Table = BTreeMap<String, Vec<u8>>;
///
/// assert_eq!(Table::type_name(), "BTreeMap<String, Vec<u8>>");
/// assert_eq!(Table::NAME_CHECKSUM, Checksum::of(Table::type_name()));
/// assert_eq!(Table::CATEGORY, Category::Iterable);
/// ```
pub trait Signature: 'static {
    /// The category this type is encoded as.
    const CATEGORY: Category;

    /// Checksum of [`type_name`](Signature::type_name).
    const NAME_CHECKSUM: Checksum;

    /// Display name used in shape strings.
    fn type_name() -> &'static str;
}

// -----------------------------------------------------------------------------
// Reflected

/// Static description of an aggregate.
///
/// Implemented by `#[derive(Serializable)]` for structs with named fields.
pub trait Reflected: Signature {
    /// The structural checksum, computed at compile time.
    const CHECKSUM: Checksum;

    /// The ordered member list.
    fn shape() -> &'static Shape;
}

/// Checksum of the shape string fragment `"<type-name> <member-name>; "`.
///
/// An aggregate's checksum is the combination of the fragments of all of its
/// members, in order.
///
/// ```
/// use vc_serial::checksum::Checksum;
/// use vc_serial::info::{member_checksum, Signature};
///
/// let x = member_checksum(f32::NAME_CHECKSUM, "x");
/// assert_eq!(x, Checksum::of("f32 x; "));
/// ```
pub const fn member_checksum(type_name: Checksum, member_name: &str) -> Checksum {
    type_name
        .combine(Checksum::of(" "))
        .combine(Checksum::of(member_name))
        .combine(Checksum::of("; "))
}

/// The canonical shape string of `T`.
#[inline]
pub fn shape_string<T: Reflected + ?Sized>() -> String {
    T::shape().shape_string()
}

/// The structural checksum of `T`.
#[inline]
pub const fn checksum<T: Reflected + ?Sized>() -> Checksum {
    T::CHECKSUM
}

#[cfg(test)]
mod tests {
    use alloc::collections::{BTreeMap, BTreeSet, LinkedList, VecDeque};
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::collections::{HashMap, HashSet};

    use super::{Signature, UNKNOWN_TYPE_NAME};
    use crate::checksum::Checksum;
    use crate::dynamics::{DynamicObject, Handle};
    use crate::info::Category;

    fn check<T: Signature>(name: &str, category: Category) {
        assert_eq!(T::type_name(), name);
        assert_eq!(T::NAME_CHECKSUM, Checksum::of(name), "{name}");
        assert_eq!(T::CATEGORY, category, "{name}");
    }

    #[test]
    fn primitive_names() {
        check::<bool>("bool", Category::Arithmetic);
        check::<u8>("u8", Category::Arithmetic);
        check::<i128>("i128", Category::Arithmetic);
        check::<usize>("usize", Category::Arithmetic);
        check::<f64>("f64", Category::Arithmetic);
        check::<char>("char", Category::Arithmetic);
        check::<String>("String", Category::String);
    }

    #[test]
    fn container_names() {
        check::<Vec<i32>>("Vec<i32>", Category::Iterable);
        check::<VecDeque<u8>>("VecDeque<u8>", Category::Iterable);
        check::<LinkedList<f32>>("LinkedList<f32>", Category::Iterable);
        check::<BTreeSet<String>>("BTreeSet<String>", Category::Iterable);
        check::<HashSet<u16>>("HashSet<u16>", Category::Iterable);
        check::<BTreeMap<u8, String>>("BTreeMap<u8, String>", Category::Iterable);
        check::<HashMap<String, Vec<i64>>>("HashMap<String, Vec<i64>>", Category::Iterable);
        check::<[u8; 16]>("[u8; 16]", Category::Iterable);
        check::<(i32, String)>("(i32, String)", Category::Pair);
        check::<Vec<(u8, [f32; 3])>>("Vec<(u8, [f32; 3])>", Category::Iterable);
    }

    #[test]
    fn pointer_names() {
        check::<Handle<dyn DynamicObject>>(UNKNOWN_TYPE_NAME, Category::PointerLike);
        check::<Option<alloc::boxed::Box<dyn DynamicObject>>>(
            UNKNOWN_TYPE_NAME,
            Category::PointerLike,
        );
    }
}
