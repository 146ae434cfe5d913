//! Built-in implementations of [`Signature`] and [`Serial`].
//!
//! ## Implemented Menu
//!
//! - arithmetic: `bool`, `i8`-`i128`, `isize`, `u8`-`u128`, `usize`, `f32`,
//!   `f64`, `char`
//! - string: `String`
//! - iterable: `Vec<T>`, `VecDeque<T>`, `LinkedList<T>`, `BTreeSet<T>`,
//!   `HashSet<T>`, `BTreeMap<K, V>`, `HashMap<K, V>`, `[T; N]`
//! - pair: `(A, B)`
//! - pointer-like: `Option<Box<B>>`, `Option<Rc<B>>`, `Option<Arc<B>>` and
//!   [`Handle<B>`] for any `B: ?Sized + DynamicObject`
//!
//! Growable containers need `Default` elements: decoding constructs a
//! default element, decodes into it and then appends or inserts it.
//!
//! [`Signature`]: crate::info::Signature
//! [`Serial`]: crate::value::Serial
//! [`Handle<B>`]: crate::dynamics::Handle

// -----------------------------------------------------------------------------
// Modules

mod array;
mod map;
mod pointer;
mod primitive;
mod sequence;
mod set;
mod tuple;

/// Concatenates string slices with a single allocation.
///
/// ```
/// assert_eq!(vc_serial::impls::concat(&["Vec<", "u8", ">"]), "Vec<u8>");
/// ```
pub fn concat(arr: &[&str]) -> alloc::string::String {
    let len = arr.iter().map(|item| item.len()).sum();
    let mut res = alloc::string::String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}

/// Upper bound of the capacity reserved up front for a decoded container.
///
/// The element count comes from the input; larger containers grow as
/// elements actually arrive.
const PREALLOCATE_LIMIT: usize = 1024;
