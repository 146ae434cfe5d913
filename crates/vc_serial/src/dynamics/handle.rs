use alloc::boxed::Box;
use alloc::sync::Arc;

/// An owned handle to a polymorphic object.
///
/// Unifies exclusive and shared ownership behind one pointer-like slot. The
/// encoding does not depend on the variant: a shared object is written as a
/// full copy and always decodes as [`Handle::Owned`].
pub enum Handle<B: ?Sized> {
    None,
    Owned(Box<B>),
    Shared(Arc<B>),
}

impl<B: ?Sized> Handle<B> {
    #[inline]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The pointee, if any.
    #[inline]
    pub fn get(&self) -> Option<&B> {
        match self {
            Self::None => None,
            Self::Owned(boxed) => Some(&**boxed),
            Self::Shared(shared) => Some(&**shared),
        }
    }

    /// Converts the handle into shared ownership.
    pub fn into_shared(self) -> Option<Arc<B>> {
        match self {
            Self::None => None,
            Self::Owned(boxed) => Some(Arc::from(boxed)),
            Self::Shared(shared) => Some(shared),
        }
    }
}

impl<B: ?Sized> Default for Handle<B> {
    #[inline]
    fn default() -> Self {
        Self::None
    }
}

impl<B: ?Sized> From<Box<B>> for Handle<B> {
    #[inline]
    fn from(value: Box<B>) -> Self {
        Self::Owned(value)
    }
}

impl<B: ?Sized> From<Arc<B>> for Handle<B> {
    #[inline]
    fn from(value: Arc<B>) -> Self {
        Self::Shared(value)
    }
}
