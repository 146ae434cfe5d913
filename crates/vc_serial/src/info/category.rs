use core::fmt;

/// The value categories the traversal engines dispatch on.
///
/// Variants are declared in resolution priority: a type that could be read as
/// several categories is encoded as the first one. The derived `Ord` follows
/// that priority, so `Category::Arithmetic < Category::Aggregate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Arithmetic,
    Enum,
    PointerLike,
    String,
    Iterable,
    Pair,
    Aggregate,
}

impl Category {
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Arithmetic => "arithmetic",
            Self::Enum => "enum",
            Self::PointerLike => "pointer-like",
            Self::String => "string",
            Self::Iterable => "iterable",
            Self::Pair => "pair",
            Self::Aggregate => "aggregate",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
