use alloc::boxed::Box;
use alloc::string::String;

use super::{Reflected, Signature};
use crate::checksum::Checksum;

// -----------------------------------------------------------------------------
// MemberInfo

/// How a member is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberKind {
    /// Direct storage, read and written in place.
    Field,
    /// A getter/setter pair. Decoding reads into a temporary of the declared
    /// type and hands it to the setter.
    Accessor,
}

/// One serializable member of an aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberInfo {
    name: &'static str,
    type_name: &'static str,
    kind: MemberKind,
}

impl MemberInfo {
    /// A stored field named `name` of type `T`.
    #[inline]
    pub fn field<T: Signature + ?Sized>(name: &'static str) -> Self {
        Self {
            name,
            type_name: T::type_name(),
            kind: MemberKind::Field,
        }
    }

    /// An accessor pair displayed as `name`, whose getter yields a `T`.
    #[inline]
    pub fn accessor<T: Signature + ?Sized>(name: &'static str) -> Self {
        Self {
            name,
            type_name: T::type_name(),
            kind: MemberKind::Accessor,
        }
    }

    /// Field name or accessor display name. Also the JSON key.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type name, as it appears in the shape string.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub const fn kind(&self) -> MemberKind {
        self.kind
    }
}

// -----------------------------------------------------------------------------
// Shape

/// The ordered serializable members of an aggregate type.
///
/// Fields come first in declaration order, followed by accessor pairs in
/// declaration order. Only getters contribute to the shape.
#[derive(Debug)]
pub struct Shape {
    type_name: &'static str,
    checksum: Checksum,
    members: Box<[MemberInfo]>,
}

impl Shape {
    /// Builds the shape of `T` from its member list.
    pub fn new<T: Reflected + ?Sized>(members: impl Into<Box<[MemberInfo]>>) -> Self {
        let members = members.into();
        debug_assert!(
            members.is_sorted_by_key(MemberInfo::kind),
            "accessors of `{}` must follow its fields",
            T::type_name(),
        );

        Self {
            type_name: T::type_name(),
            checksum: T::CHECKSUM,
            members,
        }
    }

    /// A shape without members.
    #[inline]
    pub fn opaque(type_name: &'static str) -> Self {
        Self {
            type_name,
            checksum: Checksum::EMPTY,
            members: Box::new([]),
        }
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The structural checksum, equal to the checksum of
    /// [`shape_string`](Self::shape_string).
    #[inline]
    pub const fn checksum(&self) -> Checksum {
        self.checksum
    }

    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Finds a member by its field or display name.
    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.iter().find(|member| member.name == name)
    }

    /// `"<type-name> <member-name>; "` for every member.
    pub fn shape_string(&self) -> String {
        let len = self
            .members
            .iter()
            .map(|member| member.type_name.len() + member.name.len() + 3)
            .sum();

        let mut shape = String::with_capacity(len);
        for member in &self.members {
            shape.push_str(member.type_name);
            shape.push(' ');
            shape.push_str(member.name);
            shape.push_str("; ");
        }
        shape
    }
}

#[cfg(test)]
mod tests {
    use super::Shape;
    use crate::checksum::Checksum;

    #[test]
    fn opaque() {
        let shape = Shape::opaque("Handle");
        assert_eq!(shape.type_name(), "Handle");
        assert_eq!(shape.checksum(), Checksum::EMPTY);
        assert!(shape.members().is_empty());
        assert!(shape.member("x").is_none());
        assert_eq!(shape.shape_string(), "");
    }
}
