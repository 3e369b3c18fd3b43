use core::fmt;

use crate::info::{FieldInfo, MethodInfo, Projection, PropertyInfo, Type};

// -----------------------------------------------------------------------------
// MemberKind

/// The kind of a registered member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Property,
    Method,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Field => "field",
            Self::Property => "property",
            Self::Method => "method",
        })
    }
}

// -----------------------------------------------------------------------------
// Visibility

/// Whether a member is part of the public surface of its type.
///
/// Lookups always see both; editors usually hide [`Visibility::NonPublic`]
/// members unless asked to show them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    NonPublic,
}

// -----------------------------------------------------------------------------
// MemberInfo

/// A field, property or method descriptor.
///
/// Cloning is cheap, accessors are shared behind `Arc`.
#[derive(Clone, Debug)]
pub enum MemberInfo {
    Field(FieldInfo),
    Property(PropertyInfo),
    Method(MethodInfo),
}

impl MemberInfo {
    /// Returns the member name.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Field(info) => info.name(),
            Self::Property(info) => info.name(),
            Self::Method(info) => info.name(),
        }
    }

    /// Returns the [`MemberKind`].
    #[inline]
    pub fn kind(&self) -> MemberKind {
        match self {
            Self::Field(_) => MemberKind::Field,
            Self::Property(_) => MemberKind::Property,
            Self::Method(_) => MemberKind::Method,
        }
    }

    /// Returns the type declaring the member.
    #[inline]
    pub fn owner(&self) -> Type {
        match self {
            Self::Field(info) => info.owner(),
            Self::Property(info) => info.owner(),
            Self::Method(info) => info.owner(),
        }
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        match self {
            Self::Field(info) => info.visibility(),
            Self::Property(info) => info.visibility(),
            Self::Method(info) => info.visibility(),
        }
    }

    /// The field type, the property type or the method return type.
    #[inline]
    pub fn value_type(&self) -> Type {
        match self {
            Self::Field(info) => info.ty(),
            Self::Property(info) => info.ty(),
            Self::Method(info) => info.ret(),
        }
    }

    /// Returns the projection from the searched type to [`owner`](Self::owner).
    #[inline]
    pub fn projection(&self) -> &Projection {
        match self {
            Self::Field(info) => info.projection(),
            Self::Property(info) => info.projection(),
            Self::Method(info) => info.projection(),
        }
    }

    #[inline]
    pub fn as_field(&self) -> Option<&FieldInfo> {
        match self {
            Self::Field(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub fn as_property(&self) -> Option<&PropertyInfo> {
        match self {
            Self::Property(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub fn as_method(&self) -> Option<&MethodInfo> {
        match self {
            Self::Method(info) => Some(info),
            _ => None,
        }
    }

    pub(crate) fn with_projection(self, projection: Projection) -> Self {
        match self {
            Self::Field(info) => Self::Field(info.with_projection(projection)),
            Self::Property(info) => Self::Property(info.with_projection(projection)),
            Self::Method(info) => Self::Method(info.with_projection(projection)),
        }
    }
}

impl From<FieldInfo> for MemberInfo {
    #[inline]
    fn from(value: FieldInfo) -> Self {
        Self::Field(value)
    }
}

impl From<PropertyInfo> for MemberInfo {
    #[inline]
    fn from(value: PropertyInfo) -> Self {
        Self::Property(value)
    }
}

impl From<MethodInfo> for MemberInfo {
    #[inline]
    fn from(value: MethodInfo) -> Self {
        Self::Method(value)
    }
}
