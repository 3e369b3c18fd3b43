use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use serde_core::de::{self, DeserializeSeed, Visitor};
use serde_core::{Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::info::Type;
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// TypeNameError

/// A type name that could not be resolved against a [`TypeRegistry`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeNameError {
    /// No registered type has this path or name.
    #[error("no registered type named `{0}`")]
    Unknown(String),
    /// The short name matches several registered types.
    #[error("type name `{0}` is ambiguous, use the full type path")]
    Ambiguous(String),
}

// -----------------------------------------------------------------------------
// Conversions

/// Returns the persistent name of `ty`: its full type path.
#[inline]
pub fn type_to_name(ty: &Type) -> String {
    ty.path().to_string()
}

/// Resolves a persistent name, full path first, then short name.
pub fn type_from_name(registry: &TypeRegistry, name: &str) -> Result<Type, TypeNameError> {
    if let Some(meta) = registry.get_with_type_path(name) {
        return Ok(meta.ty());
    }
    if let Some(meta) = registry.get_with_type_name(name) {
        return Ok(meta.ty());
    }
    if registry.is_ambiguous(name) {
        Err(TypeNameError::Ambiguous(name.to_string()))
    } else {
        Err(TypeNameError::Unknown(name.to_string()))
    }
}

/// [`type_to_name`] for a list.
pub fn types_to_names(types: &[Type]) -> Vec<String> {
    types.iter().map(type_to_name).collect()
}

/// [`type_from_name`] for a list, stops at the first failure.
pub fn types_from_names<S: AsRef<str>>(
    registry: &TypeRegistry,
    names: &[S],
) -> Result<Vec<Type>, TypeNameError> {
    names
        .iter()
        .map(|name| type_from_name(registry, name.as_ref()))
        .collect()
}

// -----------------------------------------------------------------------------
// Serde

impl Serialize for Type {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}

/// Deserializes a [`Type`] from its name, see [`type_from_name`].
///
/// # Examples
///
/// ```
/// # use serde_core::de::DeserializeSeed;
/// use vc_reflect::info::Type;
/// use vc_reflect::registry::TypeRegistry;
/// use vc_reflect::serde::TypeSeed;
///
/// let registry = TypeRegistry::new();
/// let mut deserializer = serde_json::Deserializer::from_str(r#""f32""#);
/// let ty = TypeSeed::new(&registry).deserialize(&mut deserializer).unwrap();
/// assert_eq!(ty, Type::of::<f32>());
/// ```
#[derive(Clone, Copy)]
pub struct TypeSeed<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> TypeSeed<'a> {
    #[inline]
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }
}

impl<'de> DeserializeSeed<'de> for TypeSeed<'_> {
    type Value = Type;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        struct TypeNameVisitor<'a>(&'a TypeRegistry);

        impl<'de> Visitor<'de> for TypeNameVisitor<'_> {
            type Value = Type;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("string containing a registered type path or name")
            }

            fn visit_str<E: de::Error>(self, name: &str) -> Result<Self::Value, E> {
                type_from_name(self.0, name).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(TypeNameVisitor(self.registry))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use super::{TypeNameError, type_from_name, types_from_names, types_to_names};
    use crate::info::Type;
    use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

    mod a {
        #[derive(Clone, PartialEq, Debug)]
        pub struct Tag;
        crate::impl_reflect_value!(Tag, "a::Tag");
    }

    mod b {
        #[derive(Clone, PartialEq, Debug)]
        pub struct Tag;
        crate::impl_reflect_value!(Tag, "b::Tag");
    }

    impl GetTypeMeta for a::Tag {
        fn get_type_meta() -> TypeMeta {
            TypeMeta::of::<Self>()
        }
    }

    impl GetTypeMeta for b::Tag {
        fn get_type_meta() -> TypeMeta {
            TypeMeta::of::<Self>()
        }
    }

    #[test]
    fn names_round_trip() {
        let registry = TypeRegistry::new();
        let types = [Type::of::<f32>(), Type::of::<String>()];
        let names = types_to_names(&types);
        assert_eq!(names, vec!["f32", "alloc::string::String"]);
        assert_eq!(types_from_names(&registry, &names).unwrap(), types);
    }

    #[test]
    fn ambiguous_short_name() {
        let mut registry = TypeRegistry::new();
        registry.register::<a::Tag>();
        registry.register::<b::Tag>();

        assert_eq!(
            type_from_name(&registry, "Tag"),
            Err(TypeNameError::Ambiguous(String::from("Tag")))
        );
        assert_eq!(type_from_name(&registry, "b::Tag"), Ok(Type::of::<b::Tag>()));
    }

    #[test]
    fn serialize_as_path() {
        let json = serde_json::to_string(&Type::of::<String>()).unwrap();
        assert_eq!(json, r#""alloc::string::String""#);
        let ron = ron::to_string(&Type::of::<u8>()).unwrap();
        assert_eq!(ron, r#""u8""#);
    }
}
