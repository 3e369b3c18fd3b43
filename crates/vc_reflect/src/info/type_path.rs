use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// TypePath

/// Stable, persistable names of a type.
///
/// [`core::any::type_name`] may change between compiler versions, these
/// names do not. Member bindings store parameter types by
/// [`type_path`](TypePath::type_path) and accept the shorter
/// [`type_name`](TypePath::type_name) when it is unambiguous.
///
/// Paths never start with `::`.
///
/// Usually implemented by [`impl_reflect_value!`](crate::impl_reflect_value)
/// or [`impl_type_path!`](crate::impl_type_path). By hand only the path is
/// required:
///
/// ```
/// use vc_reflect::info::TypePath;
///
/// struct Health;
///
/// impl TypePath for Health {
///     fn type_path() -> &'static str {
///         "my_game::units::Health"
///     }
/// }
///
/// assert_eq!(Health::type_name(), "Health");
/// assert_eq!(Health::module_path(), Some("my_game::units"));
/// ```
pub trait TypePath: 'static {
    /// The unique path of the type.
    fn type_path() -> &'static str;

    /// The last path segment, may be shared by several types.
    #[inline]
    fn type_name() -> &'static str {
        short_name_of(Self::type_path())
    }

    /// The module declaring the type, `None` for primitives.
    #[inline]
    fn module_path() -> Option<&'static str> {
        module_path_of(Self::type_path())
    }
}

/// Returns the last segment of a `::` separated path.
///
/// ```
/// # use vc_reflect::info::short_name_of;
/// assert_eq!(short_name_of("my_game::units::Health"), "Health");
/// assert_eq!(short_name_of("i32"), "i32");
/// ```
pub fn short_name_of(path: &'static str) -> &'static str {
    match path.rfind("::") {
        Some(index) => &path[index + 2..],
        None => path,
    }
}

/// Returns everything before the last segment of a `::` separated path.
///
/// ```
/// # use vc_reflect::info::module_path_of;
/// assert_eq!(module_path_of("my_game::units::Health"), Some("my_game::units"));
/// assert_eq!(module_path_of("i32"), None);
/// ```
pub fn module_path_of(path: &'static str) -> Option<&'static str> {
    path.rfind("::").map(|index| &path[..index])
}

// -----------------------------------------------------------------------------
// DynamicTypePath

/// [`TypePath`] for values, implemented for every sized [`TypePath`] type.
///
/// ```
/// use vc_reflect::{info::DynamicTypePath, Reflect};
///
/// let speed = 2.5_f32;
/// let value: &dyn Reflect = &speed;
/// assert_eq!(value.reflect_type_path(), "f32");
/// ```
pub trait DynamicTypePath {
    fn reflect_type_path(&self) -> &'static str;

    fn reflect_type_name(&self) -> &'static str;

    fn reflect_module_path(&self) -> Option<&'static str>;
}

impl<T: TypePath> DynamicTypePath for T {
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        T::type_path()
    }

    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        T::type_name()
    }

    #[inline]
    fn reflect_module_path(&self) -> Option<&'static str> {
        T::module_path()
    }
}

// -----------------------------------------------------------------------------
// Type

/// The runtime descriptor of a type.
///
/// Field types, property types, parameter lists and return types are
/// expressed with it. Two descriptors are equal when their [`TypeId`]s are.
///
/// ```
/// # use core::any::TypeId;
/// use vc_reflect::info::Type;
///
/// let ty = Type::of::<String>();
///
/// assert!(ty.is::<String>());
/// assert_eq!(ty.path(), "alloc::string::String");
/// assert_eq!(ty.name(), "String");
/// assert_eq!(ty.id(), TypeId::of::<String>());
/// ```
#[derive(Copy, Clone)]
pub struct Type {
    id: TypeId,
    path: fn() -> &'static str,
    name: fn() -> &'static str,
}

impl Type {
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: T::type_path,
            name: T::type_name,
        }
    }

    /// The return type of methods without value.
    #[inline]
    pub const fn unit() -> Self {
        Self::of::<()>()
    }

    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        TypeId::of::<T>() == self.id
    }

    #[inline]
    pub fn is_unit(&self) -> bool {
        self.is::<()>()
    }

    /// See [`TypePath::type_path`].
    #[inline]
    pub fn path(&self) -> &'static str {
        (self.path)()
    }

    /// See [`TypePath::type_name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        (self.name)()
    }

    /// See [`TypePath::module_path`].
    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        module_path_of(self.path())
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl core::hash::Hash for Type {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Writes the short type name, as shown in signatures.
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// Signature

/// Formats a parameter list as `(A, B, C)`.
///
/// ```
/// # use vc_reflect::info::{Signature, Type};
/// let params = [Type::of::<i32>(), Type::of::<String>()];
/// assert_eq!(format!("{}", Signature(&params)), "(i32, String)");
/// ```
pub struct Signature<'a>(pub &'a [Type]);

impl fmt::Display for Signature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, ty) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(ty.name())?;
        }
        f.write_str(")")
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;

    use super::{Signature, Type, TypePath};

    #[test]
    fn non_ascii_paths() {
        struct Lamp;
        impl TypePath for Lamp {
            fn type_path() -> &'static str {
                "世界::灯::Lamp"
            }
        }

        assert_eq!(Lamp::type_name(), "Lamp");
        assert_eq!(Type::of::<Lamp>().module_path(), Some("世界::灯"));
    }

    #[test]
    fn type_equality_is_by_id() {
        assert_eq!(Type::of::<String>(), Type::of::<String>());
        assert_ne!(Type::of::<String>(), Type::of::<i32>());
        assert!(Type::unit().is_unit());
        assert_eq!(format!("{:?} {}", Type::of::<String>(), Type::of::<String>()), "alloc::string::String String");
    }

    #[test]
    fn empty_signature() {
        assert_eq!(format!("{}", Signature(&[])), "()");
    }
}
