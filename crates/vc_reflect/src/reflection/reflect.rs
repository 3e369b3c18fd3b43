use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{DynamicTypePath, Type, TypePath};

// -----------------------------------------------------------------------------
// Reflect

/// A value that can be handled without knowing its concrete type.
///
/// Host objects, member values and call arguments all travel as
/// `dyn Reflect`. A value knows its [`Type`], clones itself into a new box
/// and accepts a boxed replacement of the same type.
///
/// Members are not described here. They live in the
/// [`TypeRegistry`](crate::registry::TypeRegistry), keyed by [`Reflect::ty_id`].
///
/// On a `Box<dyn Reflect>`, [`Any::type_id`] names the box. Use
/// [`Reflect::ty_id`] for the value inside:
///
/// ```rust
/// # use vc_reflect::Reflect;
/// # use core::any::{Any, TypeId};
/// let x: Box<dyn Reflect> = 32_i32.into_boxed_reflect();
///
/// assert!(x.type_id() != TypeId::of::<i32>());
/// assert!(x.ty_id() == TypeId::of::<i32>());
/// ```
///
/// Implement it with [`impl_reflect_value!`](crate::impl_reflect_value),
/// which requires `Clone + PartialEq + Debug`:
///
/// ```
/// #[derive(Clone, PartialEq, Debug)]
/// struct Health(i32);
///
/// vc_reflect::impl_reflect_value!(Health, "my_game::Health");
/// ```
pub trait Reflect: DynamicTypePath + Send + Sync + Any {
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Same as `Box::new(self) as Box<dyn Reflect>`.
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// The [`TypeId`] of the value, not of a box holding it.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the [`Type`] descriptor of the underlying type.
    fn reflect_type(&self) -> Type;

    /// Overwrites the value with `value`, handing it back on a type mismatch.
    ///
    /// ```
    /// # use vc_reflect::Reflect;
    /// let mut x = 1_i32;
    /// assert!(x.set(2_i32.into_boxed_reflect()).is_ok());
    /// assert_eq!(x, 2);
    ///
    /// assert!(x.set(2_u8.into_boxed_reflect()).is_err());
    /// ```
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Clones the value into a new box of the same concrete type.
    fn reflect_clone(&self) -> Box<dyn Reflect>;

    /// Compares with another value, `None` when the type has no equality.
    #[inline]
    fn reflect_partial_eq(&self, _other: &dyn Reflect) -> Option<bool> {
        None
    }

    /// Writes `Opaque(type_path)` unless overridden.
    fn reflect_debug(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Opaque({})", self.reflect_type_path())
    }
}

impl dyn Reflect {
    /// ```
    /// # use vc_reflect::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// assert!(x.is::<i32>());
    /// ```
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Returns the box back if the value is not a `T`.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Unboxes the value as `T`, returning the box back on mismatch.
    ///
    /// ```
    /// # use vc_reflect::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// let x = x.take::<i32>().unwrap();
    /// assert_eq!(x, 10);
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

impl TypePath for dyn Reflect {
    #[inline]
    fn type_path() -> &'static str {
        "dyn vc_reflect::Reflect"
    }

    #[inline]
    fn type_name() -> &'static str {
        "dyn Reflect"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// impl_type_path

/// Implements [`TypePath`] from a `::` separated path.
///
/// Useful for types that are never reflected values themselves, such as
/// holders of extension methods.
///
/// ```
/// # use vc_reflect::info::TypePath;
/// struct MathExt;
///
/// vc_reflect::impl_type_path!(MathExt, "my_game::ext::MathExt");
///
/// assert_eq!(MathExt::type_name(), "MathExt");
/// assert_eq!(MathExt::module_path(), Some("my_game::ext"));
/// ```
#[macro_export]
macro_rules! impl_type_path {
    ($ty:ty) => {
        $crate::impl_type_path!(
            $ty,
            ::core::concat!(::core::module_path!(), "::", ::core::stringify!($ty))
        );
    };
    ($ty:ty, $path:expr) => {
        impl $crate::info::TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }
        }
    };
}

// -----------------------------------------------------------------------------
// impl_reflect_value

/// Implements [`TypePath`] and [`Reflect`] for a `Clone + PartialEq + Debug` type.
///
/// The second argument is the stable type path. When omitted, the path is
/// built from `module_path!()` of the invocation site.
///
/// ```
/// # use vc_reflect::{Reflect, info::TypePath};
/// #[derive(Clone, PartialEq, Debug)]
/// struct Speed(f32);
///
/// vc_reflect::impl_reflect_value!(Speed, "my_game::Speed");
///
/// assert_eq!(Speed::type_name(), "Speed");
/// assert_eq!(Speed::module_path(), Some("my_game"));
/// ```
#[macro_export]
macro_rules! impl_reflect_value {
    ($ty:ty) => {
        $crate::impl_reflect_value!(
            $ty,
            ::core::concat!(::core::module_path!(), "::", ::core::stringify!($ty))
        );
    };
    ($ty:ty, $path:expr) => {
        $crate::impl_type_path!($ty, $path);

        impl $crate::Reflect for $ty {
            #[inline]
            fn reflect_type(&self) -> $crate::info::Type {
                $crate::info::Type::of::<Self>()
            }

            fn set(
                &mut self,
                value: $crate::__macro_exports::Box<dyn $crate::Reflect>,
            ) -> Result<(), $crate::__macro_exports::Box<dyn $crate::Reflect>> {
                *self = value.take::<Self>()?;
                Ok(())
            }

            #[inline]
            fn reflect_clone(&self) -> $crate::__macro_exports::Box<dyn $crate::Reflect> {
                $crate::__macro_exports::Box::new(::core::clone::Clone::clone(self))
            }

            fn reflect_partial_eq(&self, other: &dyn $crate::Reflect) -> Option<bool> {
                match other.downcast_ref::<Self>() {
                    Some(other) => Some(::core::cmp::PartialEq::eq(self, other)),
                    None => Some(false),
                }
            }

            #[inline]
            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Tests
