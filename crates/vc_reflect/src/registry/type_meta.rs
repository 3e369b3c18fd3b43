use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use crate::Reflect;
use crate::info::{BaseUpcast, FieldInfo, MemberInfo, MethodInfo, PropertyInfo};
use crate::info::{Type, TypePath, Upcast};
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// TypeMeta

/// Runtime storage for the members of a type, registered into the [`TypeRegistry`].
///
/// A `TypeMeta` lists the fields, properties and methods declared on the
/// type itself, in declaration order, plus an optional base type whose
/// members are inherited.
///
/// Extension methods are declared on a holder type like any other method;
/// the registry makes them visible on the extended type.
///
/// # Example
///
/// ```
/// use vc_reflect::info::FieldInfo;
/// use vc_reflect::registry::TypeMeta;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Ammo { count: u32 }
/// vc_reflect::impl_reflect_value!(Ammo, "demo::Ammo");
///
/// let meta = TypeMeta::of::<Ammo>()
///     .with_field(FieldInfo::new::<Ammo, u32>("count", |a| &a.count, |a| &mut a.count));
///
/// assert_eq!(meta.ty().name(), "Ammo");
/// assert_eq!(meta.members_named("count").count(), 1);
/// ```
#[derive(Clone)]
pub struct TypeMeta {
    ty: Type,
    base: Option<Arc<dyn Upcast>>,
    members: Vec<MemberInfo>,
}

impl TypeMeta {
    /// Creates a [`TypeMeta`] without members.
    #[inline]
    pub fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            ty: Type::of::<T>(),
            base: None,
            members: Vec::new(),
        }
    }

    /// Declares `B` as the base type of `T`.
    ///
    /// `get` and `get_mut` borrow the embedded base value.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not the type of this meta.
    pub fn with_base<T, B>(mut self, get: fn(&T) -> &B, get_mut: fn(&mut T) -> &mut B) -> Self
    where
        T: Reflect + TypePath,
        B: Reflect + TypePath,
    {
        assert!(
            self.ty.is::<T>(),
            "`with_base` called with `{}` on the meta of `{}`",
            T::type_path(),
            self.ty.path(),
        );
        self.base = Some(Arc::new(BaseUpcast::new(get, get_mut)));
        self
    }

    #[inline]
    pub fn with_field(self, field: FieldInfo) -> Self {
        self.with_member(field)
    }

    #[inline]
    pub fn with_property(self, property: PropertyInfo) -> Self {
        self.with_member(property)
    }

    #[inline]
    pub fn with_method(self, method: MethodInfo) -> Self {
        self.with_member(method)
    }

    /// Appends any member.
    #[inline]
    pub fn with_member(mut self, member: impl Into<MemberInfo>) -> Self {
        self.push(member);
        self
    }

    /// Appends a member in place.
    #[inline]
    pub fn push(&mut self, member: impl Into<MemberInfo>) {
        self.members.push(member.into());
    }

    /// Returns the [`Type`].
    #[inline(always)]
    pub fn ty(&self) -> Type {
        self.ty
    }

    #[inline(always)]
    pub fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    /// Returns the base type, if declared.
    #[inline]
    pub fn base(&self) -> Option<Type> {
        self.base.as_ref().map(|upcast| upcast.base())
    }

    #[inline]
    pub fn upcast(&self) -> Option<&Arc<dyn Upcast>> {
        self.base.as_ref()
    }

    /// All members declared on this type, in declaration order.
    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Members declared on this type with the given name.
    pub fn members_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MemberInfo> {
        self.members.iter().filter(move |member| member.name() == name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldInfo> {
        self.members.iter().filter_map(MemberInfo::as_field)
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyInfo> {
        self.members.iter().filter_map(MemberInfo::as_property)
    }

    /// Instance and static methods, without extension methods.
    pub fn methods(&self) -> impl Iterator<Item = &MethodInfo> {
        self.members
            .iter()
            .filter_map(MemberInfo::as_method)
            .filter(|method| !method.is_extension())
    }

    /// Extension methods this type holds, whatever type they extend.
    pub fn extension_methods(&self) -> impl Iterator<Item = &MethodInfo> {
        self.members
            .iter()
            .filter_map(MemberInfo::as_method)
            .filter(|method| method.is_extension())
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMeta")
            .field("ty", &self.ty)
            .field("base", &self.base())
            .field("members", &self.members)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// A trait which allows a type to generate its [`TypeMeta`]
/// for registration into the [`TypeRegistry`].
///
/// # Example
///
/// ```
/// use vc_reflect::info::PropertyInfo;
/// use vc_reflect::registry::{GetTypeMeta, TypeMeta, TypeRegistry};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Door { open: bool }
/// vc_reflect::impl_reflect_value!(Door, "demo::Door");
///
/// impl GetTypeMeta for Door {
///     fn get_type_meta() -> TypeMeta {
///         TypeMeta::of::<Self>().with_property(PropertyInfo::new::<Self, bool>(
///             "is_open",
///             |d| d.open,
///             |d, v| d.open = v,
///         ))
///     }
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Door>();
/// assert!(registry.get_with_type_name("Door").is_some());
/// ```
pub trait GetTypeMeta: TypePath {
    /// Returns the **default** [`TypeMeta`] for this type.
    fn get_type_meta() -> TypeMeta;

    /// Registers other types needed by this type.
    ///
    /// Base types and member types are typical dependencies.
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}
